//! # Presentation Layer
//!
//! Everything that turns coordinator state into terminal output. It follows
//! an adaptation of **MVVM**: handlers gather data, presenters convert it,
//! view models carry it, renderers and views print it.
//!
//! ## Data Flow
//!
//! ### Console commands (JSON/Text)
//!
//! ```text
//! [ Handler ] --> [ Presenter ] --> [ ViewModel ] --> [ Renderer ] ==(JSON)==> [ serde_json ] --> Output
//!                                                                 ==(Text)==> [ View ] --> Output
//! ```
//!
//! ### Dashboard (TUI)
//!
//! The dashboard does not go through presenters. Its [`renderers::tui`] app
//! reads the coordinators' watch channels on every frame and draws them with
//! ratatui widgets; key presses become coordinator calls spawned on the
//! runtime.
//!
//! ## Rules
//!
//! ### 1. View models hold raw data
//! * ❌ Bad: `struct Vm { risk: "72.5" }`
//! * ✅ Good: `struct Vm { risk_score: Option<f64> }`
//! * JSON output is an API: numbers stay numbers, absent values stay absent.
//!
//! ### 2. Absent means omitted
//! Optional service fields are `Option` all the way to the view. Views print
//! a line only when the value is present and never substitute a zero.
//!
//! ### 3. `ViewMode` is density
//! * **Minimal:** one line per row, for pipes
//! * **Standard:** charts and tables (default)
//! * **Verbose:** every row and field
//!
//! `--format json` ignores the mode and dumps the whole view model.
//!
//! ## Directory Guide
//!
//! | Directory | Holds |
//! |-----------|-------|
//! | `view_models/` | Serializable data contracts and the `CreateView` trait |
//! | `presenters/` | Domain value → view model, badges and tips |
//! | `views/` | `fmt::Display` layouts per view model |
//! | `renderers/` | Console (JSON/Text), live trace playback, TUI dashboard |
//! | `formatters/` | Number formatting and text bar charts |

pub mod formatters;
pub mod presenters;
pub mod renderers;
pub mod view_models;
pub mod views;

// Re-exports for convenience
pub use renderers::{ConsoleRenderer, Renderer};
pub use view_models::{
    CommandResultViewModel, CreateView, Guidance, StatusBadge, StatusLevel,
    common::{OutputFormat, ViewMode},
};
