pub mod console;
pub mod playback;
pub mod traits;
pub mod tui;

pub use console::ConsoleRenderer;
pub use playback::play_trace;
pub use traits::Renderer;
pub use tui::{Action, DashboardFeed, TuiEvent, TuiRenderer};
