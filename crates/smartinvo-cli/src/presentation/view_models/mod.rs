pub mod common;
pub mod inventory;
pub mod result;
pub mod stats;
pub mod system;
pub mod trace;

pub use common::{Guidance, OutputFormat, StatusBadge, StatusLevel, ViewMode};
pub use inventory::*;
pub use result::CommandResultViewModel;
pub use stats::*;
pub use system::*;
pub use trace::*;

use std::fmt;

/// Bridge from a view model to its text layout
pub trait CreateView {
    fn create_view<'a>(&'a self, mode: ViewMode) -> Box<dyn fmt::Display + 'a>;
}
