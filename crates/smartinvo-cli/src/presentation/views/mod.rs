mod inventory;
mod stats;
mod system;
pub mod trace;

pub(crate) use stats::row_summary;

/// Width of the label column in key/value layouts
pub(crate) const LABEL_WIDTH: usize = 20;
