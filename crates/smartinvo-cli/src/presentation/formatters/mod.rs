pub mod chart;
pub mod number;

pub use chart::{ChartRow, bar_lines, progress_bar};
