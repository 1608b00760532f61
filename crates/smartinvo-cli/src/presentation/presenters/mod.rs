mod inventory;
mod stats;
mod system;
mod trace;

pub use inventory::{present_recommendation, present_shelf_life};
pub use stats::{present_deletion, present_statistics, waste_rows};
pub use system::{present_config, present_config_init, present_health, present_model, present_weather};
pub use trace::present_trace;
