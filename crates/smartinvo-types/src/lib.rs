pub mod category;
pub mod error;
pub mod inventory;
pub mod model;
pub mod stats;
pub mod weather;

pub use category::Category;
pub use error::{Result, ValidationError};
pub use inventory::{
    RecommendationForm, RecommendationRequest, RecommendationResult, ShelfLifeResult,
};
pub use model::{HealthStatus, ModelInfo};
pub use stats::{TransformationStep, WasteStatEntry, contains_item};
pub use weather::{DailyForecast, WeatherReport};
