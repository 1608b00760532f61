use chrono::NaiveDate;
use serde::Serialize;
use smartinvo_types::{Category, RecommendationResult};

#[derive(Debug, Clone, Serialize)]
pub struct RecommendationViewModel {
    pub item: String,
    pub category: Category,
    pub city: String,
    pub arrival_date: NaiveDate,

    /// Service answer; absent fields stay absent in JSON
    #[serde(flatten)]
    pub result: RecommendationResult,

    /// Adjusted minus average shelf life, when both are known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shelf_life_delta: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShelfLifeViewModel {
    pub item: String,
    pub avg_shelf_life: f64,
    pub commonly_wasted: bool,
}
