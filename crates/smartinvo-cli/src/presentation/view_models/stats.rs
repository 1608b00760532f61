use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WasteRowViewModel {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    pub loss_percentage: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatisticsViewModel {
    pub city: String,
    /// `None` when the global list could not be loaded
    pub global: Option<Vec<WasteRowViewModel>>,
    /// `None` when the city's statistics could not be loaded
    pub store: Option<Vec<WasteRowViewModel>>,
    /// Rows per chart in text output
    #[serde(skip)]
    pub chart_rows: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeletionViewModel {
    pub city: String,
    pub item: String,
    /// The city's list after the authoritative re-fetch
    pub store: Option<Vec<WasteRowViewModel>>,
}
