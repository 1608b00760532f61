use serde::Serialize;

use super::WasteRowViewModel;

#[derive(Debug, Clone, Serialize)]
pub struct TraceViewModel {
    pub steps: Vec<TraceStepViewModel>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TraceStepViewModel {
    /// 1-based position in the trace
    pub position: usize,
    pub step: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<u64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub top: Vec<WasteRowViewModel>,
}
