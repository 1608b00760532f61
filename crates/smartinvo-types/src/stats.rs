use serde::{Deserialize, Serialize};

/// One row of the global or per-store waste statistics.
///
/// The service names the key `commodity` for global data and `item` for
/// store data; both deserialize into `commodity`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WasteStatEntry {
    #[serde(alias = "item")]
    pub commodity: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    pub loss_percentage: f64,
}

impl WasteStatEntry {
    pub fn new(commodity: impl Into<String>, loss_percentage: f64) -> Self {
        Self {
            commodity: commodity.into(),
            country: None,
            loss_percentage,
        }
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    /// Case-insensitive exact name match
    pub fn matches(&self, name: &str) -> bool {
        self.commodity.to_lowercase() == name.to_lowercase()
    }
}

/// True when `name` appears in `entries` (case-insensitive exact match)
pub fn contains_item(entries: &[WasteStatEntry], name: &str) -> bool {
    entries.iter().any(|entry| entry.matches(name))
}

/// One stage of the server-side waste aggregation trace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformationStep {
    pub step: String,
    pub description: String,

    /// Rows processed by this stage; drives the simulated progress counter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<u64>,

    /// Top-N result of this stage, shown beneath the step
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<Vec<WasteStatEntry>>,
}

impl TransformationStep {
    pub fn new(step: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            step: step.into(),
            description: description.into(),
            rows: None,
            top: None,
        }
    }

    pub fn with_rows(mut self, rows: u64) -> Self {
        self.rows = Some(rows);
        self
    }

    pub fn with_top(mut self, top: Vec<WasteStatEntry>) -> Self {
        self.top = Some(top);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_rows_use_item_key() {
        let entries: Vec<WasteStatEntry> = serde_json::from_value(serde_json::json!([
            {"item": "Spinach", "loss_percentage": 12.5},
            {"commodity": "rice", "country": "India", "loss_percentage": 4.0}
        ]))
        .unwrap();

        assert_eq!(entries[0].commodity, "Spinach");
        assert_eq!(entries[0].country, None);
        assert_eq!(entries[1].country.as_deref(), Some("India"));
    }

    #[test]
    fn test_contains_item_ignores_case_only() {
        let entries = vec![WasteStatEntry::new("milk", 9.1), WasteStatEntry::new("Rice", 3.0)];

        assert!(contains_item(&entries, "Milk"));
        assert!(contains_item(&entries, "RICE"));
        assert!(!contains_item(&entries, "Milk powder"));
        assert!(!contains_item(&entries, " milk"));
        assert!(!contains_item(&[], "milk"));
    }

    #[test]
    fn test_step_optional_parts() {
        let steps: Vec<TransformationStep> = serde_json::from_value(serde_json::json!([
            {"step": "load_data", "description": "Loaded rows", "rows": 1200},
            {"step": "top_waste_items", "description": "Top items",
             "top": [{"commodity": "tomatoes", "loss_percentage": 31.2}]}
        ]))
        .unwrap();

        assert_eq!(steps[0].rows, Some(1200));
        assert!(steps[0].top.is_none());
        assert_eq!(steps[1].rows, None);
        assert_eq!(steps[1].top.as_ref().map(Vec::len), Some(1));
    }
}
