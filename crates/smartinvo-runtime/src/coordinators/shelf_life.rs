use serde::Serialize;
use smartinvo_backend::Backend;
use smartinvo_types::{ShelfLifeResult, contains_item};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

use super::StatisticsSnapshot;
use crate::Result;

/// Shelf-life answer plus the derived "commonly wasted" flag
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShelfLifeReport {
    #[serde(flatten)]
    pub result: ShelfLifeResult,
    /// The item appears in the loaded global waste list; never persisted
    pub commonly_wasted: bool,
}

/// On-demand single-item shelf-life query.
pub struct ShelfLifeLookup {
    backend: Arc<dyn Backend>,
    statistics: watch::Receiver<StatisticsSnapshot>,
}

impl ShelfLifeLookup {
    pub fn new(backend: Arc<dyn Backend>, statistics: watch::Receiver<StatisticsSnapshot>) -> Self {
        Self {
            backend,
            statistics,
        }
    }

    /// Look up `item`; blank input is a no-op returning `None`.
    ///
    /// The flag is computed against whatever global list is loaded when the
    /// answer arrives.
    pub async fn lookup(&self, item: &str) -> Result<Option<ShelfLifeReport>> {
        let item = item.trim();
        if item.is_empty() {
            return Ok(None);
        }

        let result = self.backend.shelf_life(item).await?;
        let commonly_wasted = contains_item(&self.statistics.borrow().global, &result.item);
        debug!(item = %result.item, commonly_wasted, "shelf life resolved");

        Ok(Some(ShelfLifeReport {
            result,
            commonly_wasted,
        }))
    }
}
