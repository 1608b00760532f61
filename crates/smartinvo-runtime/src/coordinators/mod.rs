//! Coordinators own one piece of remote state each.
//!
//! Each coordinator is the single writer of its state and publishes it on a
//! `watch` channel; views subscribe and only ever read.

mod model_info;
mod recommendation;
mod shelf_life;
mod statistics;
mod weather;

pub use model_info::ModelInfoCoordinator;
pub use recommendation::{RecommendationCoordinator, RecommendationSnapshot};
pub use shelf_life::{ShelfLifeLookup, ShelfLifeReport};
pub use statistics::{StatisticsCoordinator, StatisticsSnapshot, StoreStatistics};
pub use weather::WeatherLookup;

/// A view that can be told to re-fetch in the background
pub trait RefreshTarget: Send + Sync {
    fn name(&self) -> &'static str;

    /// Start a refresh without waiting for it; failures are logged only
    fn request_refresh(&self);
}

/// What happened to a background fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The response replaced the published value
    Applied,
    /// A newer request superseded this one; the response was dropped
    Stale,
    /// The fetch failed; the published value was kept
    Failed,
    /// Nothing to fetch (no city selected)
    Skipped,
}
