use smartinvo_backend::Backend;
use smartinvo_types::WasteStatEntry;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::{FetchOutcome, RefreshTarget};
use crate::stamp::{KeyedStamp, RequestTag};
use crate::task::TaskScope;
use crate::{Error, Result};

/// Store statistics as last fetched for one city
#[derive(Debug, Clone, PartialEq)]
pub struct StoreStatistics {
    pub city: String,
    pub entries: Arc<Vec<WasteStatEntry>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatisticsSnapshot {
    /// Global waste statistics; empty until the first successful fetch
    pub global: Arc<Vec<WasteStatEntry>>,
    pub global_loaded: bool,
    /// `None` while the current city has no successful fetch yet
    pub store: Option<StoreStatistics>,
    /// Currently selected city
    pub city: String,
}

impl StatisticsSnapshot {
    /// Nothing loaded yet for `city`
    pub fn for_city(city: impl Into<String>) -> Self {
        let city = city.into();
        Self {
            global: Arc::new(Vec::new()),
            global_loaded: false,
            store: None,
            city,
        }
    }
}

struct Shared {
    backend: Arc<dyn Backend>,
    state: watch::Sender<StatisticsSnapshot>,
    store_stamp: KeyedStamp<String>,
    global_stamp: KeyedStamp<()>,
}

/// Owns global and per-city store waste statistics.
///
/// Store fetches are last-request-wins: a response is applied only if no
/// newer request (or city change) happened since it was issued.
#[derive(Clone)]
pub struct StatisticsCoordinator {
    shared: Arc<Shared>,
    scope: Arc<TaskScope>,
}

impl StatisticsCoordinator {
    pub fn new(backend: Arc<dyn Backend>, city: impl Into<String>) -> Self {
        let city = city.into().trim().to_string();
        let (state, _) = watch::channel(StatisticsSnapshot::for_city(city.clone()));
        let store_stamp = KeyedStamp::new();
        store_stamp.issue(city);
        Self {
            shared: Arc::new(Shared {
                backend,
                state,
                store_stamp,
                global_stamp: KeyedStamp::new(),
            }),
            scope: Arc::new(TaskScope::new()),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<StatisticsSnapshot> {
        self.shared.state.subscribe()
    }

    pub fn snapshot(&self) -> StatisticsSnapshot {
        self.shared.state.borrow().clone()
    }

    pub fn city(&self) -> String {
        self.shared.state.borrow().city.clone()
    }

    /// Initial load: global and store statistics concurrently
    pub async fn mount(&self) -> (FetchOutcome, FetchOutcome) {
        futures::join!(self.refresh_global(), self.refresh_store())
    }

    pub async fn refresh_global(&self) -> FetchOutcome {
        self.shared.refresh_global().await
    }

    /// Re-fetch store statistics for the current city
    pub async fn refresh_store(&self) -> FetchOutcome {
        match self.shared.reissue_store() {
            Some(tag) => self.shared.fetch_store(tag).await,
            None => FetchOutcome::Skipped,
        }
    }

    /// Switch city and fetch its statistics.
    ///
    /// The previous city's data is cleared at once and any of its in-flight
    /// responses are dropped when they arrive.
    pub async fn set_city(&self, city: &str) -> FetchOutcome {
        let tag = self.select_city(city);
        self.shared.fetch_store(tag).await
    }

    fn select_city(&self, city: &str) -> RequestTag<String> {
        let city = city.trim().to_string();
        let tag = self.shared.store_stamp.issue_with(city, |city| {
            self.shared.state.send_modify(|snapshot| {
                snapshot.city = city.clone();
                snapshot.store = None;
            });
        });
        info!(city = %tag.key, "store city changed");
        tag
    }

    /// Delete one item's statistic, then re-fetch that city's list.
    ///
    /// The re-fetch happens exactly once whatever the deletion reported. A
    /// deletion failure is returned after the re-fetch.
    pub async fn delete_item(&self, city: &str, item: &str) -> Result<()> {
        let city = city.trim();
        let item = item.trim();
        let deleted = self.shared.backend.delete_store_spoiled(city, item).await;
        match &deleted {
            Ok(()) => info!(city, item, "store statistic deleted"),
            Err(e) => warn!(city, item, error = %e, "store statistic delete failed"),
        }

        let tag = self.shared.store_stamp.issue_for(city.to_string());
        self.shared.fetch_store(tag).await;

        deleted.map_err(Error::from)
    }
}

impl Shared {
    /// The stamp's key is the selected city; the snapshot only mirrors it
    fn reissue_store(&self) -> Option<RequestTag<String>> {
        self.store_stamp.reissue_current()
    }

    async fn refresh_global(&self) -> FetchOutcome {
        let tag = self.global_stamp.issue(());
        match self.backend.global_waste().await {
            Ok(entries) => {
                let count = entries.len();
                let applied = self.global_stamp.apply_if_current(&tag, || {
                    self.state.send_modify(|snapshot| {
                        snapshot.global = Arc::new(entries);
                        snapshot.global_loaded = true;
                    });
                });
                if applied {
                    debug!(entries = count, "global waste statistics applied");
                    FetchOutcome::Applied
                } else {
                    debug!("stale global waste response discarded");
                    FetchOutcome::Stale
                }
            }
            Err(e) => {
                warn!(error = %e, "global waste refresh failed");
                FetchOutcome::Failed
            }
        }
    }

    async fn fetch_store(&self, tag: RequestTag<String>) -> FetchOutcome {
        if tag.key.is_empty() {
            return FetchOutcome::Skipped;
        }

        debug!(city = %tag.key, version = tag.version, "fetching store statistics");
        match self.backend.store_spoiled(&tag.key).await {
            Ok(entries) => {
                let count = entries.len();
                let applied = self.store_stamp.apply_if_current(&tag, || {
                    self.state.send_modify(|snapshot| {
                        snapshot.store = Some(StoreStatistics {
                            city: tag.key.clone(),
                            entries: Arc::new(entries),
                        });
                    });
                });
                if applied {
                    debug!(city = %tag.key, entries = count, "store statistics applied");
                    FetchOutcome::Applied
                } else {
                    debug!(city = %tag.key, version = tag.version, "stale store response discarded");
                    FetchOutcome::Stale
                }
            }
            Err(e) => {
                warn!(city = %tag.key, error = %e, "store statistics refresh failed");
                FetchOutcome::Failed
            }
        }
    }
}

impl RefreshTarget for StatisticsCoordinator {
    fn name(&self) -> &'static str {
        "store statistics"
    }

    fn request_refresh(&self) {
        let Some(tag) = self.shared.reissue_store() else {
            return;
        };
        let this = self.shared.clone();
        self.scope.spawn(async move {
            this.fetch_store(tag).await;
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smartinvo_backend::{Operation, ServiceError};
    use smartinvo_testing::{StubBackend, fixtures};

    fn coordinator(stub: &Arc<StubBackend>, city: &str) -> StatisticsCoordinator {
        StatisticsCoordinator::new(stub.clone(), city)
    }

    #[tokio::test]
    async fn test_mount_loads_both_lists() {
        let stub = StubBackend::shared();
        stub.respond(Operation::GlobalWaste, fixtures::global_waste())
            .respond_for(Operation::StoreSpoiled, "Singapore", fixtures::store_stats_singapore());
        let stats = coordinator(&stub, "Singapore");

        assert_eq!(stats.mount().await, (FetchOutcome::Applied, FetchOutcome::Applied));

        let snapshot = stats.snapshot();
        assert!(snapshot.global_loaded);
        assert_eq!(snapshot.global.len(), 3);
        let store = snapshot.store.expect("store loaded");
        assert_eq!(store.city, "Singapore");
        assert_eq!(store.entries[0].commodity, "Spinach");
    }

    #[tokio::test]
    async fn test_stale_city_response_is_discarded() {
        let stub = StubBackend::shared();
        stub.respond_for(Operation::StoreSpoiled, "Singapore", fixtures::store_stats_singapore())
            .respond_for(Operation::StoreSpoiled, "Lagos", fixtures::store_stats_lagos());
        let gate_a = stub.gate(Operation::StoreSpoiled, Some("Singapore"));
        let stats = coordinator(&stub, "Singapore");

        // A is issued and held
        let pending_a = tokio::spawn({
            let stats = stats.clone();
            async move { stats.refresh_store().await }
        });
        tokio::task::yield_now().await;

        // Switch to B, which resolves first
        assert_eq!(stats.set_city("Lagos").await, FetchOutcome::Applied);

        // A resolves after B was issued
        gate_a.open();
        assert_eq!(pending_a.await.unwrap(), FetchOutcome::Stale);

        let store = stats.snapshot().store.expect("store loaded");
        assert_eq!(store.city, "Lagos");
        assert_eq!(store.entries.len(), 1);
        assert_eq!(store.entries[0].commodity, "Yam");
    }

    #[tokio::test]
    async fn test_city_change_clears_store_while_pending() {
        let stub = StubBackend::shared();
        stub.respond(Operation::StoreSpoiled, fixtures::store_stats_singapore());
        let stats = coordinator(&stub, "Singapore");
        stats.refresh_store().await;
        assert!(stats.snapshot().store.is_some());

        let gate = stub.gate(Operation::StoreSpoiled, Some("Lagos"));
        let pending = tokio::spawn({
            let stats = stats.clone();
            async move { stats.set_city("Lagos").await }
        });
        tokio::task::yield_now().await;

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.city, "Lagos");
        assert!(snapshot.store.is_none());

        gate.open();
        assert_eq!(pending.await.unwrap(), FetchOutcome::Applied);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_last_good_state() {
        let stub = StubBackend::shared();
        stub.respond(Operation::GlobalWaste, fixtures::global_waste());
        let stats = coordinator(&stub, "Singapore");
        stats.refresh_global().await;

        stub.fail_status(Operation::GlobalWaste, 500, "down");
        assert_eq!(stats.refresh_global().await, FetchOutcome::Failed);
        assert_eq!(stats.snapshot().global.len(), 3);
    }

    #[tokio::test]
    async fn test_delete_refetches_once_on_success() -> anyhow::Result<()> {
        let stub = StubBackend::shared();
        stub.respond(Operation::StoreSpoiled, fixtures::store_stats_singapore())
            .respond(Operation::DeleteStoreSpoiled, serde_json::json!({}));
        let stats = coordinator(&stub, "Singapore");
        stats.refresh_store().await;

        // Server now reports the list without Milk
        stub.respond(
            Operation::StoreSpoiled,
            serde_json::json!([{"item": "Spinach", "loss_percentage": 22.0}]),
        );
        stats.delete_item("Singapore", "Milk").await?;

        assert_eq!(stub.call_count(Operation::StoreSpoiled), 2);
        let deletes = stub.calls_for(Operation::DeleteStoreSpoiled);
        assert_eq!(
            deletes[0].body,
            Some(serde_json::json!({"city": "Singapore", "item": "Milk"}))
        );
        let store = stats.snapshot().store.expect("store loaded");
        assert_eq!(store.entries.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_refetches_once_on_failure() {
        let stub = StubBackend::shared();
        stub.respond(Operation::StoreSpoiled, fixtures::store_stats_singapore())
            .fail_status(Operation::DeleteStoreSpoiled, 404, "Item not found");
        let stats = coordinator(&stub, "Singapore");

        let err = stats.delete_item("Singapore", "Kale").await.unwrap_err();
        assert!(matches!(
            err,
            Error::Service(ServiceError::Status { status: 404, .. })
        ));
        assert_eq!(stub.call_count(Operation::StoreSpoiled), 1);
        assert!(stats.snapshot().store.is_some());
    }

    #[tokio::test]
    async fn test_delete_for_other_city_does_not_overwrite() {
        let stub = StubBackend::shared();
        stub.respond(Operation::DeleteStoreSpoiled, serde_json::json!({}))
            .respond_for(Operation::StoreSpoiled, "Singapore", fixtures::store_stats_singapore())
            .respond_for(Operation::StoreSpoiled, "Lagos", fixtures::store_stats_lagos());
        let stats = coordinator(&stub, "Lagos");
        stats.refresh_store().await;

        stats.delete_item("Singapore", "Milk").await.unwrap();

        let calls = stub.calls_for(Operation::StoreSpoiled);
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].arg.as_deref(), Some("Singapore"));
        assert_eq!(stats.snapshot().store.map(|s| s.city).as_deref(), Some("Lagos"));
    }

    #[tokio::test]
    async fn test_blank_city_skips_fetch() {
        let stub = StubBackend::shared();
        let stats = coordinator(&stub, "  ");
        assert_eq!(stats.refresh_store().await, FetchOutcome::Skipped);
        assert_eq!(stub.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_request_refresh_runs_in_background() {
        let stub = StubBackend::shared();
        stub.respond(Operation::StoreSpoiled, fixtures::store_stats_singapore());
        let stats = coordinator(&stub, "Singapore");
        let mut rx = stats.subscribe();

        stats.request_refresh();
        rx.wait_for(|s| s.store.is_some()).await.unwrap();
        assert_eq!(stub.call_count(Operation::StoreSpoiled), 1);
        assert_eq!(stats.name(), "store statistics");
    }

    #[test]
    fn test_refresh_racing_city_switch_targets_new_city() {
        use std::sync::Barrier;
        use std::thread;

        let stub = StubBackend::shared();
        for _ in 0..2_000 {
            let stats = coordinator(&stub, "Singapore");
            let barrier = Arc::new(Barrier::new(2));

            let refresh = thread::spawn({
                let stats = stats.clone();
                let barrier = barrier.clone();
                move || {
                    barrier.wait();
                    stats.shared.reissue_store()
                }
            });
            let switch = thread::spawn({
                let stats = stats.clone();
                let barrier = barrier.clone();
                move || {
                    barrier.wait();
                    stats.select_city("Lagos")
                }
            });

            let refresh_tag = refresh.join().unwrap().expect("city issued at construction");
            let switch_tag = switch.join().unwrap();

            assert_eq!(stats.city(), "Lagos");
            assert_eq!(stats.shared.store_stamp.current_key().as_deref(), Some("Lagos"));
            // Whichever tag is current must be for the displayed city
            for tag in [&refresh_tag, &switch_tag] {
                if stats.shared.store_stamp.is_current(tag) {
                    assert_eq!(tag.key, "Lagos");
                }
            }
        }
    }
}
