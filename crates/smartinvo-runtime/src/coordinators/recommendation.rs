use smartinvo_backend::Backend;
use smartinvo_types::{RecommendationForm, RecommendationRequest, RecommendationResult};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::watch;
use tracing::{info, warn};

use super::RefreshTarget;
use crate::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecommendationSnapshot {
    /// Latest successful result, stored verbatim
    pub result: Option<RecommendationResult>,
    /// Message of the last failed submission
    pub error: Option<String>,
    pub submitting: bool,
}

/// Resets the in-flight flag on every exit path
struct InFlight<'a> {
    flag: &'a AtomicBool,
    state: &'a watch::Sender<RecommendationSnapshot>,
}

impl<'a> InFlight<'a> {
    fn acquire(
        flag: &'a AtomicBool,
        state: &'a watch::Sender<RecommendationSnapshot>,
    ) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()?;
        state.send_modify(|snapshot| snapshot.submitting = true);
        Some(Self { flag, state })
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.state.send_modify(|snapshot| snapshot.submitting = false);
        self.flag.store(false, Ordering::SeqCst);
    }
}

/// Owns recommendation submission and fans out refreshes on success.
pub struct RecommendationCoordinator {
    backend: Arc<dyn Backend>,
    state: watch::Sender<RecommendationSnapshot>,
    in_flight: AtomicBool,
    dependents: Vec<Arc<dyn RefreshTarget>>,
}

impl RecommendationCoordinator {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        let (state, _) = watch::channel(RecommendationSnapshot::default());
        Self {
            backend,
            state,
            in_flight: AtomicBool::new(false),
            dependents: Vec::new(),
        }
    }

    /// Views refreshed after every successful submission
    pub fn with_dependent(mut self, target: Arc<dyn RefreshTarget>) -> Self {
        self.dependents.push(target);
        self
    }

    pub fn subscribe(&self) -> watch::Receiver<RecommendationSnapshot> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> RecommendationSnapshot {
        self.state.borrow().clone()
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Validate and submit the form.
    ///
    /// Returns [`Error::Busy`] without side effects while another submission
    /// is in flight. A validation failure sends nothing and leaves the
    /// displayed result alone; a service failure clears it.
    pub async fn submit(&self, form: &RecommendationForm) -> Result<RecommendationResult> {
        let Some(_guard) = InFlight::acquire(&self.in_flight, &self.state) else {
            return Err(Error::Busy);
        };

        let request = match form.validate() {
            Ok(request) => request,
            Err(e) => {
                self.state
                    .send_modify(|snapshot| snapshot.error = Some(e.to_string()));
                return Err(e.into());
            }
        };

        self.send(&request).await
    }

    /// Submit a request that was already validated.
    ///
    /// Same in-flight guard and result handling as [`submit`](Self::submit).
    pub async fn submit_request(
        &self,
        request: &RecommendationRequest,
    ) -> Result<RecommendationResult> {
        let Some(_guard) = InFlight::acquire(&self.in_flight, &self.state) else {
            return Err(Error::Busy);
        };
        self.send(request).await
    }

    async fn send(&self, request: &RecommendationRequest) -> Result<RecommendationResult> {
        info!(item = request.item(), city = request.city(), "requesting recommendation");
        match self.backend.recommend(request).await {
            Ok(result) => {
                self.state.send_modify(|snapshot| {
                    snapshot.result = Some(result.clone());
                    snapshot.error = None;
                });
                for target in &self.dependents {
                    info!(target = target.name(), "refresh after recommendation");
                    target.request_refresh();
                }
                Ok(result)
            }
            Err(e) => {
                warn!(error = %e, "recommendation request failed");
                self.state.send_modify(|snapshot| {
                    snapshot.result = None;
                    snapshot.error = Some(e.user_message());
                });
                Err(e.into())
            }
        }
    }
}
