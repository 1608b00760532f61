use smartinvo_backend::Backend;
use smartinvo_types::ModelInfo;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, warn};

use super::{FetchOutcome, RefreshTarget};
use crate::stamp::KeyedStamp;
use crate::task::TaskScope;

struct Shared {
    backend: Arc<dyn Backend>,
    state: watch::Sender<Option<ModelInfo>>,
    stamp: KeyedStamp<()>,
}

impl Shared {
    async fn refresh(&self) -> FetchOutcome {
        let tag = self.stamp.issue(());
        match self.backend.model_info().await {
            Ok(info) => {
                let applied = self.stamp.apply_if_current(&tag, || {
                    self.state.send_replace(Some(info));
                });
                if applied {
                    debug!("model info applied");
                    FetchOutcome::Applied
                } else {
                    FetchOutcome::Stale
                }
            }
            Err(e) => {
                warn!(error = %e, "model info refresh failed");
                FetchOutcome::Failed
            }
        }
    }
}

/// Owns the model metadata panel. Refreshes are silent.
#[derive(Clone)]
pub struct ModelInfoCoordinator {
    shared: Arc<Shared>,
    scope: Arc<TaskScope>,
}

impl ModelInfoCoordinator {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        let (state, _) = watch::channel(None);
        Self {
            shared: Arc::new(Shared {
                backend,
                state,
                stamp: KeyedStamp::new(),
            }),
            scope: Arc::new(TaskScope::new()),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<ModelInfo>> {
        self.shared.state.subscribe()
    }

    pub fn current(&self) -> Option<ModelInfo> {
        self.shared.state.borrow().clone()
    }

    pub async fn refresh(&self) -> FetchOutcome {
        self.shared.refresh().await
    }
}

impl RefreshTarget for ModelInfoCoordinator {
    fn name(&self) -> &'static str {
        "model info"
    }

    fn request_refresh(&self) {
        let shared = self.shared.clone();
        self.scope.spawn(async move {
            shared.refresh().await;
        });
    }
}
