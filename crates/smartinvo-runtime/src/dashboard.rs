//! Composition root wiring every coordinator to one backend and config.

use smartinvo_backend::{Backend, HttpBackend};
use smartinvo_types::{RecommendationForm, RecommendationResult};
use std::sync::Arc;
use tracing::info;

use crate::config::Config;
use crate::coordinators::{
    FetchOutcome, ModelInfoCoordinator, RecommendationCoordinator, ShelfLifeLookup,
    StatisticsCoordinator, WeatherLookup,
};
use crate::sequencer::StepSequencer;
use crate::{Error, Result};

pub struct DashboardBuilder {
    config: Arc<Config>,
    backend: Option<Arc<dyn Backend>>,
    city: Option<String>,
}

impl DashboardBuilder {
    pub fn new(config: Arc<Config>) -> Self {
        Self {
            config,
            backend: None,
            city: None,
        }
    }

    /// Use `backend` instead of an HTTP client built from the config
    pub fn backend(mut self, backend: Arc<dyn Backend>) -> Self {
        self.backend = Some(backend);
        self
    }

    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn build(self) -> Result<Dashboard> {
        let backend: Arc<dyn Backend> = match self.backend {
            Some(backend) => backend,
            None => Arc::new(HttpBackend::new(&self.config.api_url, self.config.timeout())?),
        };

        let city = self
            .city
            .or_else(|| self.config.default_city.clone())
            .unwrap_or_default();

        let statistics = StatisticsCoordinator::new(backend.clone(), city);
        let model_info = ModelInfoCoordinator::new(backend.clone());
        let recommendation = RecommendationCoordinator::new(backend.clone())
            .with_dependent(Arc::new(statistics.clone()))
            .with_dependent(Arc::new(model_info.clone()));
        let sequencer = StepSequencer::new(backend.clone(), self.config.animation.clone());
        let shelf_life = ShelfLifeLookup::new(backend.clone(), statistics.subscribe());
        let weather = WeatherLookup::new(backend.clone());

        Ok(Dashboard {
            config: self.config,
            backend,
            statistics,
            model_info,
            recommendation,
            sequencer,
            shelf_life,
            weather,
        })
    }
}

/// Every coordinator of one dashboard session.
///
/// Dropping the dashboard aborts every background fetch and animation timer.
pub struct Dashboard {
    config: Arc<Config>,
    backend: Arc<dyn Backend>,
    statistics: StatisticsCoordinator,
    model_info: ModelInfoCoordinator,
    recommendation: RecommendationCoordinator,
    sequencer: StepSequencer,
    shelf_life: ShelfLifeLookup,
    weather: WeatherLookup,
}

impl Dashboard {
    pub fn builder(config: Arc<Config>) -> DashboardBuilder {
        DashboardBuilder::new(config)
    }

    /// Startup fetches: global and store statistics plus model metadata
    pub async fn mount(&self) {
        let ((global, store), model) =
            futures::join!(self.statistics.mount(), self.model_info.refresh());
        info!(?global, ?store, ?model, "dashboard mounted");
    }

    /// Submit the form; on success the transformation trace is re-triggered.
    pub async fn submit(&self, form: &RecommendationForm) -> Result<RecommendationResult> {
        // Lower first so a success is always a fresh rising edge
        self.sequencer.set_signal(false);
        let result = self.recommendation.submit(form).await?;
        self.sequencer.set_signal(true);
        Ok(result)
    }

    pub async fn set_city(&self, city: &str) -> FetchOutcome {
        self.statistics.set_city(city).await
    }

    pub async fn delete_item(&self, item: &str) -> Result<()> {
        let city = self.statistics.city();
        if city.is_empty() {
            return Err(Error::Config("no city selected".to_string()));
        }
        self.statistics.delete_item(&city, item).await
    }

    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    pub fn backend(&self) -> &Arc<dyn Backend> {
        &self.backend
    }

    pub fn statistics(&self) -> &StatisticsCoordinator {
        &self.statistics
    }

    pub fn model_info(&self) -> &ModelInfoCoordinator {
        &self.model_info
    }

    pub fn recommendation(&self) -> &RecommendationCoordinator {
        &self.recommendation
    }

    pub fn sequencer(&self) -> &StepSequencer {
        &self.sequencer
    }

    pub fn shelf_life(&self) -> &ShelfLifeLookup {
        &self.shelf_life
    }

    pub fn weather(&self) -> &WeatherLookup {
        &self.weather
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smartinvo_backend::Operation;
    use smartinvo_testing::{StubBackend, fixtures};

    fn dashboard(stub: &Arc<StubBackend>) -> Dashboard {
        Dashboard::builder(Arc::new(Config::default()))
            .backend(stub.clone())
            .city("Singapore")
            .build()
            .unwrap()
    }

    fn scripted() -> Arc<StubBackend> {
        let stub = StubBackend::shared();
        stub.respond(Operation::GlobalWaste, fixtures::global_waste())
            .respond(Operation::StoreSpoiled, fixtures::store_stats_singapore())
            .respond(Operation::ModelInfo, fixtures::model_info())
            .respond(Operation::GlobalWasteSteps, fixtures::transformation_steps())
            .respond(Operation::Recommend, fixtures::discount_soon());
        stub
    }

    #[tokio::test(start_paused = true)]
    async fn test_mount_fetches_everything_once() {
        let stub = scripted();
        let dashboard = dashboard(&stub);
        dashboard.mount().await;

        assert_eq!(stub.call_count(Operation::GlobalWaste), 1);
        assert_eq!(stub.call_count(Operation::StoreSpoiled), 1);
        assert_eq!(stub.call_count(Operation::ModelInfo), 1);
        assert!(dashboard.model_info().current().is_some());
        assert_eq!(stub.call_count(Operation::GlobalWasteSteps), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_successful_submit_fans_out_and_triggers_trace() {
        let stub = scripted();
        let dashboard = dashboard(&stub);
        dashboard.mount().await;

        let result = dashboard.submit(&fixtures::spinach_form()).await.unwrap();
        assert_eq!(result.risk_score, Some(72.5));
        assert!(dashboard.sequencer().snapshot().is_running());

        let done = dashboard.sequencer().wait_idle().await;
        assert_eq!(done.steps.len(), 3);

        // Background refreshes requested by the submission
        let mut stats = dashboard.statistics().subscribe();
        stats
            .wait_for(|_| stub.call_count(Operation::StoreSpoiled) == 2)
            .await
            .unwrap();
        assert_eq!(stub.call_count(Operation::ModelInfo), 2);

        // A second success starts a fresh run
        dashboard.submit(&fixtures::spinach_form()).await.unwrap();
        assert_eq!(dashboard.sequencer().snapshot().run, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_submit_does_not_trigger_trace() {
        let stub = scripted();
        stub.fail_status(Operation::Recommend, 422, "Unknown item");
        let dashboard = dashboard(&stub);

        dashboard.submit(&fixtures::spinach_form()).await.unwrap_err();
        assert_eq!(dashboard.sequencer().snapshot().run, 0);
        assert_eq!(stub.call_count(Operation::StoreSpoiled), 0);
    }

    #[test]
    fn test_default_city_from_config() {
        let config = Config {
            default_city: Some("Lagos".to_string()),
            ..Config::default()
        };
        let stub = StubBackend::shared();
        let dashboard = Dashboard::builder(Arc::new(config))
            .backend(stub)
            .build()
            .unwrap();
        assert_eq!(dashboard.statistics().city(), "Lagos");
    }
}
