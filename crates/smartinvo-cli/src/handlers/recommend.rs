use crate::presentation::presenters;
use crate::presentation::{ConsoleRenderer, OutputFormat, Renderer, ViewMode};
use anyhow::Result;
use smartinvo_backend::HttpBackend;
use smartinvo_runtime::{Config, RecommendationCoordinator};
use smartinvo_types::RecommendationForm;
use std::sync::Arc;

pub async fn handle(config: &Config, form: RecommendationForm, format: OutputFormat) -> Result<()> {
    let request = form.validate().map_err(smartinvo_runtime::Error::from)?;

    // Nothing on screen to refresh afterwards, so no dependents
    let backend = HttpBackend::new(&config.api_url, config.timeout())
        .map_err(smartinvo_runtime::Error::from)?;
    let coordinator = RecommendationCoordinator::new(Arc::new(backend));
    let result = coordinator.submit_request(&request).await?;

    let view_model = presenters::present_recommendation(&request, result);
    ConsoleRenderer::new(format, ViewMode::default()).render(view_model)
}
