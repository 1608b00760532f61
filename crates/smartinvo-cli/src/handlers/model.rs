use crate::presentation::presenters;
use crate::presentation::{ConsoleRenderer, OutputFormat, Renderer, ViewMode};
use anyhow::{Result, bail};
use smartinvo_runtime::Dashboard;

pub async fn handle(dashboard: &Dashboard, format: OutputFormat) -> Result<()> {
    dashboard.model_info().refresh().await;
    let Some(info) = dashboard.model_info().current() else {
        bail!("model information unavailable from {}", dashboard.config().api_url);
    };

    ConsoleRenderer::new(format, ViewMode::default()).render(presenters::present_model(info))
}
