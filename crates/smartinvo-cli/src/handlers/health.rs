use crate::presentation::presenters;
use crate::presentation::{ConsoleRenderer, OutputFormat, Renderer, ViewMode};
use anyhow::Result;
use smartinvo_runtime::Dashboard;

pub async fn handle(dashboard: &Dashboard, format: OutputFormat) -> Result<()> {
    let status = dashboard
        .backend()
        .health()
        .await
        .map_err(smartinvo_runtime::Error::from)?;

    let view_model = presenters::present_health(&dashboard.config().api_url, status);
    ConsoleRenderer::new(format, ViewMode::default()).render(view_model)
}
