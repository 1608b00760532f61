use crate::commands::missing;
use crate::presentation::presenters;
use crate::presentation::{ConsoleRenderer, OutputFormat, Renderer, ViewMode};
use anyhow::Result;
use smartinvo_runtime::Dashboard;

pub async fn handle(
    dashboard: &Dashboard,
    city: &str,
    format: OutputFormat,
    view_mode: ViewMode,
) -> Result<()> {
    let Some(report) = dashboard.weather().lookup(city).await? else {
        return Err(missing("city"));
    };

    ConsoleRenderer::new(format, view_mode).render(presenters::present_weather(report))
}
