use crate::commands::missing;
use crate::presentation::presenters;
use crate::presentation::{ConsoleRenderer, OutputFormat, Renderer, ViewMode};
use anyhow::Result;
use smartinvo_runtime::Dashboard;

pub async fn handle(dashboard: &Dashboard, item: &str, format: OutputFormat) -> Result<()> {
    if item.trim().is_empty() {
        return Err(missing("item"));
    }

    // The "commonly wasted" flag needs the global list; a failure leaves it unset
    dashboard.statistics().refresh_global().await;

    let Some(report) = dashboard.shelf_life().lookup(item).await? else {
        return Err(missing("item"));
    };

    let view_model = presenters::present_shelf_life(report);
    ConsoleRenderer::new(format, ViewMode::default()).render(view_model)
}
