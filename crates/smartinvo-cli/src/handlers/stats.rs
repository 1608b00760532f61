use crate::commands::missing;
use crate::presentation::presenters;
use crate::presentation::{ConsoleRenderer, OutputFormat, Renderer, ViewMode};
use anyhow::Result;
use smartinvo_runtime::Dashboard;

pub async fn show(
    dashboard: &Dashboard,
    top: usize,
    format: OutputFormat,
    view_mode: ViewMode,
) -> Result<()> {
    dashboard.statistics().mount().await;
    let snapshot = dashboard.statistics().snapshot();

    let view_model = presenters::present_statistics(&snapshot, top);
    ConsoleRenderer::new(format, view_mode).render(view_model)
}

/// Delete, then show the list as re-fetched after the deletion.
///
/// A failed deletion is still followed by the re-fetch; its error is
/// returned afterwards.
pub async fn delete(dashboard: &Dashboard, item: &str, format: OutputFormat) -> Result<()> {
    let item = item.trim();
    if item.is_empty() {
        return Err(missing("item"));
    }

    dashboard.delete_item(item).await?;
    let snapshot = dashboard.statistics().snapshot();

    let view_model = presenters::present_deletion(item, &snapshot);
    ConsoleRenderer::new(format, ViewMode::default()).render(view_model)
}
