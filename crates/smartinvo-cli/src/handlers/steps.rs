use crate::presentation::presenters;
use crate::presentation::renderers::play_trace;
use crate::presentation::{ConsoleRenderer, OutputFormat, Renderer, ViewMode};
use anyhow::Result;
use is_terminal::IsTerminal;
use smartinvo_runtime::Dashboard;
use std::io;

pub async fn handle(
    dashboard: &Dashboard,
    no_animate: bool,
    format: OutputFormat,
    view_mode: ViewMode,
) -> Result<()> {
    let sequencer = dashboard.sequencer();
    sequencer.pulse();

    let animate = !no_animate && format == OutputFormat::Text && io::stdout().is_terminal();
    if animate {
        let snapshot = play_trace(sequencer, &mut io::stdout(), view_mode).await?;
        if snapshot.steps.is_empty() {
            ConsoleRenderer::new(format, view_mode).render(presenters::present_trace(&snapshot))?;
        }
        return Ok(());
    }

    let snapshot = sequencer.wait_idle().await;
    ConsoleRenderer::new(format, view_mode).render(presenters::present_trace(&snapshot))
}
