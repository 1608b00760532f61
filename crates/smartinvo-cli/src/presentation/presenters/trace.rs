use crate::args::hints::cmd;
use crate::presentation::view_models::{
    CommandResultViewModel, Guidance, StatusBadge, TraceStepViewModel, TraceViewModel,
};
use smartinvo_runtime::SequencerSnapshot;

use super::waste_rows;

pub fn present_trace(snapshot: &SequencerSnapshot) -> CommandResultViewModel<TraceViewModel> {
    let steps = snapshot
        .steps
        .iter()
        .enumerate()
        .map(|(index, revealed)| TraceStepViewModel {
            position: index + 1,
            step: revealed.step.step.clone(),
            description: revealed.step.description.clone(),
            rows: revealed.step.rows,
            top: revealed
                .step
                .top
                .as_deref()
                .map(waste_rows)
                .unwrap_or_default(),
        })
        .collect::<Vec<_>>();

    if steps.is_empty() {
        return CommandResultViewModel::new(TraceViewModel { steps })
            .with_badge(StatusBadge::warning("No transformation steps available"))
            .with_suggestion(
                Guidance::new("Check that the service is reachable").with_command(cmd::HEALTH),
            );
    }

    let label = format!("{} transformation steps", steps.len());
    CommandResultViewModel::new(TraceViewModel { steps }).with_badge(StatusBadge::info(label))
}
