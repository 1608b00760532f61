//! Live console playback of the transformation trace.
//!
//! Steps are printed in reveal order. Each description is streamed as its
//! typewriter advances and each `rows` counter is redrawn in place until it
//! lands on its total. A step revealed while an earlier one is still
//! animating waits its turn.

use anyhow::Result;
use smartinvo_runtime::{RevealedStep, SequencerSnapshot, StepSequencer};
use std::io::Write;

use crate::presentation::formatters::progress_bar;
use crate::presentation::presenters::waste_rows;
use crate::presentation::view_models::ViewMode;
use crate::presentation::views::{row_summary, trace};

const PROGRESS_WIDTH: usize = 24;

/// Play the current run to the end; returns the final snapshot.
pub async fn play_trace<W: Write>(
    sequencer: &StepSequencer,
    out: &mut W,
    mode: ViewMode,
) -> Result<SequencerSnapshot> {
    let mut rx = sequencer.subscribe();
    let mut shown = 0;

    loop {
        let snapshot = rx.borrow_and_update().clone();
        if let Some(revealed) = snapshot.steps.get(shown) {
            play_step(out, shown + 1, revealed, mode).await?;
            shown += 1;
            continue;
        }
        if !snapshot.is_running() {
            return Ok(snapshot);
        }
        if rx.changed().await.is_err() {
            return Ok(sequencer.snapshot());
        }
    }
}

async fn play_step<W: Write>(
    out: &mut W,
    position: usize,
    revealed: &RevealedStep,
    mode: ViewMode,
) -> Result<()> {
    writeln!(out, "{}", trace::header(position, &revealed.step.step))?;
    write!(out, "   ")?;

    let mut description = revealed.description.clone();
    let mut printed = 0;
    loop {
        let frame = description.borrow_and_update().clone();
        let fresh: String = frame.text.chars().skip(printed).collect();
        if !fresh.is_empty() {
            write!(out, "{}", fresh)?;
            out.flush()?;
            printed += fresh.chars().count();
        }
        if frame.is_complete() {
            break;
        }
        if description.changed().await.is_err() {
            // Animation torn down: finish from the step itself
            let rest: String = revealed.step.description.chars().skip(printed).collect();
            write!(out, "{}", rest)?;
            break;
        }
    }
    writeln!(out)?;

    if let Some(progress) = &revealed.progress {
        let mut progress = progress.clone();
        loop {
            let frame = *progress.borrow_and_update();
            write!(
                out,
                "\r   {} {}",
                progress_bar(frame.current, frame.total, PROGRESS_WIDTH),
                trace::rows_label(frame.total, mode)
            )?;
            out.flush()?;
            if frame.is_complete() || progress.changed().await.is_err() {
                break;
            }
        }
        writeln!(out)?;
    }

    if let Some(top) = &revealed.step.top {
        for row in waste_rows(top) {
            writeln!(out, "   - {}", row_summary(&row))?;
        }
    }
    Ok(())
}
