//! Step-by-step reveal of the server-side waste aggregation trace.
//!
//! On each rising edge of the trigger signal the sequencer fetches the whole
//! trace once, resets the revealed list to empty and appends one step per
//! cadence, the first one immediately. Each appended step gets its own
//! typewriter for the description and, when it carries `rows`, a progress
//! simulator. Those animations live in the sequencer's scope and are torn
//! down with it or at the next trigger.

use smartinvo_backend::Backend;
use smartinvo_types::TransformationStep;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::watch;
use tokio::time::interval;
use tracing::{debug, info, warn};

use crate::animation::{ProgressFrame, ProgressSimulator, TypewriterFrame, Typewriter, spawn_reveal};
use crate::config::AnimationConfig;
use crate::task::{ScopeRef, TaskScope};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerPhase {
    Idle,
    Running,
}

/// A step that has been appended to the revealed list
#[derive(Debug, Clone)]
pub struct RevealedStep {
    pub step: TransformationStep,
    pub description: watch::Receiver<TypewriterFrame>,
    pub progress: Option<watch::Receiver<ProgressFrame>>,
}

impl RevealedStep {
    pub fn description_text(&self) -> String {
        self.description.borrow().text.clone()
    }

    pub fn progress_frame(&self) -> Option<ProgressFrame> {
        self.progress.as_ref().map(|rx| *rx.borrow())
    }
}

#[derive(Debug, Clone)]
pub struct SequencerSnapshot {
    pub phase: SequencerPhase,
    /// Always a prefix of the fetched trace
    pub steps: Vec<RevealedStep>,
    /// Length of the fetched trace once it has arrived
    pub total: Option<usize>,
    /// Incremented on every accepted trigger
    pub run: u64,
}

impl Default for SequencerSnapshot {
    fn default() -> Self {
        Self {
            phase: SequencerPhase::Idle,
            steps: Vec::new(),
            total: None,
            run: 0,
        }
    }
}

impl SequencerSnapshot {
    pub fn is_running(&self) -> bool {
        self.phase == SequencerPhase::Running
    }

    pub fn labels(&self) -> Vec<String> {
        self.steps.iter().map(|s| s.step.step.clone()).collect()
    }
}

#[derive(Clone)]
pub struct StepSequencer {
    backend: Arc<dyn Backend>,
    cadence: AnimationConfig,
    signal: Arc<AtomicBool>,
    state: Arc<watch::Sender<SequencerSnapshot>>,
    scope: Arc<TaskScope>,
}

impl StepSequencer {
    pub fn new(backend: Arc<dyn Backend>, cadence: AnimationConfig) -> Self {
        let (state, _) = watch::channel(SequencerSnapshot::default());
        Self {
            backend,
            cadence,
            signal: Arc::new(AtomicBool::new(false)),
            state: Arc::new(state),
            scope: Arc::new(TaskScope::new()),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<SequencerSnapshot> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> SequencerSnapshot {
        self.state.borrow().clone()
    }

    /// Update the trigger signal; a false-to-true transition starts a run.
    ///
    /// Returns true when a run was started.
    pub fn set_signal(&self, value: bool) -> bool {
        let previous = self.signal.swap(value, Ordering::SeqCst);
        if value && !previous {
            return self.trigger();
        }
        false
    }

    /// Drop the signal and raise it again
    pub fn pulse(&self) -> bool {
        self.set_signal(false);
        self.set_signal(true)
    }

    fn trigger(&self) -> bool {
        let mut accepted = false;
        self.state.send_if_modified(|snapshot| {
            if snapshot.is_running() {
                return false;
            }
            snapshot.phase = SequencerPhase::Running;
            snapshot.steps.clear();
            snapshot.total = None;
            snapshot.run += 1;
            accepted = true;
            true
        });

        if !accepted {
            debug!("transformation trace already running, trigger ignored");
            return false;
        }

        // Animations from the previous run go with the list they belonged to
        self.scope.cancel_all();

        let backend = self.backend.clone();
        let state = self.state.clone();
        let cadence = self.cadence.clone();
        let scope = self.scope.downgrade();
        self.scope.spawn(async move {
            run_trace(backend, state, cadence, scope).await;
        });
        true
    }

    /// Wait until the current run (if any) has finished
    pub async fn wait_idle(&self) -> SequencerSnapshot {
        let mut rx = self.subscribe();
        let result = rx.wait_for(|s| !s.is_running()).await;
        match result {
            Ok(snapshot) => snapshot.clone(),
            Err(_) => self.snapshot(),
        }
    }
}

async fn run_trace(
    backend: Arc<dyn Backend>,
    state: Arc<watch::Sender<SequencerSnapshot>>,
    cadence: AnimationConfig,
    scope: ScopeRef,
) {
    let steps = match backend.global_waste_steps().await {
        Ok(steps) => steps,
        Err(e) => {
            warn!(error = %e, "transformation trace fetch failed");
            state.send_modify(|snapshot| {
                snapshot.phase = SequencerPhase::Idle;
                snapshot.steps.clear();
            });
            return;
        }
    };

    let total = steps.len();
    info!(steps = total, "revealing transformation trace");
    state.send_modify(|snapshot| {
        snapshot.total = Some(total);
        if total == 0 {
            snapshot.phase = SequencerPhase::Idle;
        }
    });

    let mut ticker = interval(cadence.step());
    for (index, step) in steps.into_iter().enumerate() {
        ticker.tick().await;
        let revealed = reveal_step(step, &cadence, &scope);
        state.send_modify(|snapshot| {
            snapshot.steps.push(revealed);
            if index + 1 == total {
                snapshot.phase = SequencerPhase::Idle;
            }
        });
    }
}

fn reveal_step(step: TransformationStep, cadence: &AnimationConfig, scope: &ScopeRef) -> RevealedStep {
    let (typing, description) = spawn_reveal(
        Typewriter::new(step.description.clone()),
        cadence.typewriter(),
    );
    scope.adopt(typing);

    let progress = step.rows.filter(|rows| *rows >= 1).map(|rows| {
        let (counting, frames) = spawn_reveal(ProgressSimulator::new(rows), cadence.progress());
        scope.adopt(counting);
        frames
    });

    RevealedStep {
        step,
        description,
        progress,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smartinvo_backend::Operation;
    use smartinvo_testing::assertions::{assert_progress_reaches, assert_strict_prefixes};
    use smartinvo_testing::{StubBackend, fixtures};
    use std::time::Duration;
    use tokio::time::Instant;

    fn sequencer(stub: &Arc<StubBackend>) -> StepSequencer {
        StepSequencer::new(stub.clone(), AnimationConfig::default())
    }

    /// Every distinct list of labels the sequencer publishes, in order
    async fn collect_labels(seq: &StepSequencer) -> Vec<Vec<String>> {
        let mut rx = seq.subscribe();
        let mut frames: Vec<Vec<String>> = Vec::new();
        loop {
            let snapshot = rx.borrow_and_update().clone();
            let labels = snapshot.labels();
            if !labels.is_empty() && frames.last() != Some(&labels) {
                frames.push(labels);
            }
            if !snapshot.is_running() {
                return frames;
            }
            if rx.changed().await.is_err() {
                return frames;
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_reveals_one_step_per_interval() -> anyhow::Result<()> {
        let stub = StubBackend::shared();
        stub.respond(Operation::GlobalWasteSteps, fixtures::transformation_steps());
        let seq = sequencer(&stub);

        let start = Instant::now();
        assert!(seq.set_signal(true));
        let frames = collect_labels(&seq).await;

        let full = vec![
            "load_data".to_string(),
            "filter_valid".to_string(),
            "top_waste_items".to_string(),
        ];
        assert_strict_prefixes(&frames, &full)?;
        // First step at once, then one per second
        assert_eq!(start.elapsed(), Duration::from_secs(2));

        let done = seq.snapshot();
        assert_eq!(done.phase, SequencerPhase::Idle);
        assert_eq!(done.total, Some(3));
        assert_eq!(stub.call_count(Operation::GlobalWasteSteps), 1);
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_failure_goes_idle_with_empty_list() {
        let stub = StubBackend::shared();
        stub.fail_status(Operation::GlobalWasteSteps, 500, "boom");
        let seq = sequencer(&stub);

        seq.set_signal(true);
        assert!(seq.snapshot().is_running());

        let done = seq.wait_idle().await;
        assert!(done.steps.is_empty());
        assert_eq!(done.phase, SequencerPhase::Idle);
        assert_eq!(done.run, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retrigger_while_running_is_ignored() {
        let stub = StubBackend::shared();
        stub.respond(Operation::GlobalWasteSteps, fixtures::transformation_steps());
        let seq = sequencer(&stub);

        assert!(seq.set_signal(true));
        // Holding the signal high is not an edge
        assert!(!seq.set_signal(true));
        // A fresh edge while running is ignored too
        assert!(!seq.pulse());

        let done = seq.wait_idle().await;
        assert_eq!(done.run, 1);
        assert_eq!(done.steps.len(), 3);
        assert_eq!(stub.call_count(Operation::GlobalWasteSteps), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_edge_after_idle_resets_list() {
        let stub = StubBackend::shared();
        stub.respond(Operation::GlobalWasteSteps, fixtures::transformation_steps());
        let seq = sequencer(&stub);

        seq.set_signal(true);
        seq.wait_idle().await;

        stub.respond(
            Operation::GlobalWasteSteps,
            serde_json::json!([{"step": "only", "description": "x"}]),
        );
        assert!(seq.pulse());
        let snapshot = seq.snapshot();
        assert!(snapshot.steps.is_empty());
        assert_eq!(snapshot.run, 2);

        let done = seq.wait_idle().await;
        assert_eq!(done.labels(), vec!["only".to_string()]);
        assert_eq!(stub.call_count(Operation::GlobalWasteSteps), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_trace_is_idle_immediately_after_fetch() {
        let stub = StubBackend::shared();
        stub.respond(Operation::GlobalWasteSteps, serde_json::json!([]));
        let seq = sequencer(&stub);

        seq.set_signal(true);
        let done = seq.wait_idle().await;
        assert_eq!(done.total, Some(0));
        assert!(done.steps.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_step_animations_run_to_completion() -> anyhow::Result<()> {
        let stub = StubBackend::shared();
        stub.respond(Operation::GlobalWasteSteps, fixtures::transformation_steps());
        let seq = sequencer(&stub);

        seq.set_signal(true);
        let done = seq.wait_idle().await;

        let first = &done.steps[0];
        let mut progress = first.progress.clone().expect("rows present");
        let mut values = vec![progress.borrow_and_update().current];
        while progress.changed().await.is_ok() {
            let frame = *progress.borrow_and_update();
            values.push(frame.current);
            if frame.is_complete() {
                break;
            }
        }
        assert_progress_reaches(&values, 1200)?;

        let mut description = first.description.clone();
        description
            .wait_for(|frame| frame.is_complete())
            .await
            .map_err(|_| anyhow::anyhow!("typewriter cancelled"))?;
        assert_eq!(first.description_text(), "Loaded waste records");

        // Top-list step has no simulator
        let last = &done.steps[2];
        assert!(last.progress.is_none());
        assert_eq!(last.step.top.as_ref().map(Vec::len), Some(2));
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_tears_down_animations() {
        let stub = StubBackend::shared();
        stub.respond(Operation::GlobalWasteSteps, fixtures::transformation_steps());
        let seq = sequencer(&stub);

        seq.set_signal(true);
        let done = seq.wait_idle().await;
        // Second step started a second later and is still counting
        let mut progress = done.steps[1].progress.clone().expect("rows present");
        assert!(!progress.borrow().is_complete());
        drop(done);
        drop(seq);

        // Sender went away with the aborted simulator
        while progress.changed().await.is_ok() {}
        assert!(!progress.borrow().is_complete());
    }
}
