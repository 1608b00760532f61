//! Timed reveal animations.
//!
//! Each animation is a plain state machine ([`Animate`]) advanced one step
//! per tick. [`Reveal`] drives a machine from a tokio interval and publishes
//! frames on a `watch` channel; the interval task is aborted on completion,
//! on input replacement and when the `Reveal` is dropped.

mod progress;
mod typewriter;

pub use progress::{ProgressFrame, ProgressSimulator};
pub use typewriter::{Typewriter, TypewriterFrame};

use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{Instant, MissedTickBehavior, interval_at};

use crate::task::TaskHandle;

/// Lifecycle of a reveal animation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealState {
    Idle,
    Running(usize),
    Done,
}

impl RevealState {
    pub fn is_done(&self) -> bool {
        matches!(self, RevealState::Done)
    }
}

/// A tick-driven animation state machine.
pub trait Animate: Send + 'static {
    /// What a restart is keyed on
    type Input: Clone + PartialEq + Send + 'static;
    /// What observers see after every tick
    type Frame: Clone + Send + Sync + 'static;

    fn from_input(input: Self::Input) -> Self;

    /// Leave `Idle`; empty inputs go straight to `Done`
    fn start(&mut self);

    /// Advance one step; no-op unless `Running`
    fn tick(&mut self);

    fn state(&self) -> RevealState;

    fn frame(&self) -> Self::Frame;
}

/// Start `machine` and advance it every `cadence` until it is done.
///
/// The first advance happens one cadence after start. The returned handle
/// aborts the timer when dropped.
pub fn spawn_reveal<A: Animate>(
    mut machine: A,
    cadence: Duration,
) -> (TaskHandle, watch::Receiver<A::Frame>) {
    machine.start();
    let (tx, rx) = watch::channel(machine.frame());

    let handle = TaskHandle::spawn(async move {
        let mut ticker = interval_at(Instant::now() + cadence, cadence);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        while !machine.state().is_done() {
            ticker.tick().await;
            machine.tick();
            if tx.send(machine.frame()).is_err() {
                // Nobody is watching anymore
                break;
            }
        }
    });

    (handle, rx)
}

/// Restartable driver for one animation.
///
/// Setting a different input restarts from scratch on a fresh channel;
/// setting the same input again keeps the running animation.
pub struct Reveal<A: Animate> {
    cadence: Duration,
    current: Option<Running<A>>,
}

struct Running<A: Animate> {
    input: A::Input,
    frames: watch::Receiver<A::Frame>,
    _task: TaskHandle,
}

impl<A: Animate> Reveal<A> {
    pub fn new(cadence: Duration) -> Self {
        Self {
            cadence,
            current: None,
        }
    }

    pub fn set_input(&mut self, input: A::Input) -> watch::Receiver<A::Frame> {
        if let Some(running) = &self.current
            && running.input == input
        {
            return running.frames.clone();
        }

        // Dropping the previous task cancels its timer before the new one starts
        self.current = None;
        let (task, frames) = spawn_reveal(A::from_input(input.clone()), self.cadence);
        self.current = Some(Running {
            input,
            frames: frames.clone(),
            _task: task,
        });
        frames
    }

    pub fn frames(&self) -> Option<watch::Receiver<A::Frame>> {
        self.current.as_ref().map(|running| running.frames.clone())
    }

    pub fn input(&self) -> Option<&A::Input> {
        self.current.as_ref().map(|running| &running.input)
    }

    /// Stop the animation and forget the input
    pub fn cancel(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smartinvo_testing::assertions::assert_typed_out;

    async fn collect(mut rx: watch::Receiver<TypewriterFrame>) -> Vec<String> {
        let mut seen = Vec::new();
        while rx.changed().await.is_ok() {
            let frame = rx.borrow_and_update().clone();
            seen.push(frame.text.clone());
            if frame.is_complete() {
                break;
            }
        }
        seen
    }

    #[tokio::test(start_paused = true)]
    async fn test_typewriter_reveals_one_char_per_tick() -> anyhow::Result<()> {
        let mut reveal = Reveal::<Typewriter>::new(Duration::from_millis(25));
        let start = Instant::now();
        let frames = collect(reveal.set_input("Loaded".to_string())).await;

        assert_typed_out(&frames, "Loaded")?;
        assert_eq!(start.elapsed(), Duration::from_millis(150));
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_input_restarts_from_empty() {
        let mut reveal = Reveal::<Typewriter>::new(Duration::from_millis(25));
        let mut first = reveal.set_input("abcdef".to_string());

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert_eq!(first.borrow_and_update().text, "ab");

        let second = reveal.set_input("xyz".to_string());
        assert_eq!(second.borrow().text, "");

        // Old channel is closed once its task is aborted
        assert!(first.changed().await.is_err());
        assert_eq!(collect(second).await, vec!["x", "xy", "xyz"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_same_input_keeps_running() {
        let mut reveal = Reveal::<Typewriter>::new(Duration::from_millis(25));
        let _first = reveal.set_input("abc".to_string());
        tokio::time::sleep(Duration::from_millis(30)).await;

        let again = reveal.set_input("abc".to_string());
        assert_eq!(again.borrow().text, "a");
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_input_is_complete_immediately() {
        let mut reveal = Reveal::<Typewriter>::new(Duration::from_millis(25));
        let rx = reveal.set_input(String::new());
        assert!(rx.borrow().is_complete());
        assert_eq!(rx.borrow().text, "");
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_timer() {
        let mut reveal = Reveal::<ProgressSimulator>::new(Duration::from_millis(20));
        let mut rx = reveal.set_input(500);
        reveal.cancel();

        assert!(rx.changed().await.is_err());
        assert_eq!(rx.borrow().current, 0);
        assert!(reveal.input().is_none());
    }
}
