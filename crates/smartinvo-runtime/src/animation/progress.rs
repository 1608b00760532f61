use super::{Animate, RevealState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressFrame {
    pub current: u64,
    pub total: u64,
}

impl ProgressFrame {
    pub fn is_complete(&self) -> bool {
        self.current >= self.total
    }

    pub fn ratio(&self) -> f64 {
        self.current as f64 / self.total.max(1) as f64
    }
}

/// Counter that advances toward a target on every tick.
///
/// The step is `max(1, total / 100)` and the counter clamps at `total`, so it
/// lands exactly on the target in at most 100 ticks plus one.
#[derive(Debug, Clone)]
pub struct ProgressSimulator {
    total: u64,
    step: u64,
    state: RevealState,
}

impl ProgressSimulator {
    /// Targets below 1 are raised to 1
    pub fn new(total: u64) -> Self {
        let total = total.max(1);
        Self {
            total,
            step: (total / 100).max(1),
            state: RevealState::Idle,
        }
    }

    pub fn step(&self) -> u64 {
        self.step
    }

    fn current(&self) -> u64 {
        match self.state {
            RevealState::Idle => 0,
            RevealState::Running(n) => n as u64,
            RevealState::Done => self.total,
        }
    }
}

impl Animate for ProgressSimulator {
    type Input = u64;
    type Frame = ProgressFrame;

    fn from_input(total: u64) -> Self {
        Self::new(total)
    }

    fn start(&mut self) {
        self.state = RevealState::Running(0);
    }

    fn tick(&mut self) {
        if let RevealState::Running(_) = self.state {
            let next = self.current().saturating_add(self.step).min(self.total);
            self.state = if next == self.total {
                RevealState::Done
            } else {
                RevealState::Running(usize::try_from(next).unwrap_or(usize::MAX))
            };
        }
    }

    fn state(&self) -> RevealState {
        self.state
    }

    fn frame(&self) -> ProgressFrame {
        ProgressFrame {
            current: self.current(),
            total: self.total,
        }
    }
}
