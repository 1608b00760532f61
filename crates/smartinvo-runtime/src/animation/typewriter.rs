use super::{Animate, RevealState};

/// Growing prefix of the text being typed out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypewriterFrame {
    pub text: String,
    pub revealed: usize,
    pub total: usize,
}

impl TypewriterFrame {
    pub fn is_complete(&self) -> bool {
        self.revealed >= self.total
    }
}

/// Reveals a string one character (Unicode scalar) per tick.
#[derive(Debug, Clone)]
pub struct Typewriter {
    text: String,
    /// Byte offset just past each character
    ends: Vec<usize>,
    state: RevealState,
}

impl Typewriter {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let ends = text
            .char_indices()
            .map(|(offset, ch)| offset + ch.len_utf8())
            .collect();
        Self {
            text,
            ends,
            state: RevealState::Idle,
        }
    }

    fn revealed(&self) -> usize {
        match self.state {
            RevealState::Idle => 0,
            RevealState::Running(n) => n,
            RevealState::Done => self.ends.len(),
        }
    }
}

impl Animate for Typewriter {
    type Input = String;
    type Frame = TypewriterFrame;

    fn from_input(input: String) -> Self {
        Self::new(input)
    }

    fn start(&mut self) {
        self.state = if self.ends.is_empty() {
            RevealState::Done
        } else {
            RevealState::Running(0)
        };
    }

    fn tick(&mut self) {
        if let RevealState::Running(n) = self.state {
            let next = n + 1;
            self.state = if next >= self.ends.len() {
                RevealState::Done
            } else {
                RevealState::Running(next)
            };
        }
    }

    fn state(&self) -> RevealState {
        self.state
    }

    fn frame(&self) -> TypewriterFrame {
        let revealed = self.revealed();
        let end = match revealed {
            0 => 0,
            n => self.ends[n - 1],
        };
        TypewriterFrame {
            text: self.text[..end].to_string(),
            revealed,
            total: self.ends.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_characters_not_bytes() {
        let mut machine = Typewriter::new("héllo");
        machine.start();
        machine.tick();
        machine.tick();
        assert_eq!(machine.frame().text, "hé");
        assert_eq!(machine.frame().total, 5);
    }

    #[test]
    fn test_done_after_last_char() {
        let mut machine = Typewriter::new("ok");
        assert_eq!(machine.state(), RevealState::Idle);
        machine.start();
        assert_eq!(machine.state(), RevealState::Running(0));
        machine.tick();
        machine.tick();
        assert_eq!(machine.state(), RevealState::Done);

        machine.tick();
        assert_eq!(machine.frame().text, "ok");
        assert!(machine.frame().is_complete());
    }
}
