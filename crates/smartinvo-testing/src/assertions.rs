//! Assertions over revealed frame sequences.

use anyhow::Result;

/// Every frame must be a prefix of the next, each growing by exactly one
/// element, ending at `full`.
pub fn assert_strict_prefixes<T: PartialEq + std::fmt::Debug>(
    frames: &[Vec<T>],
    full: &[T],
) -> Result<()> {
    for (i, frame) in frames.iter().enumerate() {
        if frame.len() != i + 1 {
            anyhow::bail!("Frame {} has {} elements, expected {}", i, frame.len(), i + 1);
        }
        if frame.as_slice() != &full[..frame.len().min(full.len())] {
            anyhow::bail!("Frame {} is not a prefix of the full sequence: {:?}", i, frame);
        }
    }

    if frames.len() != full.len() {
        anyhow::bail!("Expected {} frames, got {}", full.len(), frames.len());
    }

    Ok(())
}

/// Typewriter frames grow one character at a time and end at `text`.
pub fn assert_typed_out(frames: &[String], text: &str) -> Result<()> {
    let chars: Vec<char> = text.chars().collect();
    let as_chars: Vec<Vec<char>> = frames.iter().map(|f| f.chars().collect()).collect();
    assert_strict_prefixes(&as_chars, &chars)
}

/// Progress values never decrease, never pass `total`, and end exactly at it.
pub fn assert_progress_reaches(values: &[u64], total: u64) -> Result<()> {
    for pair in values.windows(2) {
        if pair[1] < pair[0] {
            anyhow::bail!("Progress went backwards: {} -> {}", pair[0], pair[1]);
        }
    }

    if let Some(over) = values.iter().find(|v| **v > total) {
        anyhow::bail!("Progress {} exceeds total {}", over, total);
    }

    match values.last() {
        Some(last) if *last == total => Ok(()),
        Some(last) => anyhow::bail!("Progress ended at {} instead of {}", last, total),
        None => anyhow::bail!("No progress frames observed"),
    }
}
