use std::sync::atomic::{AtomicUsize, Ordering};

use crate::overlay::domain::mode::Mode;

/// Cyclic selector over [`Mode::ALL`].
///
/// Shared between the input side (which advances it) and the frame
/// processor (which reads it once per frame). Each advance is a single
/// atomic step, so readers only ever see whole transitions.
#[derive(Debug, Default)]
pub struct ModeSelector {
    index: AtomicUsize,
}

impl ModeSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(mode: Mode) -> Self {
        Self {
            index: AtomicUsize::new(mode.index()),
        }
    }

    pub fn current(&self) -> Mode {
        Mode::from_index(self.index.load(Ordering::Acquire))
    }

    /// Moves to the next mode and returns it.
    pub fn advance(&self) -> Mode {
        let previous = self
            .index
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |i| {
                Some((i + 1) % Mode::COUNT)
            })
            .unwrap_or_else(|i| i);
        Mode::from_index(previous + 1)
    }
}
