//! One-shot reveal flags.

use serde::{Deserialize, Serialize};

/// Tracks, per slot, whether hidden information has been shown.
///
/// Slots are seats in role games and cards in card games. Opening is
/// idempotent; closing is crate-private and only used when a turn is
/// re-entered through "previous".
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealGate {
    opened: Vec<bool>,
}

impl RevealGate {
    /// All slots closed.
    #[must_use]
    pub fn new(slots: usize) -> Self {
        Self {
            opened: vec![false; slots],
        }
    }

    /// Open a slot. Returns `true` if it was closed before.
    ///
    /// Out-of-range slots are ignored.
    pub fn reveal(&mut self, slot: usize) -> bool {
        match self.opened.get_mut(slot) {
            Some(open) if !*open => {
                *open = true;
                true
            }
            _ => false,
        }
    }

    #[must_use]
    pub fn is_revealed(&self, slot: usize) -> bool {
        self.opened.get(slot).copied().unwrap_or(false)
    }

    pub(crate) fn reset(&mut self, slot: usize) {
        if let Some(open) = self.opened.get_mut(slot) {
            *open = false;
        }
    }

    #[must_use]
    pub fn all_revealed(&self) -> bool {
        self.opened.iter().all(|&o| o)
    }

    #[must_use]
    pub fn revealed_count(&self) -> usize {
        self.opened.iter().filter(|&&o| o).count()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.opened.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.opened.is_empty()
    }
}
