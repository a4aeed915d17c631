//! Whose turn it is.

use serde::{Deserialize, Serialize};

/// Position in a strictly sequential turn order.
///
/// The cursor never wraps. At the last slot `next` stays put and the caller
/// checks [`TurnCursor::is_finished`], which also requires the last turn's
/// action to be completed.
///
/// ```
/// use party_deck::turns::TurnCursor;
///
/// let mut cursor = TurnCursor::new(3, true);
/// assert_eq!(cursor.next(), 1);
/// assert_eq!(cursor.next(), 2);
/// assert_eq!(cursor.next(), 2);
/// assert!(!cursor.is_finished());
///
/// cursor.complete_current();
/// assert!(cursor.is_finished());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnCursor {
    current: usize,
    len: usize,
    completed: bool,
    allow_previous: bool,
    back_locked: bool,
}

impl TurnCursor {
    /// Cursor over `len` turns, starting at the first.
    #[must_use]
    pub fn new(len: usize, allow_previous: bool) -> Self {
        assert!(len > 0, "Turn order must not be empty");
        Self {
            current: 0,
            len,
            completed: false,
            allow_previous,
            back_locked: false,
        }
    }

    #[must_use]
    pub fn current(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false; a cursor has at least one turn.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.current + 1 == self.len
    }

    /// Move to the next turn, unless already on the last one.
    pub fn next(&mut self) -> usize {
        if !self.is_last() {
            self.current += 1;
            self.completed = false;
        }
        self.current
    }

    /// Is "previous" available right now?
    #[must_use]
    pub fn can_go_back(&self) -> bool {
        self.allow_previous && !self.back_locked && self.current > 0
    }

    /// Move back one turn. The re-entered turn starts over as not completed.
    ///
    /// Does nothing when [`can_go_back`](Self::can_go_back) is false.
    pub fn previous(&mut self) -> usize {
        if self.can_go_back() {
            self.current -= 1;
            self.completed = false;
        }
        self.current
    }

    /// Record that the current turn's action happened.
    pub fn complete_current(&mut self) {
        self.completed = true;
    }

    #[must_use]
    pub fn is_current_complete(&self) -> bool {
        self.completed
    }

    /// Disable "previous" for the rest of the session.
    pub fn lock_back(&mut self) {
        self.back_locked = true;
    }

    /// Last turn reached and its action completed.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.is_last() && self.completed
    }
}
