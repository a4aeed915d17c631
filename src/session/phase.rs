//! Session phases and the errors a session operation can return.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

use crate::roles::RoleError;
use crate::roster::RosterError;

/// Top-level state of a session. Exactly one is active at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Collecting players and options.
    Setup,
    /// Players look at their hidden role one at a time.
    Reveal,
    /// Cards are played one at a time.
    Turn,
    /// Free talk before the truth comes out.
    Discussion,
    /// Terminal; only inspection is allowed.
    End,
}

impl SessionPhase {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        self == SessionPhase::End
    }

    /// Phases driven by the turn cursor.
    #[must_use]
    pub fn is_turn_loop(self) -> bool {
        matches!(self, SessionPhase::Reveal | SessionPhase::Turn)
    }
}

/// A caller asked for something legitimate input can never produce.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContractViolation {
    #[error("{action} is not allowed during {phase:?}")]
    WrongPhase {
        action: &'static str,
        phase: SessionPhase,
    },

    #[error("slot {slot} has not been revealed yet")]
    RevealPending { slot: usize },

    #[error("roles are already assigned")]
    RolesAlreadyAssigned,

    #[error("already on the last turn")]
    PastFinished,

    #[error("the last turn has not been completed")]
    NotFinished,

    #[error("going back is not available here")]
    BacktrackForbidden,
}

/// Error returned by session operations.
///
/// Everything except `Contract` is a validation error: the session is
/// unchanged and the UI should keep its action disabled.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error(transparent)]
    Roster(#[from] RosterError),

    #[error(transparent)]
    Role(#[from] RoleError),

    #[error("No categories selected")]
    NoCategoriesSelected,

    #[error("This game needs an opening card")]
    MissingOpeningCard,

    #[error("Contract violation: {0}")]
    Contract(ContractViolation),
}

/// Reject a contract violation.
///
/// Panics in debug builds. Release builds log and return the error
/// without touching the session.
pub(crate) fn violation<T>(v: ContractViolation) -> Result<T, SessionError> {
    error!(violation = %v, "session contract violated");
    if cfg!(debug_assertions) {
        panic!("session contract violated: {v}");
    }
    Err(SessionError::Contract(v))
}
