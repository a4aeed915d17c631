//! Session engine: the phase state machine that ties a frozen roster, a
//! sampled card sequence and assigned roles together.
//!
//! ## Key Types
//!
//! - `Session`: one playthrough, driven by named transition methods
//! - `SessionPhase`: Setup, Reveal, Turn, Discussion, End
//! - `SessionView` / `SessionSummary`: read-only output for the UI
//! - `Countdown` / `TimerDriver`: logical-clock timers
//!
//! ## Errors
//!
//! Validation errors (bad names, too few players, bad special count)
//! are returned and change nothing. Contract violations panic in debug
//! builds and are rejected without effect in release builds.

mod machine;
pub mod phase;
pub mod timer;
pub mod view;

pub use machine::Session;
pub use phase::{ContractViolation, SessionError, SessionPhase};
pub use timer::{Countdown, Heat, TimerDriver};
pub use view::{CardFace, SessionSummary, SessionView, TimerView};
