//! Turn sequencing and reveal gating.
//!
//! - `TurnCursor`: strictly sequential position, optional "previous",
//!   completion-aware end detection
//! - `RevealGate`: per-slot one-shot "has seen it" flags
//!
//! Special players are visited in the same order as everyone else;
//! roles change what is shown, never when.

pub mod cursor;
pub mod gate;

pub use cursor::TurnCursor;
pub use gate::RevealGate;
