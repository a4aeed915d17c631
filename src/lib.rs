//! # party-deck
//!
//! Session engine for local, pass-the-device party games.
//!
//! ## Design Principles
//!
//! 1. **UI-Agnostic**: No rendering, navigation or persistence. A UI feeds
//!    player input in and draws `SessionView` snapshots out.
//!
//! 2. **One Engine, Many Games**: Card sampling, turn rotation and role
//!    assignment are shared. Games differ only in `GameRules` values
//!    (balanced vs pooled sampling, special-count thresholds, whether
//!    "previous" is allowed).
//!
//! 3. **Explicit State Machine**: Every phase change is a named method on
//!    `Session`. Hidden information is gated per player so nobody sees
//!    it before it is their turn.
//!
//! ## Determinism
//!
//! All randomness comes from a seeded `GameRng`; time comes from an
//! injected `Clock`. A session is reproducible from its seed and inputs.
//!
//! ## Modules
//!
//! - `core`: Player ids, RNG, clocks, configuration
//! - `cards`: Cards, decks, category sampling
//! - `roster`: Player list editing and freezing
//! - `roles`: Special players and the shared secret
//! - `turns`: Turn cursor and reveal gate
//! - `session`: Phase state machine, timers, views
//! - `games`: Ready-made rule sets

pub mod cards;
pub mod core;
pub mod games;
pub mod roles;
pub mod roster;
pub mod session;
pub mod turns;

// Re-export commonly used types
pub use crate::core::{
    Clock, EngineSettings, GameRng, GameRules, GameShape, ManualClock, PlayerId, PlayerMap,
    PlayerState, SamplingPolicy, SecretPolicy, SessionConfig, SettingsOverride, SystemClock,
};

pub use crate::cards::{
    clamp_requested_count, Card, CardId, CardPool, Deck, DeckError, InPlaySequence, PoolSource,
};

pub use crate::roster::{FrozenRoster, Roster, RosterError};

pub use crate::roles::{
    assign_secret_value, assign_special, HiddenInfo, RoleAssignment, RoleError, SecretWord,
    SpecialCountRule,
};

pub use crate::turns::{RevealGate, TurnCursor};

pub use crate::session::{
    ContractViolation, Countdown, Heat, Session, SessionError, SessionPhase, SessionSummary,
    SessionView, TimerDriver,
};
