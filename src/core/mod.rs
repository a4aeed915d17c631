//! Core engine types: players, RNG, clocks, configuration.
//!
//! These are game-agnostic. Games configure the engine via `GameRules`
//! rather than modifying the session code.

pub mod clock;
pub mod config;
pub mod player;
pub mod rng;

pub use clock::{Clock, Deadline, ManualClock, SystemClock};
pub use config::{
    EngineSettings, GameRules, GameShape, SamplingPolicy, SecretPolicy, SessionConfig,
    SettingsOverride,
};
pub use player::{PlayerId, PlayerMap, PlayerState};
pub use rng::GameRng;
