//! Hidden roles: special players and the shared secret.
//!
//! ## Key Types
//!
//! - `SpecialCountRule`: per-game threshold table for the special count
//! - `RoleAssignment`: the special seats and secret of one session
//! - `HiddenInfo`: what a single player is shown on reveal
//!
//! Selection is a uniform random subset: for roster size N and special
//! count K, all C(N, K) subsets are equally likely.

pub mod assignment;
pub mod rule;

pub use assignment::{
    assign_secret_value, assign_special, HiddenInfo, RoleAssignment, RoleError, SecretWord,
    SpecialSet,
};
pub use rule::{SpecialCountRule, Tier};
