//! Player roster for a session.
//!
//! A `Roster` is edited during Setup (add, remove) and frozen when the
//! session starts. Freezing yields a `FrozenRoster`, whose order is the
//! turn order for the rest of the session.
//!
//! Names are trimmed, limited to `MAX_NAME_LEN` characters, and unique
//! ignoring case.

mod builder;

pub use builder::{FrozenRoster, Roster, RosterError, MAX_NAME_LEN};
