//! Card system: definitions, decks, and session sampling.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier for a card within its deck
//! - `Card`: Immutable content tagged with a category
//! - `Deck`: A game's full card set, loaded from JSON
//! - `CardPool`: Category filtering and sampling without replacement
//! - `InPlaySequence`: The ordered cards chosen for one session

pub mod deck;
pub mod definition;
pub mod pool;

pub use deck::{Deck, DeckError};
pub use definition::{Card, CardId};
pub use pool::{clamp_requested_count, CardPool, InPlaySequence, PoolSource};
