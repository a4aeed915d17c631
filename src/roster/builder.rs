//! Roster editing and freezing.

use im::Vector;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::core::PlayerId;

/// Longest accepted player name, in characters.
pub const MAX_NAME_LEN: usize = 30;

/// Why a roster edit was rejected. The roster is unchanged in every case.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RosterError {
    #[error("Player name is empty")]
    EmptyName,

    #[error("Player name is {len} characters, max is {max}")]
    NameTooLong { len: usize, max: usize },

    #[error("A player named {0:?} is already in the roster")]
    DuplicateName(String),

    #[error("Roster is full ({max} players)")]
    RosterFull { max: usize },

    #[error("Need at least {min} players, have {have}")]
    TooFewPlayers { have: usize, min: usize },

    #[error("Roster is frozen")]
    Frozen,

    #[error("No player at position {0}")]
    NoSuchPlayer(usize),
}

/// Player list being assembled during Setup.
///
/// ```
/// use party_deck::roster::{Roster, RosterError};
///
/// let mut roster = Roster::new(2, 4);
/// roster.add("  Sam ").unwrap();
/// assert_eq!(roster.add("sam"), Err(RosterError::DuplicateName("sam".into())));
/// roster.add("Alex").unwrap();
///
/// let frozen = roster.freeze().unwrap();
/// assert_eq!(frozen.names().collect::<Vec<_>>(), vec!["Sam", "Alex"]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Roster {
    names: Vec<String>,
    min: usize,
    max: usize,
    frozen: bool,
}

impl Roster {
    /// Empty roster accepting between `min` and `max` players.
    #[must_use]
    pub fn new(min: usize, max: usize) -> Self {
        assert!(min <= max, "Invalid roster bounds");
        assert!(max <= 255, "At most 255 players supported");
        Self {
            names: Vec::new(),
            min,
            max,
            frozen: false,
        }
    }

    /// Add a player. Surrounding whitespace is trimmed first.
    ///
    /// Returns the new player's position.
    pub fn add(&mut self, name: &str) -> Result<usize, RosterError> {
        if self.frozen {
            return Err(RosterError::Frozen);
        }

        let name = name.trim();
        if name.is_empty() {
            return Err(RosterError::EmptyName);
        }

        let len = name.chars().count();
        if len > MAX_NAME_LEN {
            return Err(RosterError::NameTooLong {
                len,
                max: MAX_NAME_LEN,
            });
        }

        let folded = name.to_lowercase();
        if self.names.iter().any(|n| n.to_lowercase() == folded) {
            return Err(RosterError::DuplicateName(name.to_string()));
        }

        if self.names.len() >= self.max {
            return Err(RosterError::RosterFull { max: self.max });
        }

        self.names.push(name.to_string());
        Ok(self.names.len() - 1)
    }

    /// Remove the player at `index`, shifting later players up.
    pub fn remove(&mut self, index: usize) -> Result<String, RosterError> {
        if self.frozen {
            return Err(RosterError::Frozen);
        }
        if index >= self.names.len() {
            return Err(RosterError::NoSuchPlayer(index));
        }
        Ok(self.names.remove(index))
    }

    /// Lock the roster and hand out its final order.
    pub fn freeze(&mut self) -> Result<FrozenRoster, RosterError> {
        if self.frozen {
            return Err(RosterError::Frozen);
        }
        if self.names.len() < self.min {
            return Err(RosterError::TooFewPlayers {
                have: self.names.len(),
                min: self.min,
            });
        }

        self.frozen = true;
        debug!(players = self.names.len(), "roster frozen");

        Ok(FrozenRoster {
            names: self.names.iter().cloned().collect(),
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    #[must_use]
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Would `freeze` succeed right now?
    #[must_use]
    pub fn is_ready(&self) -> bool {
        !self.frozen && self.names.len() >= self.min
    }

    #[must_use]
    pub fn min(&self) -> usize {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> usize {
        self.max
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

/// Immutable, ordered player list of a started session.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrozenRoster {
    names: Vector<String>,
}

impl FrozenRoster {
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Name of the player in a seat.
    #[must_use]
    pub fn name(&self, player: PlayerId) -> Option<&str> {
        self.names.get(player.index()).map(String::as_str)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Seats in turn order.
    pub fn players(&self) -> impl Iterator<Item = PlayerId> {
        PlayerId::all(self.names.len())
    }
}
