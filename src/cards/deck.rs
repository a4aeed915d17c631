//! Deck content for one game.
//!
//! A `Deck` is the read-only source of truth for cards. It is loaded
//! once (usually from bundled JSON) and shared by every session of that
//! game.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use super::definition::{Card, CardId};

/// Why a deck could not be loaded.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeckError {
    #[error("Deck JSON is malformed: {0}")]
    Parse(String),

    #[error("Deck has no cards")]
    Empty,

    #[error("Duplicate card id {0}")]
    DuplicateCardId(CardId),

    #[error("Card id {0} is reserved for opening cards")]
    ReservedCardId(CardId),
}

/// Full card set for a game.
///
/// ## Example
///
/// ```
/// use party_deck::cards::Deck;
///
/// let deck = Deck::from_json(r#"{
///     "title": "Words",
///     "availableCategories": ["Food", "Places"],
///     "cards": [
///         {"id": 1, "text": "Pizza", "category": "Food"},
///         {"id": 2, "text": "Paris", "category": "Places"}
///     ],
///     "numberOfCards": 10
/// }"#).unwrap();
///
/// assert_eq!(deck.len(), 2);
/// assert_eq!(deck.category_counts()["Food"], 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    pub title: String,

    /// Categories the setup screen offers.
    pub available_categories: Vec<String>,

    pub cards: Vec<Card>,

    /// Default card count when the players don't pick one.
    pub number_of_cards: usize,
}

impl Deck {
    /// Build a deck from parts, validating it.
    pub fn new(
        title: impl Into<String>,
        available_categories: Vec<String>,
        cards: Vec<Card>,
        number_of_cards: usize,
    ) -> Result<Self, DeckError> {
        let deck = Self {
            title: title.into(),
            available_categories,
            cards,
            number_of_cards,
        };
        deck.validate()?;
        Ok(deck)
    }

    /// Parse and validate a deck from JSON.
    pub fn from_json(json: &str) -> Result<Self, DeckError> {
        let deck: Deck =
            serde_json::from_str(json).map_err(|e| DeckError::Parse(e.to_string()))?;
        deck.validate()?;
        Ok(deck)
    }

    fn validate(&self) -> Result<(), DeckError> {
        if self.cards.is_empty() {
            return Err(DeckError::Empty);
        }

        let mut seen = FxHashSet::default();
        for card in &self.cards {
            if card.id == CardId::OPENING {
                return Err(DeckError::ReservedCardId(card.id));
            }
            if !seen.insert(card.id) {
                return Err(DeckError::DuplicateCardId(card.id));
            }
            if !self.available_categories.iter().any(|c| *c == card.category) {
                // Kept: the pooled fallback can still draw it.
                warn!(
                    deck = %self.title,
                    card = %card.id,
                    category = %card.category,
                    "card tagged with a category the deck does not offer"
                );
            }
        }
        Ok(())
    }

    /// Number of cards in the deck.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// A validated deck is never empty; kept for API symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Card count for every category present in the deck.
    #[must_use]
    pub fn category_counts(&self) -> FxHashMap<&str, usize> {
        let mut counts = FxHashMap::default();
        for card in &self.cards {
            *counts.entry(card.category.as_str()).or_insert(0) += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_cards() -> Vec<Card> {
        vec![
            Card::new(CardId::new(1), "Pizza", "Food"),
            Card::new(CardId::new(2), "Sushi", "Food"),
            Card::new(CardId::new(3), "Paris", "Places"),
        ]
    }

    #[test]
    fn test_new_and_category_counts() {
        let deck = Deck::new("Words", vec!["Food".into(), "Places".into()], sample_cards(), 10)
            .unwrap();

        assert_eq!(deck.len(), 3);

        let counts = deck.category_counts();
        assert_eq!(counts.get("Food"), Some(&2));
        assert_eq!(counts.get("Places"), Some(&1));
        assert_eq!(counts.get("Sports"), None);
    }

    #[test]
    fn test_empty_deck_rejected() {
        assert_eq!(Deck::new("None", vec![], vec![], 5), Err(DeckError::Empty));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut cards = sample_cards();
        cards.push(Card::new(CardId::new(1), "Tacos", "Food"));
        assert_eq!(
            Deck::new("Dup", vec!["Food".into()], cards, 5),
            Err(DeckError::DuplicateCardId(CardId::new(1)))
        );
    }

    #[test]
    fn test_reserved_id_rejected() {
        let cards = vec![Card::opening("Start")];
        assert!(matches!(
            Deck::new("Bad", vec![], cards, 5),
            Err(DeckError::ReservedCardId(_))
        ));
    }

    #[test]
    fn test_mistagged_card_is_kept() {
        let deck = Deck::new("Words", vec!["Food".into()], sample_cards(), 10).unwrap();
        assert_eq!(deck.category_counts()["Places"], 1);
    }

    #[test]
    fn test_malformed_json() {
        let err = Deck::from_json("{ not json").unwrap_err();
        assert!(matches!(err, DeckError::Parse(_)));
    }

    #[test]
    fn test_json_round_trip_shape() {
        let deck = Deck::new("Words", vec!["Food".into()], sample_cards(), 10).unwrap();
        let json = serde_json::to_string(&deck).unwrap();
        assert!(json.contains("availableCategories"));
        assert!(json.contains("numberOfCards"));
        assert_eq!(Deck::from_json(&json).unwrap(), deck);
    }
}
