//! Card definitions - immutable deck content.
//!
//! A `Card` is a prompt, word or rule tagged with a category. Cards are
//! never modified once a deck is loaded; sessions hold them by value in
//! an `InPlaySequence`.

use serde::{Deserialize, Serialize};

/// Unique identifier for a card within its deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Reserved id for a starting card supplied at Setup.
    ///
    /// Never present in a deck; never drawn from a pool.
    pub const OPENING: CardId = CardId(u32::MAX);

    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// One piece of deck content.
///
/// ```
/// use party_deck::cards::{Card, CardId};
///
/// let card = Card::new(CardId::new(1), "Volcano", "Places").with_type("word");
/// assert_eq!(card.category, "Places");
/// assert_eq!(card.card_type.as_deref(), Some("word"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,

    /// Face content: the prompt, word or rule.
    pub text: String,

    /// Free-form category label.
    pub category: String,

    /// Optional game-specific subtype (e.g. "truth" / "dare").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_type: Option<String>,
}

impl Card {
    /// Create a new card.
    #[must_use]
    pub fn new(id: CardId, text: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            category: category.into(),
            card_type: None,
        }
    }

    /// Set the card type (builder pattern).
    #[must_use]
    pub fn with_type(mut self, card_type: impl Into<String>) -> Self {
        self.card_type = Some(card_type.into());
        self
    }

    /// Build the starting card for a chain game.
    #[must_use]
    pub fn opening(text: impl Into<String>) -> Self {
        Self::new(CardId::OPENING, text, "")
    }

    /// Is this a supplied starting card rather than deck content?
    #[must_use]
    pub fn is_opening(&self) -> bool {
        self.id == CardId::OPENING
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_id() {
        let id = CardId::new(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(format!("{}", id), "Card(42)");
    }

    #[test]
    fn test_opening_card() {
        let card = Card::opening("Once upon a time");
        assert!(card.is_opening());
        assert!(!Card::new(CardId::new(0), "x", "y").is_opening());
    }

    #[test]
    fn test_card_json_shape() {
        let json = r#"{"id": 3, "text": "Sing a song", "category": "Party", "cardType": "dare"}"#;
        let card: Card = serde_json::from_str(json).unwrap();
        assert_eq!(card.id, CardId::new(3));
        assert_eq!(card.card_type.as_deref(), Some("dare"));

        let plain: Card =
            serde_json::from_str(r#"{"id": 4, "text": "Why?", "category": "Deep"}"#).unwrap();
        assert_eq!(plain.card_type, None);
        assert!(!serde_json::to_string(&plain).unwrap().contains("cardType"));
    }
}
