//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::Once;

use party_deck::cards::{Card, CardId, Deck};
use party_deck::core::SessionConfig;
use party_deck::session::Session;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Install a test log subscriber once.
///
/// Level comes from `TEST_LOG`, then `RUST_LOG`, then `warn`.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

/// Deck with the given `(category, card count)` groups, ids from 0.
pub fn deck_with(groups: &[(&str, u32)]) -> Deck {
    let mut cards = Vec::new();
    let mut id = 0;
    for (category, n) in groups {
        for i in 0..*n {
            cards.push(Card::new(CardId::new(id), format!("{category} #{i}"), *category));
            id += 1;
        }
    }
    let categories = groups.iter().map(|(c, _)| c.to_string()).collect();
    Deck::new("Fixture", categories, cards, 10).unwrap()
}

/// Categories A (12 cards) and B (8 cards).
pub fn ab_deck() -> Deck {
    deck_with(&[("A", 12), ("B", 8)])
}

pub fn config(categories: &[&str]) -> SessionConfig {
    SessionConfig {
        categories: categories.iter().map(|s| s.to_string()).collect(),
        ..SessionConfig::default()
    }
}

pub fn add_players(session: &mut Session, count: usize) {
    for i in 0..count {
        session.add_player(&format!("Player {i}")).unwrap();
    }
}
