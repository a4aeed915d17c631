//! Card selection for a session.
//!
//! `CardPool` filters a deck by the chosen categories and draws the
//! session's `InPlaySequence` without replacement.
//!
//! ## Policies
//!
//! - **Balanced**: every selected category contributes the same number of
//!   cards, so the smallest category caps the total
//!   (`min(count per category) * categories`).
//! - **Pooled**: the selected categories are merged and drawn from freely
//!   (`|cards in any selected category|`).
//!
//! ## Shortage
//!
//! Running short is never an error. Counts are clamped, and an empty
//! selection falls back Balanced -> Pooled -> whole deck so a session
//! that passed setup always has something to play. A draw that comes up
//! short of the requested count is topped up, first from the rest of the
//! selected categories, then from the rest of the deck.

use std::collections::BTreeSet;

use im::Vector;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::deck::Deck;
use super::definition::{Card, CardId};
use crate::core::{GameRng, SamplingPolicy};

/// Where the drawn cards actually came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PoolSource {
    Balanced,
    Pooled,
    /// The selection was empty; cards came from the whole deck.
    WholeDeck,
}

/// Ordered cards chosen for one session. Never mutated after sampling.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InPlaySequence {
    cards: Vector<Card>,
    source: PoolSource,
    has_opening: bool,
}

impl InPlaySequence {
    /// Sequence with an explicit card order (fixtures, replays).
    #[must_use]
    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        let cards: Vector<Card> = cards.into_iter().collect();
        let has_opening = cards.front().is_some_and(Card::is_opening);
        Self {
            cards,
            source: PoolSource::Pooled,
            has_opening,
        }
    }

    /// Number of cards, including a prepended opening card.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Card at a position in play order.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Cards drawn from the deck, skipping the opening card.
    pub fn drawn(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter().skip(usize::from(self.has_opening))
    }

    #[must_use]
    pub fn source(&self) -> PoolSource {
        self.source
    }

    #[must_use]
    pub fn has_opening(&self) -> bool {
        self.has_opening
    }
}

/// Resolve the number of cards to play.
///
/// `requested` defaults to `ceiling_default` (the deck's configured count).
/// The result is `min(requested, max(available, floor))`, or `floor` when
/// nothing is available.
///
/// ```
/// use party_deck::cards::clamp_requested_count;
///
/// assert_eq!(clamp_requested_count(Some(30), 16, 5, 20), 16);
/// assert_eq!(clamp_requested_count(None, 50, 5, 20), 20);
/// assert_eq!(clamp_requested_count(Some(10), 0, 5, 20), 5);
/// ```
#[must_use]
pub fn clamp_requested_count(
    requested: Option<usize>,
    available: usize,
    floor: usize,
    ceiling_default: usize,
) -> usize {
    let requested = requested.unwrap_or(ceiling_default);
    if available == 0 {
        return floor;
    }
    requested.min(available.max(floor))
}

/// Filtering and sampling over one deck.
#[derive(Clone, Copy, Debug)]
pub struct CardPool<'a> {
    deck: &'a Deck,
}

impl<'a> CardPool<'a> {
    #[must_use]
    pub fn new(deck: &'a Deck) -> Self {
        Self { deck }
    }

    #[must_use]
    pub fn deck(&self) -> &'a Deck {
        self.deck
    }

    /// How many cards the policy can deliver for these categories.
    #[must_use]
    pub fn available_count(&self, categories: &[String], policy: SamplingPolicy) -> usize {
        let selected = normalize(categories);
        match policy {
            SamplingPolicy::Balanced => {
                let counts = self.deck.category_counts();
                let smallest = selected
                    .iter()
                    .map(|c| counts.get(c).copied().unwrap_or(0))
                    .min()
                    .unwrap_or(0);
                smallest * selected.len()
            }
            SamplingPolicy::Pooled => self
                .deck
                .cards
                .iter()
                .filter(|c| selected.contains(c.category.as_str()))
                .count(),
        }
    }

    /// Draw `count` distinct cards in uniformly random order.
    ///
    /// Returns fewer than `count` cards only when the whole deck is
    /// smaller. An opening card, if given, is placed first and is not
    /// counted.
    pub fn sample(
        &self,
        categories: &[String],
        count: usize,
        policy: SamplingPolicy,
        opening: Option<Card>,
        rng: &mut GameRng,
    ) -> InPlaySequence {
        let selected = normalize(categories);

        let (mut drawn, source) = match policy {
            SamplingPolicy::Balanced if self.available_count(categories, policy) > 0 => {
                (self.draw_balanced(&selected, count, rng), PoolSource::Balanced)
            }
            SamplingPolicy::Balanced => {
                warn!(
                    deck = %self.deck.title,
                    ?selected,
                    "a selected category is empty; balanced sampling falls back to pooled"
                );
                self.draw_pooled_or_all(&selected, count, rng)
            }
            SamplingPolicy::Pooled => self.draw_pooled_or_all(&selected, count, rng),
        };

        if drawn.len() < count {
            warn!(
                deck = %self.deck.title,
                ?source,
                requested = count,
                drawn = drawn.len(),
                "selection is short; topping up from the rest of the deck"
            );
            self.top_up(&mut drawn, &selected, count, rng);
        }

        if drawn.len() < count {
            warn!(
                deck = %self.deck.title,
                requested = count,
                drawn = drawn.len(),
                "deck holds fewer cards than requested"
            );
        }

        rng.shuffle(&mut drawn);

        let has_opening = opening.is_some();
        let mut cards: Vector<Card> = opening.into_iter().collect();
        cards.extend(drawn.into_iter().cloned());

        debug!(
            deck = %self.deck.title,
            ?source,
            cards = cards.len(),
            "sampled in-play sequence"
        );

        InPlaySequence {
            cards,
            source,
            has_opening,
        }
    }

    fn draw_balanced(
        &self,
        selected: &BTreeSet<&str>,
        count: usize,
        rng: &mut GameRng,
    ) -> Vec<&'a Card> {
        let groups: Vec<Vec<&'a Card>> = selected
            .iter()
            .map(|category| {
                self.deck
                    .cards
                    .iter()
                    .filter(|c| c.category == *category)
                    .collect()
            })
            .collect();

        let smallest = groups.iter().map(Vec::len).min().unwrap_or(0);
        let take = count.min(smallest * groups.len());
        let per_category = take / groups.len();

        // The remainder goes to a random subset of categories, one each.
        let remainder = take % groups.len();
        let extra: BTreeSet<usize> = rng
            .sample_indices(groups.len(), remainder)
            .into_iter()
            .collect();

        let mut drawn = Vec::with_capacity(take);
        for (i, group) in groups.iter().enumerate() {
            let n = per_category + usize::from(extra.contains(&i));
            drawn.extend(rng.sample_indices(group.len(), n).into_iter().map(|j| group[j]));
        }
        drawn
    }

    fn draw_pooled_or_all(
        &self,
        selected: &BTreeSet<&str>,
        count: usize,
        rng: &mut GameRng,
    ) -> (Vec<&'a Card>, PoolSource) {
        let filtered: Vec<&'a Card> = self
            .deck
            .cards
            .iter()
            .filter(|c| selected.contains(c.category.as_str()))
            .collect();

        if filtered.is_empty() {
            warn!(
                deck = %self.deck.title,
                ?selected,
                "no cards in the selected categories; drawing from the whole deck"
            );
            let all: Vec<&'a Card> = self.deck.cards.iter().collect();
            return (draw_from(&all, count, rng), PoolSource::WholeDeck);
        }

        (draw_from(&filtered, count, rng), PoolSource::Pooled)
    }

    /// Fill `drawn` up to `count` with unused cards, selected categories
    /// first.
    fn top_up(
        &self,
        drawn: &mut Vec<&'a Card>,
        selected: &BTreeSet<&str>,
        count: usize,
        rng: &mut GameRng,
    ) {
        let taken: FxHashSet<CardId> = drawn.iter().map(|c| c.id).collect();
        let (in_selection, outside): (Vec<&'a Card>, Vec<&'a Card>) = self
            .deck
            .cards
            .iter()
            .filter(|c| !taken.contains(&c.id))
            .partition(|c| selected.contains(c.category.as_str()));

        for spare in [in_selection, outside] {
            let missing = count.saturating_sub(drawn.len());
            if missing == 0 {
                break;
            }
            drawn.extend(draw_from(&spare, missing, rng));
        }
    }
}

fn draw_from<'a>(pool: &[&'a Card], count: usize, rng: &mut GameRng) -> Vec<&'a Card> {
    let take = count.min(pool.len());
    rng.sample_indices(pool.len(), take)
        .into_iter()
        .map(|i| pool[i])
        .collect()
}

fn normalize(categories: &[String]) -> BTreeSet<&str> {
    categories.iter().map(String::as_str).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardId;
    use rustc_hash::{FxHashMap, FxHashSet};

    /// Categories A (12 cards) and B (8 cards), plus C (3 cards).
    fn deck() -> Deck {
        let mut cards = Vec::new();
        let mut id = 0;
        for (category, n) in [("A", 12), ("B", 8), ("C", 3)] {
            for i in 0..n {
                cards.push(Card::new(CardId::new(id), format!("{category}{i}"), category));
                id += 1;
            }
        }
        Deck::new("Test", vec!["A".into(), "B".into(), "C".into()], cards, 10).unwrap()
    }

    fn cats(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_available_count_balanced() {
        let deck = deck();
        let pool = CardPool::new(&deck);
        assert_eq!(pool.available_count(&cats(&["A", "B"]), SamplingPolicy::Balanced), 16);
        assert_eq!(pool.available_count(&cats(&["A", "B", "C"]), SamplingPolicy::Balanced), 9);
        assert_eq!(pool.available_count(&cats(&["A", "Z"]), SamplingPolicy::Balanced), 0);
        assert_eq!(pool.available_count(&[], SamplingPolicy::Balanced), 0);
    }

    #[test]
    fn test_available_count_pooled() {
        let deck = deck();
        let pool = CardPool::new(&deck);
        assert_eq!(pool.available_count(&cats(&["A", "B"]), SamplingPolicy::Pooled), 20);
        assert_eq!(pool.available_count(&cats(&["A", "A"]), SamplingPolicy::Pooled), 12);
        assert_eq!(pool.available_count(&cats(&["Z"]), SamplingPolicy::Pooled), 0);
    }

    #[test]
    fn test_clamp() {
        assert_eq!(clamp_requested_count(Some(30), 16, 5, 20), 16);
        assert_eq!(clamp_requested_count(Some(8), 16, 5, 20), 8);
        assert_eq!(clamp_requested_count(Some(10), 3, 5, 20), 5);
        assert_eq!(clamp_requested_count(None, 0, 5, 20), 5);
    }

    #[test]
    fn test_balanced_sample_is_equal_per_category() {
        let deck = deck();
        let pool = CardPool::new(&deck);
        let mut rng = GameRng::new(1);

        let seq = pool.sample(&cats(&["A", "B"]), 10, SamplingPolicy::Balanced, None, &mut rng);
        assert_eq!(seq.len(), 10);
        assert_eq!(seq.source(), PoolSource::Balanced);

        let mut per: FxHashMap<&str, usize> = FxHashMap::default();
        for card in seq.iter() {
            *per.entry(card.category.as_str()).or_default() += 1;
        }
        assert_eq!(per["A"], 5);
        assert_eq!(per["B"], 5);
    }

    #[test]
    fn test_balanced_remainder_spreads_by_one() {
        let deck = deck();
        let pool = CardPool::new(&deck);
        let mut rng = GameRng::new(3);

        let seq = pool.sample(&cats(&["A", "B", "C"]), 7, SamplingPolicy::Balanced, None, &mut rng);
        assert_eq!(seq.len(), 7);
        for category in ["A", "B", "C"] {
            let n = seq.iter().filter(|c| c.category == category).count();
            assert!(n == 2 || n == 3, "category {category} got {n}");
        }
    }

    #[test]
    fn test_balanced_shortfall_topped_up_from_selection_first() {
        let deck = deck();
        let pool = CardPool::new(&deck);
        let mut rng = GameRng::new(5);

        // Balanced gives 6 (3 per category); the other 3 come from A.
        let seq = pool.sample(&cats(&["A", "C"]), 9, SamplingPolicy::Balanced, None, &mut rng);
        assert_eq!(seq.len(), 9);
        assert_eq!(seq.source(), PoolSource::Balanced);
        assert_eq!(seq.iter().filter(|c| c.category == "C").count(), 3);
        assert_eq!(seq.iter().filter(|c| c.category == "A").count(), 6);
    }

    #[test]
    fn test_top_up_reaches_outside_selection_last() {
        let deck = deck();
        let pool = CardPool::new(&deck);
        let mut rng = GameRng::new(5);

        let seq = pool.sample(&cats(&["B", "C"]), 13, SamplingPolicy::Pooled, None, &mut rng);
        assert_eq!(seq.len(), 13);
        assert_eq!(seq.iter().filter(|c| c.category == "A").count(), 2);

        let ids: FxHashSet<CardId> = seq.iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), 13);
    }

    #[test]
    fn test_sample_capped_by_deck_size() {
        let deck = deck();
        let pool = CardPool::new(&deck);
        let mut rng = GameRng::new(5);

        let seq = pool.sample(&cats(&["A", "B"]), 30, SamplingPolicy::Balanced, None, &mut rng);
        assert_eq!(seq.len(), 23);
    }

    #[test]
    fn test_empty_category_falls_back() {
        let deck = deck();
        let pool = CardPool::new(&deck);
        let mut rng = GameRng::new(5);

        let seq = pool.sample(&cats(&["A", "Z"]), 6, SamplingPolicy::Balanced, None, &mut rng);
        assert_eq!(seq.source(), PoolSource::Pooled);
        assert!(seq.iter().all(|c| c.category == "A"));

        let seq = pool.sample(&cats(&["Z"]), 6, SamplingPolicy::Pooled, None, &mut rng);
        assert_eq!(seq.source(), PoolSource::WholeDeck);
        assert_eq!(seq.len(), 6);
    }

    #[test]
    fn test_opening_card_prepended() {
        let deck = deck();
        let pool = CardPool::new(&deck);
        let mut rng = GameRng::new(5);

        let seq = pool.sample(
            &cats(&["B"]),
            4,
            SamplingPolicy::Pooled,
            Some(Card::opening("It was a dark night")),
            &mut rng,
        );
        assert_eq!(seq.len(), 5);
        assert!(seq.has_opening());
        assert!(seq.get(0).unwrap().is_opening());
        assert_eq!(seq.drawn().count(), 4);
        assert!(seq.drawn().all(|c| c.category == "B"));
    }

    #[test]
    fn test_sample_is_deterministic_per_seed() {
        let deck = deck();
        let pool = CardPool::new(&deck);
        let a = pool.sample(&cats(&["A", "B"]), 8, SamplingPolicy::Pooled, None, &mut GameRng::new(11));
        let b = pool.sample(&cats(&["A", "B"]), 8, SamplingPolicy::Pooled, None, &mut GameRng::new(11));
        assert_eq!(a, b);
    }

    #[test]
    fn test_from_cards_detects_opening() {
        let seq = InPlaySequence::from_cards(vec![
            Card::opening("Start"),
            Card::new(CardId::new(1), "x", "A"),
        ]);
        assert!(seq.has_opening());
        assert_eq!(seq.drawn().count(), 1);
    }
}
