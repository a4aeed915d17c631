//! How many special players a roster gets.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// One step of a special-count table: rosters of at least `min_players`
/// get `count` special players.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tier {
    pub min_players: usize,
    pub count: usize,
}

/// Threshold table mapping roster size to a special-player count.
///
/// The highest tier whose `min_players` the roster reaches wins. An
/// optional boost tier applies only when the players opt in.
///
/// ```
/// use party_deck::roles::SpecialCountRule;
///
/// let rule = SpecialCountRule::standard();
/// assert_eq!(rule.special_count(5, false), 1);
/// assert_eq!(rule.special_count(7, false), 2);
/// assert_eq!(rule.special_count(4, true), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpecialCountRule {
    base: usize,
    tiers: SmallVec<[Tier; 4]>,
    boost: Option<Tier>,
}

impl SpecialCountRule {
    /// Always `count` special players.
    #[must_use]
    pub fn fixed(count: usize) -> Self {
        Self {
            base: count,
            tiers: SmallVec::new(),
            boost: None,
        }
    }

    /// One special player, two from six players, and an opt-in two from four.
    #[must_use]
    pub fn standard() -> Self {
        Self::fixed(1).with_tier(6, 2).with_boost(4, 2)
    }

    /// Add a tier. Tiers are kept sorted by `min_players`.
    #[must_use]
    pub fn with_tier(mut self, min_players: usize, count: usize) -> Self {
        self.tiers.push(Tier { min_players, count });
        self.tiers.sort_by_key(|t| t.min_players);
        self
    }

    /// Set the opt-in boost tier.
    #[must_use]
    pub fn with_boost(mut self, min_players: usize, count: usize) -> Self {
        self.boost = Some(Tier { min_players, count });
        self
    }

    #[must_use]
    pub fn base(&self) -> usize {
        self.base
    }

    #[must_use]
    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    #[must_use]
    pub fn boost(&self) -> Option<Tier> {
        self.boost
    }

    /// Can the boost apply to a roster of this size?
    #[must_use]
    pub fn boost_available(&self, roster_size: usize) -> bool {
        self.boost.is_some_and(|b| roster_size >= b.min_players)
    }

    /// Special-player count for a roster size.
    #[must_use]
    pub fn special_count(&self, roster_size: usize, boosted: bool) -> usize {
        let from_tiers = self
            .tiers
            .iter()
            .rev()
            .find(|t| roster_size >= t.min_players)
            .map_or(self.base, |t| t.count);

        match self.boost {
            Some(b) if boosted && roster_size >= b.min_players => from_tiers.max(b.count),
            _ => from_tiers,
        }
    }
}

impl Default for SpecialCountRule {
    fn default() -> Self {
        Self::standard()
    }
}
