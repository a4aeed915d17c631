//! Choosing special players and the round's secret.
//!
//! Both choices are made once, when the session starts, and are fixed for
//! the rest of the session.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;
use tracing::debug;

use crate::cards::{CardId, InPlaySequence};
use crate::core::{GameRng, PlayerId, SecretPolicy};

/// Why roles could not be assigned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RoleError {
    /// At least one special and one normal player are required.
    #[error("Cannot pick {requested} special players from a roster of {roster}")]
    InvalidSpecialCount { requested: usize, roster: usize },

    #[error("No cards to draw a secret from")]
    EmptySecretPool,
}

/// Seats holding the special role, in seat order.
pub type SpecialSet = SmallVec<[PlayerId; 4]>;

/// The shared secret of a round.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SecretWord {
    pub word: String,
    pub category: String,
    /// Card the secret was drawn from.
    pub card: CardId,
}

/// What one player is shown when they look at the device.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HiddenInfo {
    /// The player holds the secret.
    Secret(SecretWord),
    /// The player is special and does not get the secret.
    Unknown { category_hint: Option<String> },
    /// The player is special; the game has no secret.
    Special,
    /// The player is an ordinary player with nothing to hold.
    Normal,
}

/// Pick `special_count` seats out of `roster_size`.
///
/// Every subset of that size is equally likely.
pub fn assign_special(
    roster_size: usize,
    special_count: usize,
    rng: &mut GameRng,
) -> Result<SpecialSet, RoleError> {
    if special_count < 1 || special_count >= roster_size {
        return Err(RoleError::InvalidSpecialCount {
            requested: special_count,
            roster: roster_size,
        });
    }

    let mut picked: SpecialSet = rng
        .sample_indices(roster_size, special_count)
        .into_iter()
        .map(PlayerId::from_index)
        .collect();
    picked.sort_unstable();
    Ok(picked)
}

/// Pick the round's secret uniformly from the drawn cards.
///
/// An opening card is never chosen.
pub fn assign_secret_value(
    pool: &InPlaySequence,
    rng: &mut GameRng,
) -> Result<SecretWord, RoleError> {
    let drawn: Vec<_> = pool.drawn().collect();
    let card = rng.choose(&drawn).ok_or(RoleError::EmptySecretPool)?;

    Ok(SecretWord {
        word: card.text.clone(),
        category: card.category.clone(),
        card: card.id,
    })
}

/// Hidden roles of one session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAssignment {
    special: SpecialSet,
    secret: Option<SecretWord>,
    policy: SecretPolicy,
}

impl RoleAssignment {
    /// Assign special seats and, if the policy has one, the secret.
    pub fn compute(
        roster_size: usize,
        special_count: usize,
        policy: SecretPolicy,
        pool: &InPlaySequence,
        rng: &mut GameRng,
    ) -> Result<Self, RoleError> {
        let special = assign_special(roster_size, special_count, rng)?;

        let secret = match policy {
            SecretPolicy::None => None,
            SecretPolicy::SharedWithNormal { .. } | SecretPolicy::HeldBySpecial => {
                Some(assign_secret_value(pool, rng)?)
            }
        };

        debug!(
            roster = roster_size,
            special = special.len(),
            has_secret = secret.is_some(),
            "roles assigned"
        );

        Ok(Self {
            special,
            secret,
            policy,
        })
    }

    #[must_use]
    pub fn is_special(&self, player: PlayerId) -> bool {
        self.special.contains(&player)
    }

    #[must_use]
    pub fn special_players(&self) -> &[PlayerId] {
        &self.special
    }

    #[must_use]
    pub fn secret(&self) -> Option<&SecretWord> {
        self.secret.as_ref()
    }

    /// What `player` sees on their reveal screen.
    #[must_use]
    pub fn hidden_info(&self, player: PlayerId) -> HiddenInfo {
        let special = self.is_special(player);

        match (&self.policy, &self.secret) {
            (SecretPolicy::SharedWithNormal { hint_category }, Some(secret)) => {
                if special {
                    HiddenInfo::Unknown {
                        category_hint: hint_category.then(|| secret.category.clone()),
                    }
                } else {
                    HiddenInfo::Secret(secret.clone())
                }
            }
            (SecretPolicy::HeldBySpecial, Some(secret)) if special => {
                HiddenInfo::Secret(secret.clone())
            }
            _ if special => HiddenInfo::Special,
            _ => HiddenInfo::Normal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Card;

    fn pool() -> InPlaySequence {
        InPlaySequence::from_cards(vec![
            Card::new(CardId::new(1), "Pizza", "Food"),
            Card::new(CardId::new(2), "Paris", "Places"),
        ])
    }

    #[test]
    fn test_assign_special_bounds() {
        let mut rng = GameRng::new(1);
        assert_eq!(
            assign_special(5, 0, &mut rng),
            Err(RoleError::InvalidSpecialCount { requested: 0, roster: 5 })
        );
        assert_eq!(
            assign_special(3, 3, &mut rng),
            Err(RoleError::InvalidSpecialCount { requested: 3, roster: 3 })
        );

        let picked = assign_special(6, 2, &mut rng).unwrap();
        assert_eq!(picked.len(), 2);
        assert!(picked[0] < picked[1]);
        assert!(picked.iter().all(|p| p.index() < 6));
    }

    #[test]
    fn test_secret_skips_opening_card() {
        let seq = InPlaySequence::from_cards(vec![
            Card::opening("Start"),
            Card::new(CardId::new(7), "Moon", "Space"),
        ]);
        for seed in 0..20 {
            let secret = assign_secret_value(&seq, &mut GameRng::new(seed)).unwrap();
            assert_eq!(secret.card, CardId::new(7));
        }
    }

    #[test]
    fn test_secret_needs_cards() {
        let empty = InPlaySequence::from_cards(Vec::new());
        assert_eq!(
            assign_secret_value(&empty, &mut GameRng::new(1)),
            Err(RoleError::EmptySecretPool)
        );
    }

    #[test]
    fn test_hidden_info_shared_with_normal() {
        let roles = RoleAssignment::compute(
            4,
            1,
            SecretPolicy::SharedWithNormal { hint_category: true },
            &pool(),
            &mut GameRng::new(3),
        )
        .unwrap();

        let secret = roles.secret().cloned().unwrap();
        for player in PlayerId::all(4) {
            let info = roles.hidden_info(player);
            if roles.is_special(player) {
                assert_eq!(
                    info,
                    HiddenInfo::Unknown {
                        category_hint: Some(secret.category.clone())
                    }
                );
            } else {
                assert_eq!(info, HiddenInfo::Secret(secret.clone()));
            }
        }
    }

    #[test]
    fn test_hidden_info_held_by_special() {
        let roles = RoleAssignment::compute(
            3,
            1,
            SecretPolicy::HeldBySpecial,
            &pool(),
            &mut GameRng::new(3),
        )
        .unwrap();

        let holder = roles.special_players()[0];
        assert!(matches!(roles.hidden_info(holder), HiddenInfo::Secret(_)));
        for player in PlayerId::all(3).filter(|p| *p != holder) {
            assert_eq!(roles.hidden_info(player), HiddenInfo::Normal);
        }
    }

    #[test]
    fn test_hidden_info_without_secret() {
        let roles =
            RoleAssignment::compute(3, 1, SecretPolicy::None, &pool(), &mut GameRng::new(3))
                .unwrap();
        assert!(roles.secret().is_none());
        let holder = roles.special_players()[0];
        assert_eq!(roles.hidden_info(holder), HiddenInfo::Special);
    }
}
