use crate::core::{GameRules, GameShape, SamplingPolicy, SecretPolicy};
use crate::roles::SpecialCountRule;

/// Everyone but the impostors gets the secret word; impostors see its
/// category. Two impostors from six players, or from four on request.
#[must_use]
pub fn word_impostor() -> GameRules {
    GameRules::new("Word Impostor", GameShape::RoleReveal)
        .with_players(3, 12)
        .with_sampling(SamplingPolicy::Pooled)
        .with_special_rule(SpecialCountRule::standard())
        .with_secret(SecretPolicy::SharedWithNormal {
            hint_category: true,
        })
        .forward_only()
}

/// One player secretly follows a rule card; the rest try to spot it.
#[must_use]
pub fn secret_rule() -> GameRules {
    GameRules::new("Secret Rule", GameShape::RoleReveal)
        .with_players(3, 12)
        .with_sampling(SamplingPolicy::Pooled)
        .with_special_rule(SpecialCountRule::fixed(1))
        .with_secret(SecretPolicy::HeldBySpecial)
        .forward_only()
}

/// Question cards passed around the group, equal share per category.
#[must_use]
pub fn question_cards() -> GameRules {
    GameRules::new("Question Cards", GameShape::SequentialCards)
        .with_players(2, 20)
        .with_sampling(SamplingPolicy::Balanced)
        .with_min_cards(5)
}

/// Players continue a story from a starting sentence, one prompt each.
#[must_use]
pub fn story_chain() -> GameRules {
    GameRules::new("Story Chain", GameShape::SequentialCards)
        .with_players(2, 20)
        .with_sampling(SamplingPolicy::Pooled)
        .with_min_cards(3)
        .with_opening_card()
        .forward_only()
        .end_on_timer_expire()
}
