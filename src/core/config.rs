//! Game and session configuration.
//!
//! Games configure the engine by providing:
//! - `GameRules`: the per-game policy values (shape, sampling, roster
//!   bounds, role rules, navigation)
//! - `SessionConfig`: what the players chose in Setup
//! - `EngineSettings`: device toggles handed to the UI
//!
//! The engine never branches on a game's name; only these values.

use serde::{Deserialize, Serialize};

use crate::roles::SpecialCountRule;

/// Which phase graph a game follows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameShape {
    /// Setup -> Turn (flip card, next/previous) -> End.
    SequentialCards,
    /// Setup -> Reveal (one player at a time) -> Discussion -> End.
    RoleReveal,
}

/// How cards are drawn from the selected categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SamplingPolicy {
    /// Equal share per category, capped by the smallest category.
    Balanced,
    /// Filter by category, then draw freely from the merged pool.
    Pooled,
}

/// Who gets to see the round's secret value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SecretPolicy {
    /// No secret in this game.
    None,
    /// Normal players share the secret; special players are told they lack it.
    SharedWithNormal {
        /// Special players are shown the secret's category.
        hint_category: bool,
    },
    /// Only special players hold the secret (e.g. a secret rule).
    HeldBySpecial,
}

/// Per-game policy values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameRules {
    /// Display name.
    pub name: String,

    pub shape: GameShape,

    pub sampling: SamplingPolicy,

    /// Smallest roster that may start a session.
    pub min_players: usize,

    /// Largest roster the setup screen accepts.
    pub max_players: usize,

    /// Clamp floor for the card count.
    pub min_cards: usize,

    /// How many special players to pick. `None` for games without roles.
    pub special_rule: Option<SpecialCountRule>,

    pub secret: SecretPolicy,

    /// "Previous" is offered during the turn loop.
    pub allow_previous: bool,

    /// Once a hidden value has been shown, "previous" is disabled.
    pub lock_back_after_reveal: bool,

    /// A starting card must be supplied in Setup (chain games).
    pub requires_opening_card: bool,

    /// Timer expiry ends the session instead of only being reported.
    pub end_on_timer_expire: bool,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            name: String::from("Untitled"),
            shape: GameShape::SequentialCards,
            sampling: SamplingPolicy::Pooled,
            min_players: 2,
            max_players: 20,
            min_cards: 5,
            special_rule: None,
            secret: SecretPolicy::None,
            allow_previous: true,
            lock_back_after_reveal: false,
            requires_opening_card: false,
            end_on_timer_expire: false,
        }
    }
}

impl GameRules {
    /// Create rules for a named game with the given shape.
    pub fn new(name: impl Into<String>, shape: GameShape) -> Self {
        Self {
            name: name.into(),
            shape,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_sampling(mut self, policy: SamplingPolicy) -> Self {
        self.sampling = policy;
        self
    }

    /// Set the roster bounds.
    #[must_use]
    pub fn with_players(mut self, min: usize, max: usize) -> Self {
        assert!(min >= 1 && min <= max, "Invalid player bounds");
        assert!(max <= 255, "At most 255 players supported");
        self.min_players = min;
        self.max_players = max;
        self
    }

    #[must_use]
    pub fn with_min_cards(mut self, floor: usize) -> Self {
        self.min_cards = floor;
        self
    }

    #[must_use]
    pub fn with_special_rule(mut self, rule: SpecialCountRule) -> Self {
        self.special_rule = Some(rule);
        self
    }

    #[must_use]
    pub fn with_secret(mut self, secret: SecretPolicy) -> Self {
        self.secret = secret;
        self
    }

    /// Disable "previous" entirely.
    #[must_use]
    pub fn forward_only(mut self) -> Self {
        self.allow_previous = false;
        self
    }

    #[must_use]
    pub fn lock_back_after_reveal(mut self) -> Self {
        self.lock_back_after_reveal = true;
        self
    }

    #[must_use]
    pub fn with_opening_card(mut self) -> Self {
        self.requires_opening_card = true;
        self
    }

    #[must_use]
    pub fn end_on_timer_expire(mut self) -> Self {
        self.end_on_timer_expire = true;
        self
    }

    /// Does this game assign hidden roles?
    #[must_use]
    pub fn has_roles(&self) -> bool {
        self.special_rule.is_some()
    }
}

/// What the players chose in Setup, besides the roster.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Selected categories. Order is irrelevant; duplicates are ignored.
    pub categories: Vec<String>,

    /// Requested card count. `None` uses the deck's default.
    pub card_count: Option<usize>,

    /// Countdown length, for timed games.
    pub timer_seconds: Option<u32>,

    /// Explicit number of special players, bypassing the rule.
    pub special_count_override: Option<usize>,

    /// Opt into the rule's boosted special count.
    pub boost_special_count: bool,

    /// Starting sentence for chain games.
    pub opening_card: Option<String>,
}

/// Device toggles passed to the UI through the session view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSettings {
    pub haptics: bool,
    pub sound: bool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            haptics: true,
            sound: true,
        }
    }
}

/// Partial settings; `None` keeps the base value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsOverride {
    pub haptics: Option<bool>,
    pub sound: Option<bool>,
}

impl EngineSettings {
    /// Apply an override on top of these settings.
    #[must_use]
    pub fn apply(self, overrides: SettingsOverride) -> Self {
        Self {
            haptics: overrides.haptics.unwrap_or(self.haptics),
            sound: overrides.sound.unwrap_or(self.sound),
        }
    }
}
