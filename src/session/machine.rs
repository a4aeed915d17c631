//! The per-game session state machine.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::phase::{violation, ContractViolation, SessionError, SessionPhase};
use super::timer::Countdown;
use super::view::{CardFace, SessionSummary, SessionView, TimerView};
use crate::cards::{clamp_requested_count, Card, CardPool, Deck, InPlaySequence};
use crate::core::{
    EngineSettings, GameRng, GameRules, GameShape, PlayerId, PlayerMap, PlayerState,
    SessionConfig,
};
use crate::roles::{HiddenInfo, RoleAssignment, RoleError};
use crate::roster::{FrozenRoster, Roster, RosterError};
use crate::turns::{RevealGate, TurnCursor};

/// Everything fixed at `start`, plus the turn-loop state.
#[derive(Clone, Debug)]
struct Play {
    players: FrozenRoster,
    sequence: InPlaySequence,
    roles: Option<RoleAssignment>,
    cursor: TurnCursor,
    gate: RevealGate,
    face_up: bool,
    scores: PlayerMap<u32>,
    scored: Vec<bool>,
}

impl Play {
    /// Seat acting on the current turn.
    fn current_player(&self, shape: GameShape) -> PlayerId {
        let index = self.cursor.current();
        match shape {
            GameShape::RoleReveal => PlayerId::from_index(index),
            GameShape::SequentialCards => PlayerId::from_index(index % self.players.len()),
        }
    }
}

/// One playthrough of one game.
///
/// ## Lifecycle
///
/// ```text
/// Setup --start--> Reveal --begin_discussion--> Discussion --reveal_truth--> End
/// Setup --start--> Turn   --finish--------------------------------------> End
/// ```
///
/// Every transition is a named method. Validation failures return an
/// error and leave the session untouched; contract violations (skipping a
/// reveal, starting twice, advancing past the end) panic in debug builds.
///
/// ## Example
///
/// ```
/// use party_deck::cards::{Card, CardId, Deck};
/// use party_deck::core::SessionConfig;
/// use party_deck::games;
/// use party_deck::session::{Session, SessionPhase};
///
/// let cards = (0..6)
///     .map(|i| Card::new(CardId::new(i), format!("Word {i}"), "Things"))
///     .collect();
/// let deck = Deck::new("Words", vec!["Things".into()], cards, 6).unwrap();
///
/// let mut session = Session::new(games::word_impostor(), deck, 42);
/// for name in ["Ana", "Ben", "Cleo"] {
///     session.add_player(name).unwrap();
/// }
/// session
///     .configure(SessionConfig {
///         categories: vec!["Things".into()],
///         ..SessionConfig::default()
///     })
///     .unwrap();
///
/// assert_eq!(session.start().unwrap(), SessionPhase::Reveal);
/// for _ in 0..3 {
///     session.reveal_current().unwrap();
///     if session.can_advance() {
///         session.advance().unwrap();
///     }
/// }
/// session.begin_discussion().unwrap();
/// let summary = session.reveal_truth().unwrap();
/// assert_eq!(summary.special_players.len(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct Session {
    rules: Arc<GameRules>,
    deck: Arc<Deck>,
    settings: EngineSettings,
    config: SessionConfig,
    phase: SessionPhase,
    roster: Roster,
    rng: GameRng,
    play: Option<Play>,
    countdown: Option<Countdown>,
    timer_expired: bool,
    moves: u32,
    elapsed: Duration,
}

impl Session {
    /// New session in Setup with default settings.
    pub fn new(rules: impl Into<Arc<GameRules>>, deck: impl Into<Arc<Deck>>, seed: u64) -> Self {
        Self::with_settings(rules, deck, EngineSettings::default(), seed)
    }

    /// New session in Setup with injected device settings.
    pub fn with_settings(
        rules: impl Into<Arc<GameRules>>,
        deck: impl Into<Arc<Deck>>,
        settings: EngineSettings,
        seed: u64,
    ) -> Self {
        let rules = rules.into();
        let roster = Roster::new(rules.min_players, rules.max_players);
        Self {
            rules,
            deck: deck.into(),
            settings,
            config: SessionConfig::default(),
            phase: SessionPhase::Setup,
            roster,
            rng: GameRng::new(seed),
            play: None,
            countdown: None,
            timer_expired: false,
            moves: 0,
            elapsed: Duration::ZERO,
        }
    }

    // === Inspection ===

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    #[must_use]
    pub fn settings(&self) -> EngineSettings {
        self.settings
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Cards chosen at start.
    #[must_use]
    pub fn sequence(&self) -> Option<&InPlaySequence> {
        self.play.as_ref().map(|p| &p.sequence)
    }

    #[must_use]
    pub fn roles(&self) -> Option<&RoleAssignment> {
        self.play.as_ref().and_then(|p| p.roles.as_ref())
    }

    #[must_use]
    pub fn countdown(&self) -> Option<&Countdown> {
        self.countdown.as_ref()
    }

    /// Per-seat state. Empty before start.
    ///
    /// Specialness is only shown at End, or to the seat holding the device
    /// once it has revealed its own role.
    #[must_use]
    pub fn players(&self) -> Vec<PlayerState> {
        let Some(play) = &self.play else {
            return Vec::new();
        };
        let ended = self.phase == SessionPhase::End;
        let holder = (self.phase == SessionPhase::Reveal).then(|| play.cursor.current());

        play.players
            .players()
            .map(|id| {
                let (has_viewed_role, is_special) = match &play.roles {
                    Some(roles) => {
                        let viewed = play.gate.is_revealed(id.index());
                        let shown = ended || (viewed && holder == Some(id.index()));
                        (viewed, shown && roles.is_special(id))
                    }
                    None => (false, false),
                };
                PlayerState {
                    name: play.players.name(id).unwrap_or_default().to_string(),
                    index: id,
                    has_viewed_role,
                    is_special,
                }
            })
            .collect()
    }

    /// Seat acting on the current turn.
    #[must_use]
    pub fn current_player(&self) -> Option<PlayerId> {
        self.play
            .as_ref()
            .filter(|_| self.phase.is_turn_loop())
            .map(|p| p.current_player(self.rules.shape))
    }

    /// The current card and its side, in card games.
    #[must_use]
    pub fn current_card(&self) -> Option<CardFace> {
        if self.rules.shape != GameShape::SequentialCards || self.phase != SessionPhase::Turn {
            return None;
        }
        let play = self.play.as_ref()?;
        play.sequence.get(play.cursor.current()).map(|card| CardFace {
            card: card.clone(),
            face_up: play.face_up,
        })
    }

    /// The current player's hidden information, once they revealed it.
    #[must_use]
    pub fn current_hidden_info(&self) -> Option<HiddenInfo> {
        if self.phase != SessionPhase::Reveal {
            return None;
        }
        let play = self.play.as_ref()?;
        let roles = play.roles.as_ref()?;
        let slot = play.cursor.current();
        play.gate
            .is_revealed(slot)
            .then(|| roles.hidden_info(PlayerId::from_index(slot)))
    }

    /// Is "next" enabled?
    #[must_use]
    pub fn can_advance(&self) -> bool {
        match (&self.play, self.phase.is_turn_loop()) {
            (Some(play), true) => {
                play.gate.is_revealed(play.cursor.current()) && !play.cursor.is_last()
            }
            _ => false,
        }
    }

    /// Is "previous" enabled?
    #[must_use]
    pub fn can_go_back(&self) -> bool {
        match (&self.play, self.phase.is_turn_loop()) {
            (Some(play), true) => play.cursor.can_go_back(),
            _ => false,
        }
    }

    /// Last turn reached and done.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.play.as_ref().is_some_and(|p| p.cursor.is_finished())
    }

    // === Setup ===

    /// Add a player during Setup.
    pub fn add_player(&mut self, name: &str) -> Result<usize, SessionError> {
        Ok(self.roster.add(name)?)
    }

    /// Remove a player during Setup.
    pub fn remove_player(&mut self, index: usize) -> Result<String, SessionError> {
        Ok(self.roster.remove(index)?)
    }

    /// Replace the setup options.
    pub fn configure(&mut self, config: SessionConfig) -> Result<(), SessionError> {
        self.expect_phase("configure", SessionPhase::Setup)?;
        self.config = config;
        Ok(())
    }

    /// Cards the current category choice can deliver.
    #[must_use]
    pub fn available_cards(&self) -> usize {
        CardPool::new(&self.deck).available_count(&self.config.categories, self.rules.sampling)
    }

    /// Card count `start` would use, not counting an opening card.
    ///
    /// Never more than the deck holds.
    #[must_use]
    pub fn resolved_card_count(&self) -> usize {
        clamp_requested_count(
            self.config.card_count,
            self.available_cards(),
            self.rules.min_cards,
            self.deck.number_of_cards,
        )
        .max(1)
        .min(self.deck.len())
    }

    /// Special count `start` would use, if this game has roles.
    #[must_use]
    pub fn resolved_special_count(&self) -> Option<usize> {
        let rule = self.rules.special_rule.as_ref()?;
        Some(self.config.special_count_override.unwrap_or_else(|| {
            rule.special_count(self.roster.len(), self.config.boost_special_count)
        }))
    }

    /// Would `start` succeed right now?
    #[must_use]
    pub fn can_start(&self) -> bool {
        self.phase == SessionPhase::Setup && self.play.is_none() && self.validate_setup().is_ok()
    }

    fn validate_setup(&self) -> Result<(), SessionError> {
        if self.config.categories.is_empty() {
            return Err(SessionError::NoCategoriesSelected);
        }

        if self.rules.requires_opening_card
            && self
                .config
                .opening_card
                .as_deref()
                .map_or(true, |s| s.trim().is_empty())
        {
            return Err(SessionError::MissingOpeningCard);
        }

        let have = self.roster.len();
        if have < self.roster.min() {
            return Err(RosterError::TooFewPlayers {
                have,
                min: self.roster.min(),
            }
            .into());
        }

        if let Some(requested) = self.resolved_special_count() {
            if requested < 1 || requested >= have {
                return Err(RoleError::InvalidSpecialCount {
                    requested,
                    roster: have,
                }
                .into());
            }
        }
        Ok(())
    }

    /// Freeze the roster, sample cards, assign roles, and enter the turn loop.
    ///
    /// Returns the phase entered.
    pub fn start(&mut self) -> Result<SessionPhase, SessionError> {
        if self.play.is_some() {
            return violation(ContractViolation::RolesAlreadyAssigned);
        }
        self.expect_phase("start", SessionPhase::Setup)?;
        self.validate_setup()?;

        let count = self.resolved_card_count();
        let opening = self
            .config
            .opening_card
            .as_deref()
            .filter(|_| self.rules.requires_opening_card)
            .map(|text| Card::opening(text.trim()));

        let mut card_rng = self.rng.for_context("cards");
        let sequence = CardPool::new(&self.deck).sample(
            &self.config.categories,
            count,
            self.rules.sampling,
            opening,
            &mut card_rng,
        );
        let dealt = sequence.drawn().count();

        let roles = match self.resolved_special_count() {
            Some(special_count) => Some(RoleAssignment::compute(
                self.roster.len(),
                special_count,
                self.rules.secret,
                &sequence,
                &mut self.rng.for_context("roles"),
            )?),
            None => None,
        };

        let players = self.roster.freeze()?;

        let (phase, turns) = match self.rules.shape {
            GameShape::RoleReveal => (SessionPhase::Reveal, players.len()),
            GameShape::SequentialCards => (SessionPhase::Turn, sequence.len()),
        };

        self.play = Some(Play {
            scores: PlayerMap::with_value(players.len(), 0),
            scored: vec![false; turns],
            cursor: TurnCursor::new(turns, self.rules.allow_previous),
            gate: RevealGate::new(turns),
            face_up: false,
            players,
            sequence,
            roles,
        });

        if phase == SessionPhase::Turn {
            self.arm_timer();
        }

        info!(
            game = %self.rules.name,
            players = self.roster.len(),
            cards = dealt,
            ?phase,
            "session started"
        );
        self.phase = phase;
        Ok(phase)
    }

    // === Turn loop ===

    /// Show the current player their hidden information (role games).
    ///
    /// Calling it again returns the same information and changes nothing.
    pub fn reveal_current(&mut self) -> Result<HiddenInfo, SessionError> {
        self.expect_phase("reveal", SessionPhase::Reveal)?;
        let lock = self.rules.lock_back_after_reveal;
        let play = self.play_mut("reveal")?;

        let slot = play.cursor.current();
        let newly = play.gate.reveal(slot);
        play.cursor.complete_current();
        if lock {
            play.cursor.lock_back();
        }

        let player = PlayerId::from_index(slot);
        let info = match &play.roles {
            Some(roles) => roles.hidden_info(player),
            None => HiddenInfo::Normal,
        };

        if newly {
            self.moves += 1;
            debug!(%player, "role revealed");
        }
        Ok(info)
    }

    /// Turn the current card over (card games).
    ///
    /// The first time a card goes face up its turn counts as done.
    /// Returns whether the card is now face up.
    pub fn flip(&mut self) -> Result<bool, SessionError> {
        self.expect_phase("flip", SessionPhase::Turn)?;
        let lock = self.rules.lock_back_after_reveal;
        let play = self.play_mut("flip")?;

        play.face_up = !play.face_up;
        if play.face_up {
            let slot = play.cursor.current();
            if play.gate.reveal(slot) {
                debug!(card = slot, "card revealed");
            }
            play.cursor.complete_current();
            if lock {
                play.cursor.lock_back();
            }
        }

        let face_up = play.face_up;
        self.moves += 1;
        Ok(face_up)
    }

    /// Give the current card's player a point. Once per card.
    ///
    /// Returns the player's total.
    pub fn award_point(&mut self) -> Result<u32, SessionError> {
        self.expect_phase("award point", SessionPhase::Turn)?;
        let shape = self.rules.shape;
        let play = self.play_mut("award point")?;

        let slot = play.cursor.current();
        if !play.gate.is_revealed(slot) {
            return violation(ContractViolation::RevealPending { slot });
        }

        let player = play.current_player(shape);
        if !play.scored[slot] {
            play.scored[slot] = true;
            play.scores[player] += 1;
        }
        Ok(play.scores[player])
    }

    /// Move to the next player or card.
    ///
    /// The current slot must have been revealed, and this must not be the
    /// last turn.
    pub fn advance(&mut self) -> Result<usize, SessionError> {
        self.expect_turn_loop("advance")?;
        let play = self.play_mut("advance")?;

        let slot = play.cursor.current();
        if !play.gate.is_revealed(slot) {
            return violation(ContractViolation::RevealPending { slot });
        }
        if play.cursor.is_last() {
            return violation(ContractViolation::PastFinished);
        }

        let next = play.cursor.next();
        play.face_up = false;
        self.moves += 1;
        debug!(turn = next, "advanced");
        Ok(next)
    }

    /// Step back one turn.
    ///
    /// Both the abandoned turn and the re-entered one must be revealed again.
    pub fn go_back(&mut self) -> Result<usize, SessionError> {
        self.expect_turn_loop("go back")?;
        let play = self.play_mut("go back")?;

        if !play.cursor.can_go_back() {
            return violation(ContractViolation::BacktrackForbidden);
        }

        let left = play.cursor.current();
        let entered = play.cursor.previous();
        play.gate.reset(left);
        play.gate.reset(entered);
        play.face_up = false;
        self.moves += 1;
        debug!(from = left, to = entered, "went back");
        Ok(entered)
    }

    /// Leave the reveal loop once every player has seen their role.
    pub fn begin_discussion(&mut self) -> Result<(), SessionError> {
        self.expect_phase("begin discussion", SessionPhase::Reveal)?;
        let play = self.play_mut("begin discussion")?;

        if let Some(slot) = (0..play.gate.len()).find(|&s| !play.gate.is_revealed(s)) {
            return violation(ContractViolation::RevealPending { slot });
        }

        self.arm_timer();
        self.transition(SessionPhase::Discussion);
        Ok(())
    }

    /// End the discussion and expose the answer.
    pub fn reveal_truth(&mut self) -> Result<SessionSummary, SessionError> {
        self.expect_phase("reveal truth", SessionPhase::Discussion)?;
        self.transition(SessionPhase::End);
        self.summary()
    }

    /// End a card game after the last card's turn.
    pub fn finish(&mut self) -> Result<SessionSummary, SessionError> {
        self.expect_phase("finish", SessionPhase::Turn)?;
        if !self.is_finished() {
            return violation(ContractViolation::NotFinished);
        }
        self.transition(SessionPhase::End);
        self.summary()
    }

    /// End-screen data. Only available in End.
    pub fn summary(&self) -> Result<SessionSummary, SessionError> {
        self.expect_phase("summary", SessionPhase::End)?;
        let Some(play) = &self.play else {
            return violation(ContractViolation::WrongPhase {
                action: "summary",
                phase: self.phase,
            });
        };

        let name = |id: PlayerId| play.players.name(id).unwrap_or_default().to_string();
        let scores: Vec<(String, u32)> = play.scores.iter().map(|(id, &s)| (name(id), s)).collect();

        Ok(SessionSummary {
            game: self.rules.name.clone(),
            cards_played: match self.rules.shape {
                GameShape::SequentialCards => play.gate.revealed_count(),
                GameShape::RoleReveal => 0,
            },
            score: scores.iter().map(|(_, s)| s).sum(),
            scores,
            moves: self.moves,
            elapsed: self.elapsed,
            secret: play.roles.as_ref().and_then(|r| r.secret().cloned()),
            special_players: play
                .roles
                .as_ref()
                .map(|r| r.special_players().iter().map(|&id| name(id)).collect())
                .unwrap_or_default(),
            timer_expired: self.timer_expired,
        })
    }

    // === Time ===

    /// Advance logical time. Ignored in Setup and End.
    pub fn on_tick(&mut self, elapsed: Duration) {
        if matches!(self.phase, SessionPhase::Setup | SessionPhase::End) {
            return;
        }
        self.elapsed += elapsed;

        let expired = self.countdown.as_mut().is_some_and(|c| c.tick(elapsed));
        if expired {
            self.on_expire();
        }
    }

    /// The countdown ran out. Idempotent.
    pub fn on_expire(&mut self) {
        if self.timer_expired || self.phase.is_terminal() || self.phase == SessionPhase::Setup {
            return;
        }
        self.timer_expired = true;
        warn!(game = %self.rules.name, phase = ?self.phase, "timer expired");

        if self.rules.end_on_timer_expire
            && matches!(self.phase, SessionPhase::Turn | SessionPhase::Discussion)
        {
            self.transition(SessionPhase::End);
        }
    }

    // === Follow-ups ===

    /// Fresh session with the same players, rules, deck and settings.
    ///
    /// Only available at End. Cards and roles are drawn again from a
    /// forked seed; options go back to their defaults.
    pub fn play_again(&self) -> Result<Session, SessionError> {
        self.expect_phase("play again", SessionPhase::End)?;
        let Some(play) = &self.play else {
            return violation(ContractViolation::WrongPhase {
                action: "play again",
                phase: self.phase,
            });
        };
        let names: Vec<String> = play.players.names().map(str::to_string).collect();

        let seed = self.rng.fork().seed();
        let mut next = Session::with_settings(
            Arc::clone(&self.rules),
            Arc::clone(&self.deck),
            self.settings,
            seed,
        );
        for name in &names {
            next.add_player(name)?;
        }
        debug!(players = names.len(), seed, "play again");
        Ok(next)
    }

    /// Snapshot for rendering.
    #[must_use]
    pub fn view(&self) -> SessionView {
        let turn_loop = self.phase.is_turn_loop();
        let current_index = self
            .play
            .as_ref()
            .filter(|_| turn_loop)
            .map(|p| p.cursor.current());
        let current_player = self.current_player();

        SessionView {
            game: self.rules.name.clone(),
            phase: self.phase,
            settings: self.settings,
            players: self.players(),
            current_index,
            current_player,
            current_player_name: current_player.and_then(|id| {
                self.play
                    .as_ref()
                    .and_then(|p| p.players.name(id))
                    .map(str::to_string)
            }),
            has_viewed_role: match (&self.play, current_index) {
                (Some(play), Some(slot)) => play.gate.is_revealed(slot),
                _ => false,
            },
            current_card: self.current_card(),
            total_turns: self.play.as_ref().map_or(0, |p| p.cursor.len()),
            can_advance: self.can_advance(),
            can_go_back: self.can_go_back(),
            is_finished: self.is_finished(),
            timer: self.countdown.map(|c| TimerView {
                remaining: c.remaining(),
                heat: c.heat(),
                expired: c.is_expired(),
            }),
            timer_expired: self.timer_expired,
            moves: self.moves,
            elapsed: self.elapsed,
        }
    }

    // === Internals ===

    fn expect_phase(&self, action: &'static str, phase: SessionPhase) -> Result<(), SessionError> {
        if self.phase == phase {
            Ok(())
        } else {
            violation(ContractViolation::WrongPhase {
                action,
                phase: self.phase,
            })
        }
    }

    fn expect_turn_loop(&self, action: &'static str) -> Result<(), SessionError> {
        if self.phase.is_turn_loop() {
            Ok(())
        } else {
            violation(ContractViolation::WrongPhase {
                action,
                phase: self.phase,
            })
        }
    }

    fn play_mut(&mut self, action: &'static str) -> Result<&mut Play, SessionError> {
        let phase = self.phase;
        match self.play.as_mut() {
            Some(play) => Ok(play),
            None => violation(ContractViolation::WrongPhase { action, phase }),
        }
    }

    fn arm_timer(&mut self) {
        self.countdown = self
            .config
            .timer_seconds
            .filter(|&s| s > 0)
            .map(Countdown::from_secs);
    }

    fn transition(&mut self, to: SessionPhase) {
        debug!(from = ?self.phase, ?to, "phase transition");
        self.phase = to;
    }
}
