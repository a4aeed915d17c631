//! Read-only snapshots handed to the UI.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::phase::SessionPhase;
use super::timer::Heat;
use crate::cards::Card;
use crate::core::{EngineSettings, PlayerId, PlayerState};
use crate::roles::SecretWord;

/// The card on the table and which side is up.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardFace {
    pub card: Card,
    pub face_up: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerView {
    pub remaining: Duration,
    pub heat: Heat,
    pub expired: bool,
}

/// Everything the UI needs to draw the current screen.
///
/// Never contains a player's hidden information; that is only available
/// through `Session::current_hidden_info` once the player has revealed it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionView {
    pub game: String,
    pub phase: SessionPhase,
    pub settings: EngineSettings,
    pub players: Vec<PlayerState>,
    /// Cursor position: a seat in role games, a card in card games.
    pub current_index: Option<usize>,
    pub current_player: Option<PlayerId>,
    pub current_player_name: Option<String>,
    /// Current slot's reveal gate is open.
    pub has_viewed_role: bool,
    pub current_card: Option<CardFace>,
    pub total_turns: usize,
    pub can_advance: bool,
    pub can_go_back: bool,
    pub is_finished: bool,
    pub timer: Option<TimerView>,
    pub timer_expired: bool,
    pub moves: u32,
    pub elapsed: Duration,
}

/// Final state shown on the end screen.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub game: String,
    /// Cards turned face up at least once.
    pub cards_played: usize,
    pub score: u32,
    /// Points per player, in seat order.
    pub scores: Vec<(String, u32)>,
    pub moves: u32,
    pub elapsed: Duration,
    pub secret: Option<SecretWord>,
    pub special_players: Vec<String>,
    pub timer_expired: bool,
}
