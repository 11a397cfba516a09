use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::player::{PlayerId, RankedScore};
use crate::theme::ThemeInfo;

pub type SessionId = Uuid;

/// Setup pipeline of a session. `Gameplay` hosts the play sub-phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum GamePhase {
    Welcome,
    PlayerSelection,
    PlayerNames,
    GameRules,
    TurnOrder,
    Gameplay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum PlayPhase {
    Discussion,
    TeamAccusation,
    ImpostorGuess,
    RoundEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Role {
    Impostor,  // knows the topic only
    Detective, // knows topic and secret word
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RoundContent {
    pub topic: String,
    pub secret_word: String,
}

/// What a single player is allowed to see when checking their role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RoleReveal {
    pub player_id: PlayerId,
    pub player_name: String,
    pub role: Role,
    pub topic: String,
    pub secret_word: Option<String>, // None for impostors
}

impl RoleReveal {
    pub fn is_impostor(&self) -> bool {
        self.role == Role::Impostor
    }
}

/// Terminal record of a resolved round, consumed by the scoring engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RoundOutcome {
    pub impostor_caught: bool,
    pub accused_player: PlayerId,
    pub impostor_word_guess_correct: bool,
    pub eliminated_players: Vec<PlayerId>,
    pub impostors: Vec<PlayerId>,
    pub impostor_guess: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ContentStatus {
    Idle,
    Loading,
    Ready { topic: String, secret_count: usize },
    Failed { reason: String },
}

/// Round data that is safe to show on the shared screen.
/// The secret word and impostor identities only appear once the round has ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RoundView {
    pub round_number: u32,
    pub topic: String,
    pub turn_order: Vec<PlayerId>,
    pub starting_player: PlayerId,
    pub card_numbers: Vec<u32>,
    pub impostor_count: usize,
    pub play_phase: Option<PlayPhase>,
    pub active_players: Vec<PlayerId>,
    pub eliminated_players: Vec<PlayerId>,
    pub accusation: Option<PlayerId>,
    pub outcome: Option<RoundOutcome>,
    pub secret_word: Option<String>,
    pub scored: bool,
}

/// Public snapshot of a session for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SessionView {
    pub session_id: SessionId,
    pub phase: GamePhase,
    pub theme: ThemeInfo,
    pub content: ContentStatus,
    pub player_count: Option<usize>,
    pub player_names: Vec<String>,
    pub similar_name_indices: Vec<usize>,
    pub names_valid: bool,
    pub min_players: usize,
    pub max_players: usize,
    pub impostor_count: usize,
    pub round: Option<RoundView>,
    pub rankings: Vec<RankedScore>,
    pub created_at: String, // ISO 8601 string
}
