use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{ErrorKind, GameError, PlayerId};

/// Every user action the presentation layer can trigger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ClientAction {
    Start,
    SelectTheme { theme_id: String },
    SelectPlayerCount { count: usize },
    UpdatePlayerName { index: usize, name: String },
    ConfirmPlayerNames,
    BackToPlayerSelection,
    StartRound,
    BackToRules,
    StartGameplay,
    ReadyToAccuse,
    Nominate { player_id: PlayerId },
    Accuse { player_id: PlayerId },
    SubmitImpostorGuess { word: String },
    NewRound,
    ResetGame,
}

impl ClientAction {
    /// Short name used in logs and phase errors
    pub fn name(&self) -> &'static str {
        match self {
            ClientAction::Start => "start",
            ClientAction::SelectTheme { .. } => "select theme",
            ClientAction::SelectPlayerCount { .. } => "select player count",
            ClientAction::UpdatePlayerName { .. } => "update player name",
            ClientAction::ConfirmPlayerNames => "confirm player names",
            ClientAction::BackToPlayerSelection => "go back to player selection",
            ClientAction::StartRound => "start round",
            ClientAction::BackToRules => "go back to rules",
            ClientAction::StartGameplay => "start gameplay",
            ClientAction::ReadyToAccuse => "start accusation",
            ClientAction::Nominate { .. } => "nominate",
            ClientAction::Accuse { .. } => "accuse",
            ClientAction::SubmitImpostorGuess { .. } => "submit guess",
            ClientAction::NewRound => "start new round",
            ClientAction::ResetGame => "reset game",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ErrorResponse {
    pub kind: ErrorKind,
    pub error: GameError,
    pub message: String,
}

impl From<&GameError> for ErrorResponse {
    fn from(error: &GameError) -> Self {
        ErrorResponse {
            kind: error.kind(),
            error: error.clone(),
            message: error.to_string(),
        }
    }
}
