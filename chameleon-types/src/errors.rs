use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::PlayerId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum GameError {
    #[error("Round content unavailable: {reason}")]
    ContentUnavailable { reason: String },
    #[error("Round content is still loading")]
    ContentLoading,
    #[error("Invalid number of players: {count} (allowed {min}-{max})")]
    InvalidPlayerCount { count: usize, min: usize, max: usize },
    #[error("Player {index} has an empty name")]
    EmptyPlayerName { index: usize },
    #[error("Player index {index} out of range for {player_count} players")]
    PlayerIndexOutOfRange { index: usize, player_count: usize },
    #[error("Player {player_id} is not part of this round")]
    UnknownPlayer { player_id: PlayerId },
    #[error("Player {player_id} has already been eliminated")]
    PlayerEliminated { player_id: PlayerId },
    #[error("Not enough active players to accuse: {active}")]
    NotEnoughActivePlayers { active: usize },
    #[error("No player has been nominated")]
    NoAccusationTarget,
    #[error("Guess must not be empty")]
    EmptyGuess,
    #[error("Unknown theme: {theme_id}")]
    UnknownTheme { theme_id: String },
    #[error("Cannot {action} during {current_phase}")]
    InvalidGamePhase { action: String, current_phase: String },
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },
}

/// Coarse classification used by callers to decide how to surface an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ErrorKind {
    ContentUnavailable,
    ValidationFailed,
    Configuration,
}

impl GameError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GameError::ContentUnavailable { .. } => ErrorKind::ContentUnavailable,
            GameError::InvalidConfig { .. } => ErrorKind::Configuration,
            _ => ErrorKind::ValidationFailed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let content = GameError::ContentUnavailable {
            reason: "404".to_string(),
        };
        assert_eq!(content.kind(), ErrorKind::ContentUnavailable);
        assert_eq!(GameError::EmptyGuess.kind(), ErrorKind::ValidationFailed);
        assert_eq!(GameError::ContentLoading.kind(), ErrorKind::ValidationFailed);
        assert_eq!(
            GameError::InvalidConfig {
                reason: "x".to_string()
            }
            .kind(),
            ErrorKind::Configuration
        );
    }

    #[test]
    fn test_error_messages() {
        let err = GameError::InvalidPlayerCount {
            count: 2,
            min: 3,
            max: 10,
        };
        assert_eq!(err.to_string(), "Invalid number of players: 2 (allowed 3-10)");

        let err = GameError::InvalidGamePhase {
            action: "accuse".to_string(),
            current_phase: "Discussion".to_string(),
        };
        assert_eq!(err.to_string(), "Cannot accuse during Discussion");
    }
}
