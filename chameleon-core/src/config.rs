use chameleon_types::GameError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MIN_PLAYERS: usize = 3;
pub const DEFAULT_MAX_PLAYERS: usize = 10;
pub const DEFAULT_NUMBER_OF_CHAMELEONS: usize = 1;

/// Rules that stay fixed for the lifetime of a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub min_players: usize,
    pub max_players: usize,
    pub impostor_count: usize,
    pub default_theme: String,
    pub seed: Option<u64>, // fixed RNG seed for reproducible sessions
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            min_players: DEFAULT_MIN_PLAYERS,
            max_players: DEFAULT_MAX_PLAYERS,
            impostor_count: DEFAULT_NUMBER_OF_CHAMELEONS,
            default_theme: crate::themes::DEFAULT_THEME_ID.to_string(),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Reject configurations the round machine cannot play.
    /// Fewer than three players leaves the elimination threshold ill-defined.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.min_players < 3 {
            return Err(invalid(format!(
                "MIN_PLAYERS must be at least 3, got {}",
                self.min_players
            )));
        }
        if self.max_players < self.min_players {
            return Err(invalid(format!(
                "MAX_PLAYERS ({}) is below MIN_PLAYERS ({})",
                self.max_players, self.min_players
            )));
        }
        if self.impostor_count == 0 {
            return Err(invalid("NUMBER_OF_CHAMELEONS must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn allows_player_count(&self, count: usize) -> bool {
        (self.min_players..=self.max_players).contains(&count)
    }

    /// Impostors actually dealt for a roster of `player_count`
    pub fn effective_impostor_count(&self, player_count: usize) -> usize {
        self.impostor_count.min(player_count.saturating_sub(1))
    }
}

fn invalid(reason: String) -> GameError {
    GameError::InvalidConfig { reason }
}
