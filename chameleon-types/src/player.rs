use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Seat index of a player in the confirmed roster of a session.
pub type PlayerId = usize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
}

/// Cumulative per-player record. Also used as the per-round delta
/// produced by the scoring engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PlayerScore {
    pub name: String,
    pub points: u32,
    pub rounds_played: u32,
    pub impostors_caught: u32,
    pub words_guessed: u32,
    pub successful_blends: u32,
}

impl PlayerScore {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Add a round delta onto this cumulative record
    pub fn absorb(&mut self, delta: &PlayerScore) {
        self.points += delta.points;
        self.rounds_played += delta.rounds_played;
        self.impostors_caught += delta.impostors_caught;
        self.words_guessed += delta.words_guessed;
        self.successful_blends += delta.successful_blends;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RankedScore {
    pub rank: usize, // 1-based
    pub score: PlayerScore,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absorb_is_additive() {
        let mut total = PlayerScore::new("Alice");
        let delta = PlayerScore {
            name: "Alice".to_string(),
            points: 10,
            rounds_played: 1,
            impostors_caught: 1,
            words_guessed: 0,
            successful_blends: 0,
        };

        total.absorb(&delta);
        total.absorb(&delta);

        assert_eq!(total.name, "Alice");
        assert_eq!(total.points, 20);
        assert_eq!(total.rounds_played, 2);
        assert_eq!(total.impostors_caught, 2);
        assert_eq!(total.words_guessed, 0);
    }
}
