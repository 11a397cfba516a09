use chameleon_types::{Player, PlayerId, PlayerScore, RankedScore, RoundOutcome};
use tracing::debug;

pub struct ScoringEngine;

impl ScoringEngine {
    /// Everyone earns this when an impostor is caught
    pub const CATCH_POINTS: u32 = 10;
    /// Caught impostor bonus for naming the secret word
    pub const WORD_GUESS_POINTS: u32 = 15;
    /// Impostor reward for surviving the round
    pub const BLEND_POINTS: u32 = 15;

    /// Per-player deltas for one resolved round, in turn order
    pub fn score_round(
        outcome: &RoundOutcome,
        turn_order: &[Player],
    ) -> Vec<(PlayerId, PlayerScore)> {
        let mut deltas: Vec<(PlayerId, PlayerScore)> = turn_order
            .iter()
            .map(|player| {
                let mut delta = PlayerScore::new(player.name.clone());
                delta.rounds_played = 1;
                (player.id, delta)
            })
            .collect();

        for (player_id, delta) in &mut deltas {
            let is_impostor = outcome.impostors.contains(player_id);

            if outcome.impostor_caught {
                delta.points += Self::CATCH_POINTS;
                delta.impostors_caught += 1;

                if is_impostor && outcome.impostor_word_guess_correct {
                    delta.points += Self::WORD_GUESS_POINTS;
                    delta.words_guessed += 1;
                }
            } else if is_impostor {
                delta.points += Self::BLEND_POINTS;
                delta.successful_blends += 1;
            }
        }

        deltas
    }

    /// Order by points, highest first. Ties keep their original order.
    pub fn rank(scores: &[PlayerScore]) -> Vec<RankedScore> {
        let mut sorted = scores.to_vec();
        sorted.sort_by(|a, b| b.points.cmp(&a.points));
        sorted
            .into_iter()
            .enumerate()
            .map(|(i, score)| RankedScore { rank: i + 1, score })
            .collect()
    }
}

/// Cumulative scores of a session, indexed by seat
#[derive(Debug, Clone, Default)]
pub struct Scoreboard {
    entries: Vec<PlayerScore>,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Line the board up with a confirmed roster. Names seen before keep
    /// their totals, new names start at zero.
    pub fn sync_roster(&mut self, names: &[String]) {
        let mut previous: Vec<Option<PlayerScore>> =
            std::mem::take(&mut self.entries).into_iter().map(Some).collect();

        self.entries = names
            .iter()
            .map(|name| {
                let key = name.trim().to_lowercase();
                previous
                    .iter_mut()
                    .find(|slot| {
                        slot.as_ref()
                            .is_some_and(|s| s.name.trim().to_lowercase() == key)
                    })
                    .and_then(Option::take)
                    .map(|mut score| {
                        score.name = name.clone();
                        score
                    })
                    .unwrap_or_else(|| PlayerScore::new(name.clone()))
            })
            .collect();
    }

    /// Apply a resolved round. Returns the deltas that were added.
    pub fn apply_round(
        &mut self,
        outcome: &RoundOutcome,
        turn_order: &[Player],
    ) -> Vec<(PlayerId, PlayerScore)> {
        let deltas = ScoringEngine::score_round(outcome, turn_order);
        for (player_id, delta) in &deltas {
            if *player_id >= self.entries.len() {
                self.entries.resize_with(*player_id + 1, PlayerScore::default);
            }
            let entry = &mut self.entries[*player_id];
            if entry.name.is_empty() {
                entry.name = delta.name.clone();
            }
            entry.absorb(delta);
        }
        debug!("Applied round scores for {} players", deltas.len());
        deltas
    }

    pub fn get(&self, player_id: PlayerId) -> Option<&PlayerScore> {
        self.entries.get(player_id)
    }

    pub fn entries(&self) -> &[PlayerScore] {
        &self.entries
    }

    pub fn rankings(&self) -> Vec<RankedScore> {
        ScoringEngine::rank(&self.entries)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn players(names: &[&str]) -> Vec<Player> {
        names
            .iter()
            .enumerate()
            .map(|(id, name)| Player {
                id,
                name: name.to_string(),
            })
            .collect()
    }

    fn outcome(caught: bool, guessed: bool, impostors: Vec<PlayerId>) -> RoundOutcome {
        RoundOutcome {
            impostor_caught: caught,
            accused_player: impostors[0],
            impostor_word_guess_correct: guessed,
            eliminated_players: vec![],
            impostors,
            impostor_guess: None,
        }
    }

    fn board_for(names: &[&str]) -> Scoreboard {
        let mut board = Scoreboard::new();
        board.sync_roster(&names.iter().map(|n| n.to_string()).collect::<Vec<_>>());
        board
    }

    #[test]
    fn test_impostor_caught_without_word_guess() {
        let roster = players(&["Ann", "Bo", "Cy", "Di"]);
        let mut board = board_for(&["Ann", "Bo", "Cy", "Di"]);

        board.apply_round(&outcome(true, false, vec![2]), &roster);

        for score in board.entries() {
            assert_eq!(score.points, 10);
            assert_eq!(score.rounds_played, 1);
            assert_eq!(score.impostors_caught, 1);
            assert_eq!(score.words_guessed, 0);
            assert_eq!(score.successful_blends, 0);
        }
    }

    #[test]
    fn test_impostor_caught_with_correct_guess() {
        let roster = players(&["Ann", "Bo", "Cy", "Di"]);
        let mut board = board_for(&["Ann", "Bo", "Cy", "Di"]);

        board.apply_round(&outcome(true, true, vec![2]), &roster);

        let impostor = board.get(2).unwrap();
        assert_eq!(impostor.points, 25);
        assert_eq!(impostor.words_guessed, 1);
        for id in [0, 1, 3] {
            let detective = board.get(id).unwrap();
            assert_eq!(detective.points, 10);
            assert_eq!(detective.words_guessed, 0);
        }
    }

    #[test]
    fn test_impostor_escapes() {
        let roster = players(&["Ann", "Bo", "Cy", "Di"]);
        let mut board = board_for(&["Ann", "Bo", "Cy", "Di"]);

        board.apply_round(&outcome(false, false, vec![1]), &roster);

        let impostor = board.get(1).unwrap();
        assert_eq!(impostor.points, 15);
        assert_eq!(impostor.successful_blends, 1);
        for id in [0, 2, 3] {
            let detective = board.get(id).unwrap();
            assert_eq!(detective.points, 0);
            assert_eq!(detective.rounds_played, 1);
            assert_eq!(detective.impostors_caught, 0);
        }
    }

    #[test]
    fn test_every_impostor_blends() {
        let roster = players(&["Ann", "Bo", "Cy", "Di", "Ed"]);
        let deltas = ScoringEngine::score_round(&outcome(false, false, vec![0, 3]), &roster);
        let winners: Vec<PlayerId> = deltas
            .iter()
            .filter(|(_, d)| d.points == 15)
            .map(|(id, _)| *id)
            .collect();
        assert_eq!(winners, vec![0, 3]);
    }

    #[test]
    fn test_scores_accumulate_across_rounds() {
        let roster = players(&["Ann", "Bo", "Cy"]);
        let mut board = board_for(&["Ann", "Bo", "Cy"]);

        board.apply_round(&outcome(true, true, vec![0]), &roster);
        board.apply_round(&outcome(false, false, vec![1]), &roster);

        assert_eq!(board.get(0).unwrap().points, 25);
        assert_eq!(board.get(1).unwrap().points, 25);
        assert_eq!(board.get(2).unwrap().points, 10);
        assert!(board.entries().iter().all(|s| s.rounds_played == 2));
    }

    #[test]
    fn test_ranking_is_stable_on_ties() {
        let roster = players(&["Ann", "Bo", "Cy"]);
        let mut board = board_for(&["Ann", "Bo", "Cy"]);
        board.apply_round(&outcome(false, false, vec![2]), &roster);

        let rankings = board.rankings();
        let names: Vec<&str> = rankings.iter().map(|r| r.score.name.as_str()).collect();
        assert_eq!(names, vec!["Cy", "Ann", "Bo"]);
        assert_eq!(rankings[0].rank, 1);
        assert_eq!(rankings[2].rank, 3);
    }

    #[test]
    fn test_sync_roster_keeps_known_names() {
        let roster = players(&["Ann", "Bo", "Cy"]);
        let mut board = board_for(&["Ann", "Bo", "Cy"]);
        board.apply_round(&outcome(false, false, vec![1]), &roster);

        board.sync_roster(&["bo".to_string(), "Dee".to_string(), "Ann".to_string()]);

        assert_eq!(board.get(0).unwrap().points, 15);
        assert_eq!(board.get(0).unwrap().name, "bo");
        assert_eq!(board.get(1).unwrap().points, 0);
        assert_eq!(board.get(2).unwrap().rounds_played, 1);
    }
}
