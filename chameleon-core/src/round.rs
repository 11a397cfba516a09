use chameleon_types::{GameError, PlayPhase, PlayerId, Role, RoundContent, RoundOutcome};
use tracing::info;

use crate::assignment::RoundAssignment;

/// Result of resolving one team accusation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccusationResult {
    /// Accused was an impostor; they now get to guess the word
    ImpostorCaught,
    /// Accused was a detective and is out; discussion resumes
    Eliminated { remaining: usize },
    /// Too few players or no detectives left, the impostors win by attrition
    ImpostorEscaped,
}

/// Play machine for a single round: discussion, accusations, impostor guess.
#[derive(Debug, Clone)]
pub struct Round {
    assignment: RoundAssignment,
    phase: PlayPhase,
    eliminated: Vec<PlayerId>,
    accusation: Option<PlayerId>,
    outcome: Option<RoundOutcome>,
}

impl Round {
    pub fn new(assignment: RoundAssignment) -> Self {
        assert!(
            assignment.player_count() >= 3,
            "a round needs at least three players, got {}",
            assignment.player_count()
        );
        Self {
            assignment,
            phase: PlayPhase::Discussion,
            eliminated: Vec::new(),
            accusation: None,
            outcome: None,
        }
    }

    pub fn assignment(&self) -> &RoundAssignment {
        &self.assignment
    }

    pub fn content(&self) -> &RoundContent {
        &self.assignment.content
    }

    pub fn phase(&self) -> PlayPhase {
        self.phase
    }

    pub fn eliminated(&self) -> &[PlayerId] {
        &self.eliminated
    }

    pub fn accusation(&self) -> Option<PlayerId> {
        self.accusation
    }

    pub fn is_finished(&self) -> bool {
        self.phase == PlayPhase::RoundEnd
    }

    /// Outcome once the round has ended
    pub fn outcome(&self) -> Option<&RoundOutcome> {
        if self.is_finished() {
            self.outcome.as_ref()
        } else {
            None
        }
    }

    /// Outcome being drafted while the caught impostor guesses
    pub fn draft_outcome(&self) -> Option<&RoundOutcome> {
        self.outcome.as_ref()
    }

    pub fn role_of(&self, player_id: PlayerId) -> Role {
        if self.assignment.is_impostor(player_id) {
            Role::Impostor
        } else {
            Role::Detective
        }
    }

    /// Players still in the round, in turn order
    pub fn active_players(&self) -> Vec<PlayerId> {
        self.assignment
            .turn_order
            .iter()
            .copied()
            .filter(|id| !self.eliminated.contains(id))
            .collect()
    }

    pub fn ready_to_accuse(&mut self) -> Result<(), GameError> {
        self.require_phase(PlayPhase::Discussion, "start accusation")?;

        let active = self.active_players().len();
        if active < 2 {
            return Err(GameError::NotEnoughActivePlayers { active });
        }

        self.phase = PlayPhase::TeamAccusation;
        Ok(())
    }

    /// Mark the team's current suspect without resolving anything
    pub fn nominate(&mut self, player_id: PlayerId) -> Result<(), GameError> {
        self.require_phase(PlayPhase::TeamAccusation, "nominate")?;
        self.validate_target(player_id)?;
        self.accusation = Some(player_id);
        Ok(())
    }

    /// Resolve the nominated suspect
    pub fn confirm_accusation(&mut self) -> Result<AccusationResult, GameError> {
        self.require_phase(PlayPhase::TeamAccusation, "confirm accusation")?;
        let player_id = self.accusation.ok_or(GameError::NoAccusationTarget)?;
        self.accuse(player_id)
    }

    pub fn accuse(&mut self, player_id: PlayerId) -> Result<AccusationResult, GameError> {
        self.require_phase(PlayPhase::TeamAccusation, "accuse")?;
        self.validate_target(player_id)?;
        self.accusation = Some(player_id);

        if self.assignment.is_impostor(player_id) {
            info!("Impostor {} caught", player_id);
            self.outcome = Some(self.build_outcome(player_id, true));
            self.phase = PlayPhase::ImpostorGuess;
            return Ok(AccusationResult::ImpostorCaught);
        }

        self.eliminated.push(player_id);
        let total = self.assignment.player_count();
        let remaining = total - self.eliminated.len();
        assert!(remaining >= 2, "elimination left {} active players", remaining);

        let detectives_left = self
            .active_players()
            .iter()
            .any(|&id| !self.assignment.is_impostor(id));

        if self.eliminated.len() >= total - 2 || !detectives_left {
            info!(
                "Player {} eliminated, impostors escape with {} players left",
                player_id, remaining
            );
            self.outcome = Some(self.build_outcome(player_id, false));
            self.phase = PlayPhase::RoundEnd;
            Ok(AccusationResult::ImpostorEscaped)
        } else {
            info!("Player {} eliminated, {} players remain", player_id, remaining);
            self.accusation = None;
            self.phase = PlayPhase::Discussion;
            Ok(AccusationResult::Eliminated { remaining })
        }
    }

    /// Caught impostor's last chance. Returns whether the guess was right.
    pub fn submit_impostor_guess(&mut self, word: &str) -> Result<bool, GameError> {
        self.require_phase(PlayPhase::ImpostorGuess, "submit guess")?;

        let guess = word.trim();
        if guess.is_empty() {
            return Err(GameError::EmptyGuess);
        }

        let correct =
            guess.to_lowercase() == self.assignment.content.secret_word.trim().to_lowercase();
        let outcome = self
            .outcome
            .as_mut()
            .expect("impostor guess phase always has a drafted outcome");
        outcome.impostor_word_guess_correct = correct;
        outcome.impostor_guess = Some(guess.to_string());

        info!("Impostor guessed the secret word: {}", correct);
        self.phase = PlayPhase::RoundEnd;
        Ok(correct)
    }

    fn build_outcome(&self, accused: PlayerId, impostor_caught: bool) -> RoundOutcome {
        RoundOutcome {
            impostor_caught,
            accused_player: accused,
            impostor_word_guess_correct: false,
            eliminated_players: self.eliminated.clone(),
            impostors: self.assignment.impostors.iter().copied().collect(),
            impostor_guess: None,
        }
    }

    fn validate_target(&self, player_id: PlayerId) -> Result<(), GameError> {
        if !self.assignment.turn_order.contains(&player_id) {
            return Err(GameError::UnknownPlayer { player_id });
        }
        if self.eliminated.contains(&player_id) {
            return Err(GameError::PlayerEliminated { player_id });
        }
        Ok(())
    }

    fn require_phase(&self, expected: PlayPhase, action: &str) -> Result<(), GameError> {
        if self.phase != expected {
            return Err(GameError::InvalidGamePhase {
                action: action.to_string(),
                current_phase: format!("{:?}", self.phase),
            });
        }
        Ok(())
    }
}
