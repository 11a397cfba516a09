use chameleon_types::{
    ClientAction, ContentBatch, ContentStatus, GameError, GamePhase, PlayPhase, Player, PlayerId,
    RankedScore, Role, RoleReveal, RoundView, SessionId, SessionView, ThemeInfo,
};
use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::assignment::AssignmentEngine;
use crate::config::GameConfig;
use crate::content::validate_batch;
use crate::game_events::{GameEvent, GameEventBus, GameEventHandler};
use crate::name_validation::{find_similar_name_indices, first_empty_name};
use crate::round::{AccusationResult, Round};
use crate::scoring::Scoreboard;
use crate::themes::ThemeRegistry;

/// Phases in which the theme may still be changed
const THEME_PHASES: [GamePhase; 4] = [
    GamePhase::Welcome,
    GamePhase::PlayerSelection,
    GamePhase::PlayerNames,
    GamePhase::GameRules,
];

/// One local game session: the setup pipeline, the current round and
/// the cumulative scoreboard.
#[derive(Debug)]
pub struct Session {
    id: SessionId,
    created_at: DateTime<Utc>,
    config: GameConfig,
    registry: ThemeRegistry,
    theme: ThemeInfo,
    content: ContentStatus,
    batch: Option<ContentBatch>,
    phase: GamePhase,
    player_count: Option<usize>,
    player_names: Vec<String>,
    roster: Vec<Player>,
    round: Option<Round>,
    round_number: u32,
    scored: bool,
    scoreboard: Scoreboard,
    rng: ChaCha8Rng,
    events: GameEventBus,
}

impl Session {
    pub fn new(config: GameConfig, registry: ThemeRegistry) -> Result<Self, GameError> {
        config.validate()?;

        let seed = config.seed.unwrap_or_else(rand::random);
        let theme = registry.default_theme(&config.default_theme)?.clone();
        let id = Uuid::new_v4();
        debug!("Session {} created with seed {}", id, seed);

        Ok(Self {
            id,
            created_at: Utc::now(),
            config,
            registry,
            theme,
            content: ContentStatus::Idle,
            batch: None,
            phase: GamePhase::Welcome,
            player_count: None,
            player_names: Vec::new(),
            roster: Vec::new(),
            round: None,
            round_number: 0,
            scored: false,
            scoreboard: Scoreboard::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            events: GameEventBus::new(),
        })
    }

    pub fn with_seed(
        mut config: GameConfig,
        registry: ThemeRegistry,
        seed: u64,
    ) -> Result<Self, GameError> {
        config.seed = Some(seed);
        Self::new(config, registry)
    }

    pub fn add_event_handler(&mut self, handler: Box<dyn GameEventHandler>) {
        self.events.add_handler(handler);
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn play_phase(&self) -> Option<PlayPhase> {
        match self.phase {
            GamePhase::Gameplay => self.round.as_ref().map(Round::phase),
            _ => None,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn registry(&self) -> &ThemeRegistry {
        &self.registry
    }

    pub fn theme(&self) -> &ThemeInfo {
        &self.theme
    }

    pub fn content_status(&self) -> &ContentStatus {
        &self.content
    }

    pub fn player_names(&self) -> &[String] {
        &self.player_names
    }

    pub fn roster(&self) -> &[Player] {
        &self.roster
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    // Content lifecycle

    /// Idle or failed content should be (re)fetched
    pub fn needs_content(&self) -> bool {
        matches!(self.content, ContentStatus::Idle | ContentStatus::Failed { .. })
    }

    /// Mark content as loading and return the theme to fetch
    pub fn begin_content_load(&mut self) -> ThemeInfo {
        debug!("Loading content for theme '{}'", self.theme.id);
        self.content = ContentStatus::Loading;
        self.theme.clone()
    }

    /// Record the result of a fetch started by `begin_content_load`.
    /// Results for a theme that is no longer selected are dropped.
    pub fn finish_content_load(
        &mut self,
        theme_id: &str,
        result: Result<ContentBatch, GameError>,
    ) -> Result<(), GameError> {
        if theme_id != self.theme.id {
            warn!(
                "Dropping content for theme '{}', '{}' is selected",
                theme_id, self.theme.id
            );
            return Ok(());
        }

        match result.and_then(validate_batch) {
            Ok(batch) => {
                self.content = ContentStatus::Ready {
                    topic: batch.topic.clone(),
                    secret_count: batch.secrets.len(),
                };
                self.events.publish(GameEvent::ContentLoaded {
                    session_id: self.id,
                    theme_id: theme_id.to_string(),
                    topic: batch.topic.clone(),
                    secret_count: batch.secrets.len(),
                });
                self.batch = Some(batch);
                Ok(())
            }
            Err(err) => {
                warn!("Content for theme '{}' unavailable: {}", theme_id, err);
                // a failed refetch keeps content that was already loaded
                self.content = match &self.batch {
                    Some(batch) => ContentStatus::Ready {
                        topic: batch.topic.clone(),
                        secret_count: batch.secrets.len(),
                    },
                    None => ContentStatus::Failed {
                        reason: err.to_string(),
                    },
                };
                self.events.publish(GameEvent::ContentFailed {
                    session_id: self.id,
                    theme_id: theme_id.to_string(),
                    reason: err.to_string(),
                });
                Err(err)
            }
        }
    }

    // Setup machine

    pub fn start(&mut self) -> Result<(), GameError> {
        self.guard(&[GamePhase::Welcome], "start")?;
        self.set_phase(GamePhase::PlayerSelection);
        Ok(())
    }

    pub fn select_theme(&mut self, theme_id: &str) -> Result<(), GameError> {
        self.guard(&THEME_PHASES, "select theme")?;
        let theme = self.registry.get(theme_id)?.clone();
        if theme.id == self.theme.id {
            return Ok(());
        }

        info!("Theme changed from '{}' to '{}'", self.theme.id, theme.id);
        self.theme = theme;
        self.content = ContentStatus::Idle;
        self.batch = None;
        Ok(())
    }

    pub fn select_player_count(&mut self, count: usize) -> Result<(), GameError> {
        self.guard(&[GamePhase::PlayerSelection], "select player count")?;
        if !self.config.allows_player_count(count) {
            return Err(GameError::InvalidPlayerCount {
                count,
                min: self.config.min_players,
                max: self.config.max_players,
            });
        }

        self.player_count = Some(count);
        self.player_names = (1..=count).map(|i| format!("Player {}", i)).collect();
        self.set_phase(GamePhase::PlayerNames);
        Ok(())
    }

    pub fn update_player_name(&mut self, index: usize, name: &str) -> Result<(), GameError> {
        self.guard(&[GamePhase::PlayerNames], "update player name")?;
        let player_count = self.player_names.len();
        let slot = self
            .player_names
            .get_mut(index)
            .ok_or(GameError::PlayerIndexOutOfRange {
                index,
                player_count,
            })?;
        *slot = name.to_string();
        Ok(())
    }

    pub fn confirm_player_names(&mut self) -> Result<(), GameError> {
        self.guard(&[GamePhase::PlayerNames], "confirm player names")?;
        if let Some(index) = first_empty_name(&self.player_names) {
            return Err(GameError::EmptyPlayerName { index });
        }

        let similar = find_similar_name_indices(&self.player_names);
        if !similar.is_empty() {
            warn!("Players at {:?} have similar names", similar);
        }

        self.player_names = self
            .player_names
            .iter()
            .map(|name| name.trim().to_string())
            .collect();
        self.roster = self
            .player_names
            .iter()
            .enumerate()
            .map(|(id, name)| Player {
                id,
                name: name.clone(),
            })
            .collect();
        self.scoreboard.sync_roster(&self.player_names);
        self.set_phase(GamePhase::GameRules);
        Ok(())
    }

    pub fn back_to_player_selection(&mut self) -> Result<(), GameError> {
        self.guard(&[GamePhase::PlayerNames], "go back to player selection")?;
        self.player_names.clear();
        self.player_count = None;
        self.set_phase(GamePhase::PlayerSelection);
        Ok(())
    }

    pub fn start_round(&mut self) -> Result<(), GameError> {
        self.guard(&[GamePhase::GameRules], "start round")?;

        let batch = self.batch.as_ref().ok_or_else(|| match &self.content {
            ContentStatus::Failed { reason } => GameError::ContentUnavailable {
                reason: reason.clone(),
            },
            _ => GameError::ContentUnavailable {
                reason: "content has not been loaded".to_string(),
            },
        })?;
        let assignment = AssignmentEngine::assign(
            self.roster.len(),
            batch,
            self.config.impostor_count,
            &mut self.rng,
        )?;

        self.round_number += 1;
        self.scored = false;
        self.events.publish(GameEvent::RoundStarted {
            session_id: self.id,
            round_number: self.round_number,
            topic: assignment.content.topic.clone(),
            starting_player: assignment.starting_player,
            impostor_count: assignment.impostors.len(),
        });
        self.round = Some(Round::new(assignment));
        self.set_phase(GamePhase::TurnOrder);
        Ok(())
    }

    pub fn back_to_rules(&mut self) -> Result<(), GameError> {
        self.guard(&[GamePhase::TurnOrder], "go back to rules")?;
        self.round = None;
        self.round_number -= 1;
        self.set_phase(GamePhase::GameRules);
        Ok(())
    }

    pub fn start_gameplay(&mut self) -> Result<(), GameError> {
        self.guard(&[GamePhase::TurnOrder], "start gameplay")?;
        self.set_phase(GamePhase::Gameplay);
        Ok(())
    }

    /// Private view for one player. Reading it never changes the session.
    pub fn reveal_role(&self, player_id: PlayerId) -> Result<RoleReveal, GameError> {
        let round = match (self.phase, &self.round) {
            (GamePhase::TurnOrder | GamePhase::Gameplay, Some(round)) => round,
            _ => return Err(phase_error("reveal role", self.phase)),
        };
        let player = self
            .roster
            .get(player_id)
            .ok_or(GameError::UnknownPlayer { player_id })?;

        let role = round.role_of(player_id);
        let content = round.content();
        Ok(RoleReveal {
            player_id,
            player_name: player.name.clone(),
            role,
            topic: content.topic.clone(),
            secret_word: match role {
                Role::Detective => Some(content.secret_word.clone()),
                Role::Impostor => None,
            },
        })
    }

    // Play machine

    pub fn ready_to_accuse(&mut self) -> Result<(), GameError> {
        self.active_round("start accusation")?.ready_to_accuse()
    }

    pub fn nominate(&mut self, player_id: PlayerId) -> Result<(), GameError> {
        self.active_round("nominate")?.nominate(player_id)
    }

    pub fn accuse(&mut self, player_id: PlayerId) -> Result<AccusationResult, GameError> {
        let result = self.active_round("accuse")?.accuse(player_id)?;
        self.publish_accusation(player_id, result);
        Ok(result)
    }

    pub fn confirm_accusation(&mut self) -> Result<AccusationResult, GameError> {
        let round = self.active_round("confirm accusation")?;
        let target = round.accusation();
        let result = round.confirm_accusation()?;
        if let Some(player_id) = target {
            self.publish_accusation(player_id, result);
        }
        Ok(result)
    }

    pub fn submit_impostor_guess(&mut self, word: &str) -> Result<bool, GameError> {
        let correct = self.active_round("submit guess")?.submit_impostor_guess(word)?;
        self.publish_resolution();
        Ok(correct)
    }

    /// Apply the finished round to the scoreboard (once) and rank players
    pub fn view_scores(&mut self) -> Result<Vec<RankedScore>, GameError> {
        if self.content == ContentStatus::Loading {
            return Err(GameError::ContentLoading);
        }
        self.score_finished_round();
        Ok(self.scoreboard.rankings())
    }

    /// Current standings without applying a finished round
    pub fn rankings(&self) -> Vec<RankedScore> {
        self.scoreboard.rankings()
    }

    pub fn reset_for_new_round(&mut self) -> Result<(), GameError> {
        self.guard(&[GamePhase::Gameplay], "start new round")?;
        self.score_finished_round();
        self.round = None;
        self.scored = false;
        self.set_phase(GamePhase::GameRules);
        Ok(())
    }

    /// Back to the welcome screen. Theme and loaded content survive.
    pub fn reset_game(&mut self) {
        self.player_count = None;
        self.player_names.clear();
        self.roster.clear();
        self.round = None;
        self.round_number = 0;
        self.scored = false;
        self.scoreboard.clear();
        self.set_phase(GamePhase::Welcome);
        self.events.publish(GameEvent::SessionReset {
            session_id: self.id,
        });
    }

    /// Single entry point for presentation-layer actions
    pub fn apply(&mut self, action: ClientAction) -> Result<(), GameError> {
        let action_name = action.name();
        let result = match action {
            ClientAction::Start => self.start(),
            ClientAction::SelectTheme { theme_id } => self.select_theme(&theme_id),
            ClientAction::SelectPlayerCount { count } => self.select_player_count(count),
            ClientAction::UpdatePlayerName { index, name } => self.update_player_name(index, &name),
            ClientAction::ConfirmPlayerNames => self.confirm_player_names(),
            ClientAction::BackToPlayerSelection => self.back_to_player_selection(),
            ClientAction::StartRound => self.start_round(),
            ClientAction::BackToRules => self.back_to_rules(),
            ClientAction::StartGameplay => self.start_gameplay(),
            ClientAction::ReadyToAccuse => self.ready_to_accuse(),
            ClientAction::Nominate { player_id } => self.nominate(player_id),
            ClientAction::Accuse { player_id } => self.accuse(player_id).map(|_| ()),
            ClientAction::SubmitImpostorGuess { word } => {
                self.submit_impostor_guess(&word).map(|_| ())
            }
            ClientAction::NewRound => self.reset_for_new_round(),
            ClientAction::ResetGame => {
                self.reset_game();
                Ok(())
            }
        };

        if let Err(err) = &result {
            warn!("Rejected '{}' during {:?}: {}", action_name, self.phase, err);
        }
        result
    }

    /// Snapshot for the shared screen. Hidden round facts stay hidden
    /// until the round has ended.
    pub fn view(&self) -> SessionView {
        let player_count = self.player_count;
        SessionView {
            session_id: self.id,
            phase: self.phase,
            theme: self.theme.clone(),
            content: self.content.clone(),
            player_count,
            player_names: self.player_names.clone(),
            similar_name_indices: find_similar_name_indices(&self.player_names)
                .into_iter()
                .collect(),
            names_valid: !self.player_names.is_empty()
                && first_empty_name(&self.player_names).is_none(),
            min_players: self.config.min_players,
            max_players: self.config.max_players,
            impostor_count: match player_count {
                Some(count) => self.config.effective_impostor_count(count),
                None => self.config.impostor_count,
            },
            round: self.round.as_ref().map(|round| self.round_view(round)),
            rankings: self.rankings(),
            created_at: self.created_at.to_rfc3339(),
        }
    }

    fn round_view(&self, round: &Round) -> RoundView {
        let assignment = round.assignment();
        RoundView {
            round_number: self.round_number,
            topic: round.content().topic.clone(),
            turn_order: assignment.turn_order.clone(),
            starting_player: assignment.starting_player,
            card_numbers: assignment.card_numbers.clone(),
            impostor_count: assignment.impostors.len(),
            play_phase: (self.phase == GamePhase::Gameplay).then(|| round.phase()),
            active_players: round.active_players(),
            eliminated_players: round.eliminated().to_vec(),
            accusation: round.accusation(),
            outcome: round.outcome().cloned(),
            secret_word: round
                .is_finished()
                .then(|| round.content().secret_word.clone()),
            scored: self.scored,
        }
    }

    fn score_finished_round(&mut self) {
        if self.scored {
            return;
        }
        let Some(round) = self.round.as_ref() else {
            return;
        };
        let Some(outcome) = round.outcome() else {
            return;
        };

        let turn_order: Vec<Player> = round
            .assignment()
            .turn_order
            .iter()
            .filter_map(|&id| self.roster.get(id).cloned())
            .collect();
        let deltas = self.scoreboard.apply_round(outcome, &turn_order);
        self.scored = true;
        self.events.publish(GameEvent::ScoresUpdated {
            session_id: self.id,
            round_number: self.round_number,
            deltas,
        });
    }

    fn publish_accusation(&mut self, player_id: PlayerId, result: AccusationResult) {
        match result {
            AccusationResult::ImpostorCaught => {
                self.events.publish(GameEvent::ImpostorCaught {
                    session_id: self.id,
                    player_id,
                });
            }
            AccusationResult::Eliminated { remaining } => {
                self.events.publish(GameEvent::PlayerEliminated {
                    session_id: self.id,
                    player_id,
                    remaining,
                });
            }
            AccusationResult::ImpostorEscaped => {
                let remaining = self
                    .round
                    .as_ref()
                    .map(|round| round.active_players().len())
                    .unwrap_or_default();
                self.events.publish(GameEvent::PlayerEliminated {
                    session_id: self.id,
                    player_id,
                    remaining,
                });
                self.publish_resolution();
            }
        }
    }

    fn publish_resolution(&mut self) {
        if let Some(outcome) = self.round.as_ref().and_then(Round::outcome).cloned() {
            self.events.publish(GameEvent::RoundResolved {
                session_id: self.id,
                round_number: self.round_number,
                outcome,
            });
        }
    }

    fn active_round(&mut self, action: &str) -> Result<&mut Round, GameError> {
        self.guard(&[GamePhase::Gameplay], action)?;
        let phase = self.phase;
        self.round.as_mut().ok_or_else(|| phase_error(action, phase))
    }

    fn guard(&self, allowed: &[GamePhase], action: &str) -> Result<(), GameError> {
        if self.content == ContentStatus::Loading {
            return Err(GameError::ContentLoading);
        }
        if !allowed.contains(&self.phase) {
            return Err(phase_error(action, self.phase));
        }
        Ok(())
    }

    fn set_phase(&mut self, phase: GamePhase) {
        if self.phase == phase {
            return;
        }
        let from = self.phase;
        self.phase = phase;
        info!("Session {} moved from {:?} to {:?}", self.id, from, phase);
        self.events.publish(GameEvent::PhaseChanged {
            session_id: self.id,
            from,
            to: phase,
        });
    }
}

fn phase_error(action: &str, phase: GamePhase) -> GameError {
    GameError::InvalidGamePhase {
        action: action.to_string(),
        current_phase: format!("{:?}", phase),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch() -> ContentBatch {
        ContentBatch {
            topic: "Animals".to_string(),
            secrets: vec!["Lion".to_string(), "Otter".to_string()],
        }
    }

    fn loaded_session() -> Session {
        let mut session =
            Session::with_seed(GameConfig::default(), ThemeRegistry::builtin(), 11).unwrap();
        let theme = session.begin_content_load();
        session.finish_content_load(&theme.id, Ok(batch())).unwrap();
        session
    }

    fn session_at_rules(count: usize) -> Session {
        let mut session = loaded_session();
        session.start().unwrap();
        session.select_player_count(count).unwrap();
        session.confirm_player_names().unwrap();
        session
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = GameConfig {
            min_players: 2,
            ..GameConfig::default()
        };
        let err = Session::new(config, ThemeRegistry::builtin()).unwrap_err();
        assert!(matches!(err, GameError::InvalidConfig { .. }));
    }

    #[test]
    fn test_player_count_bounds() {
        let mut session = loaded_session();
        session.start().unwrap();

        assert_eq!(
            session.select_player_count(2),
            Err(GameError::InvalidPlayerCount {
                count: 2,
                min: 3,
                max: 10
            })
        );
        assert!(session.select_player_count(11).is_err());
        assert_eq!(session.phase(), GamePhase::PlayerSelection);

        session.select_player_count(3).unwrap();
        assert_eq!(session.player_names(), &["Player 1", "Player 2", "Player 3"]);
    }

    #[test]
    fn test_empty_name_blocks_confirmation() {
        let mut session = loaded_session();
        session.start().unwrap();
        session.select_player_count(3).unwrap();
        session.update_player_name(1, "   ").unwrap();

        assert_eq!(
            session.confirm_player_names(),
            Err(GameError::EmptyPlayerName { index: 1 })
        );
        assert_eq!(session.phase(), GamePhase::PlayerNames);
        assert!(!session.view().names_valid);
    }

    #[test]
    fn test_similar_names_only_warn() {
        let mut session = loaded_session();
        session.start().unwrap();
        session.select_player_count(3).unwrap();
        session.update_player_name(0, "Sam").unwrap();
        session.update_player_name(2, " sam ").unwrap();

        assert_eq!(session.view().similar_name_indices, vec![0, 2]);
        session.confirm_player_names().unwrap();
        assert_eq!(session.roster()[2].name, "sam");
    }

    #[test]
    fn test_update_name_out_of_range() {
        let mut session = loaded_session();
        session.start().unwrap();
        session.select_player_count(4).unwrap();
        assert_eq!(
            session.update_player_name(4, "Zed"),
            Err(GameError::PlayerIndexOutOfRange {
                index: 4,
                player_count: 4
            })
        );
    }

    #[test]
    fn test_wrong_phase_does_not_mutate() {
        let mut session = loaded_session();
        let err = session.start_round().unwrap_err();
        assert_eq!(
            err,
            GameError::InvalidGamePhase {
                action: "start round".to_string(),
                current_phase: "Welcome".to_string(),
            }
        );
        assert_eq!(session.phase(), GamePhase::Welcome);
        assert!(session.round().is_none());
    }

    #[test]
    fn test_start_round_requires_content() {
        let mut session =
            Session::with_seed(GameConfig::default(), ThemeRegistry::builtin(), 1).unwrap();
        session.start().unwrap();
        session.select_player_count(4).unwrap();
        session.confirm_player_names().unwrap();

        assert!(matches!(
            session.start_round(),
            Err(GameError::ContentUnavailable { .. })
        ));

        let theme = session.begin_content_load();
        assert_eq!(session.start_round(), Err(GameError::ContentLoading));
        assert_eq!(session.apply(ClientAction::BackToRules), Err(GameError::ContentLoading));

        let failure = GameError::ContentUnavailable {
            reason: "HTTP 404".to_string(),
        };
        assert!(session.finish_content_load(&theme.id, Err(failure)).is_err());
        assert!(session.needs_content());
        assert_eq!(
            session.start_round(),
            Err(GameError::ContentUnavailable {
                reason: "Round content unavailable: HTTP 404".to_string()
            })
        );

        session.begin_content_load();
        session.finish_content_load(&theme.id, Ok(batch())).unwrap();
        session.start_round().unwrap();
        assert_eq!(session.phase(), GamePhase::TurnOrder);
    }

    #[test]
    fn test_empty_batch_marks_content_failed() {
        let mut session =
            Session::with_seed(GameConfig::default(), ThemeRegistry::builtin(), 3).unwrap();
        let theme = session.begin_content_load();
        let empty = ContentBatch {
            topic: "Animals".to_string(),
            secrets: vec![],
        };
        assert!(session.finish_content_load(&theme.id, Ok(empty)).is_err());
        assert!(matches!(session.content_status(), ContentStatus::Failed { .. }));
    }

    #[test]
    fn test_failed_refetch_keeps_loaded_content() {
        let mut session = session_at_rules(4);
        let theme = session.begin_content_load();
        let failure = GameError::ContentUnavailable {
            reason: "timeout".to_string(),
        };
        assert!(session.finish_content_load(&theme.id, Err(failure)).is_err());

        assert_eq!(
            session.content_status(),
            &ContentStatus::Ready {
                topic: "Animals".to_string(),
                secret_count: 2
            }
        );
        assert!(!session.needs_content());
        session.start_round().unwrap();
        assert_eq!(session.phase(), GamePhase::TurnOrder);
    }

    #[test]
    fn test_view_scores_waits_for_content() {
        let mut session = session_at_rules(3);
        session.begin_content_load();
        assert_eq!(session.view_scores(), Err(GameError::ContentLoading));
        assert_eq!(session.rankings().len(), 3);
    }

    #[test]
    fn test_select_theme_resets_content() {
        let mut session = loaded_session();
        session.select_theme("food").unwrap();
        assert_eq!(session.theme().id, "food");
        assert_eq!(session.content_status(), &ContentStatus::Idle);

        assert_eq!(
            session.select_theme("dinosaurs"),
            Err(GameError::UnknownTheme {
                theme_id: "dinosaurs".to_string()
            })
        );
    }

    #[test]
    fn test_stale_content_is_dropped() {
        let mut session = loaded_session();
        session.select_theme("food").unwrap();
        session.finish_content_load("animals", Ok(batch())).unwrap();
        assert_eq!(session.content_status(), &ContentStatus::Idle);
    }

    #[test]
    fn test_back_transitions() {
        let mut session = loaded_session();
        session.start().unwrap();
        session.select_player_count(5).unwrap();
        session.back_to_player_selection().unwrap();
        assert!(session.player_names().is_empty());
        assert_eq!(session.phase(), GamePhase::PlayerSelection);

        session.select_player_count(3).unwrap();
        session.confirm_player_names().unwrap();
        session.start_round().unwrap();
        assert_eq!(session.round_number(), 1);

        session.back_to_rules().unwrap();
        assert!(session.round().is_none());
        assert_eq!(session.round_number(), 0);
        assert_eq!(session.phase(), GamePhase::GameRules);
    }

    #[test]
    fn test_reveal_role_only_in_round_phases() {
        let mut session = session_at_rules(4);
        assert!(matches!(
            session.reveal_role(0),
            Err(GameError::InvalidGamePhase { .. })
        ));

        session.start_round().unwrap();
        assert_eq!(
            session.reveal_role(7),
            Err(GameError::UnknownPlayer { player_id: 7 })
        );
        let reveal = session.reveal_role(0).unwrap();
        assert_eq!(reveal.topic, "Animals");
        assert_eq!(reveal.is_impostor(), reveal.secret_word.is_none());
    }

    #[test]
    fn test_view_hides_round_secrets_until_round_end() {
        let mut session = session_at_rules(4);
        session.start_round().unwrap();
        session.start_gameplay().unwrap();

        let round = session.view().round.unwrap();
        assert_eq!(round.play_phase, Some(PlayPhase::Discussion));
        assert!(round.secret_word.is_none());
        assert!(round.outcome.is_none());
    }

    #[test]
    fn test_reset_game_keeps_theme_and_content() {
        let mut session = session_at_rules(3);
        session.select_theme("food").unwrap();
        session.reset_game();

        assert_eq!(session.phase(), GamePhase::Welcome);
        assert!(session.roster().is_empty());
        assert!(session.scoreboard().entries().is_empty());
        assert_eq!(session.theme().id, "food");
    }
}
