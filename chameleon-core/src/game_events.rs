use chameleon_types::{GamePhase, PlayerId, PlayerScore, RoundOutcome, SessionId};
use tracing::info;

#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    PhaseChanged {
        session_id: SessionId,
        from: GamePhase,
        to: GamePhase,
    },
    ContentLoaded {
        session_id: SessionId,
        theme_id: String,
        topic: String,
        secret_count: usize,
    },
    ContentFailed {
        session_id: SessionId,
        theme_id: String,
        reason: String,
    },
    RoundStarted {
        session_id: SessionId,
        round_number: u32,
        topic: String,
        starting_player: PlayerId,
        impostor_count: usize,
    },
    PlayerEliminated {
        session_id: SessionId,
        player_id: PlayerId,
        remaining: usize,
    },
    ImpostorCaught {
        session_id: SessionId,
        player_id: PlayerId,
    },
    RoundResolved {
        session_id: SessionId,
        round_number: u32,
        outcome: RoundOutcome,
    },
    ScoresUpdated {
        session_id: SessionId,
        round_number: u32,
        deltas: Vec<(PlayerId, PlayerScore)>,
    },
    SessionReset {
        session_id: SessionId,
    },
}

impl GameEvent {
    pub fn session_id(&self) -> SessionId {
        match self {
            GameEvent::PhaseChanged { session_id, .. } => *session_id,
            GameEvent::ContentLoaded { session_id, .. } => *session_id,
            GameEvent::ContentFailed { session_id, .. } => *session_id,
            GameEvent::RoundStarted { session_id, .. } => *session_id,
            GameEvent::PlayerEliminated { session_id, .. } => *session_id,
            GameEvent::ImpostorCaught { session_id, .. } => *session_id,
            GameEvent::RoundResolved { session_id, .. } => *session_id,
            GameEvent::ScoresUpdated { session_id, .. } => *session_id,
            GameEvent::SessionReset { session_id } => *session_id,
        }
    }
}

/// Event handler trait for processing game events
pub trait GameEventHandler: Send + Sync {
    fn handle_event(&mut self, event: GameEvent);
}

/// Writes every event to the tracing log. Never includes the secret word.
#[derive(Debug, Default)]
pub struct TracingEventHandler;

impl GameEventHandler for TracingEventHandler {
    fn handle_event(&mut self, event: GameEvent) {
        match &event {
            GameEvent::PhaseChanged { from, to, .. } => {
                info!(session = %event.session_id(), "Phase {:?} -> {:?}", from, to)
            }
            GameEvent::ContentLoaded {
                theme_id,
                topic,
                secret_count,
                ..
            } => info!(
                session = %event.session_id(),
                "Loaded {} secrets for theme '{}' (topic '{}')", secret_count, theme_id, topic
            ),
            GameEvent::ContentFailed {
                theme_id, reason, ..
            } => info!(
                session = %event.session_id(),
                "Content for theme '{}' failed: {}", theme_id, reason
            ),
            GameEvent::RoundStarted {
                round_number,
                topic,
                starting_player,
                impostor_count,
                ..
            } => info!(
                session = %event.session_id(),
                "Round {} started on '{}', player {} first, {} impostor(s)",
                round_number, topic, starting_player, impostor_count
            ),
            GameEvent::PlayerEliminated {
                player_id,
                remaining,
                ..
            } => info!(
                session = %event.session_id(),
                "Player {} eliminated, {} remain", player_id, remaining
            ),
            GameEvent::ImpostorCaught { player_id, .. } => {
                info!(session = %event.session_id(), "Impostor {} caught", player_id)
            }
            GameEvent::RoundResolved {
                round_number,
                outcome,
                ..
            } => info!(
                session = %event.session_id(),
                "Round {} resolved, caught: {}, word guessed: {}",
                round_number, outcome.impostor_caught, outcome.impostor_word_guess_correct
            ),
            GameEvent::ScoresUpdated {
                round_number,
                deltas,
                ..
            } => info!(
                session = %event.session_id(),
                "Scored round {} for {} players", round_number, deltas.len()
            ),
            GameEvent::SessionReset { .. } => {
                info!(session = %event.session_id(), "Session reset")
            }
        }
    }
}

/// Simple event bus for distributing game events
pub struct GameEventBus {
    handlers: Vec<Box<dyn GameEventHandler>>,
}

impl GameEventBus {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn add_handler(&mut self, handler: Box<dyn GameEventHandler>) {
        self.handlers.push(handler);
    }

    pub fn publish(&mut self, event: GameEvent) {
        for handler in &mut self.handlers {
            handler.handle_event(event.clone());
        }
    }
}

impl Default for GameEventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for GameEventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEventBus")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
