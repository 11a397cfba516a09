use chameleon_core::{GameConfig, GameEvent, GameEventHandler, Session, ThemeRegistry};
use chameleon_types::{ContentBatch, GamePhase, PlayerId};
use std::sync::{Arc, Mutex};

pub const TEST_SEED: u64 = 2024;

/// A small content batch for the default theme
pub fn create_test_batch() -> ContentBatch {
    ContentBatch {
        topic: "Animals".to_string(),
        secrets: vec![
            "Lion".to_string(),
            "Otter".to_string(),
            "Crow".to_string(),
            "Hedgehog".to_string(),
        ],
    }
}

/// Creates a seeded session with content already loaded
pub fn create_test_session() -> Session {
    create_test_session_with(GameConfig::default(), TEST_SEED)
}

pub fn create_test_session_with(config: GameConfig, seed: u64) -> Session {
    let mut session = Session::with_seed(config, ThemeRegistry::builtin(), seed)
        .expect("test config is valid");
    let theme = session.begin_content_load();
    session
        .finish_content_load(&theme.id, Ok(create_test_batch()))
        .expect("test batch is valid");
    session
}

/// Walks the setup machine up to the given phase using `names` as the roster
pub fn advance_to_phase(session: &mut Session, names: &[&str], target: GamePhase) {
    session.start().unwrap();
    if target == GamePhase::PlayerSelection {
        return;
    }

    session.select_player_count(names.len()).unwrap();
    for (index, name) in names.iter().enumerate() {
        session.update_player_name(index, name).unwrap();
    }
    if target == GamePhase::PlayerNames {
        return;
    }

    session.confirm_player_names().unwrap();
    if target == GamePhase::GameRules {
        return;
    }

    session.start_round().unwrap();
    if target == GamePhase::TurnOrder {
        return;
    }

    session.start_gameplay().unwrap();
}

pub fn impostors(session: &Session) -> Vec<PlayerId> {
    session
        .round()
        .expect("round in progress")
        .assignment()
        .impostors
        .iter()
        .copied()
        .collect()
}

pub fn detectives(session: &Session) -> Vec<PlayerId> {
    let impostors = impostors(session);
    session
        .round()
        .expect("round in progress")
        .assignment()
        .turn_order
        .iter()
        .copied()
        .filter(|id| !impostors.contains(id))
        .collect()
}

/// Event collector for testing event emissions
#[derive(Clone)]
pub struct EventCollector {
    events: Arc<Mutex<Vec<GameEvent>>>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn get_events(&self) -> Vec<GameEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }

    pub fn count(&self, check_fn: impl Fn(&GameEvent) -> bool) -> usize {
        self.events.lock().unwrap().iter().filter(|e| check_fn(*e)).count()
    }

    pub fn has_event_type(&self, check_fn: impl Fn(&GameEvent) -> bool) -> bool {
        self.events.lock().unwrap().iter().any(check_fn)
    }
}

impl GameEventHandler for EventCollector {
    fn handle_event(&mut self, event: GameEvent) {
        self.events.lock().unwrap().push(event);
    }
}
