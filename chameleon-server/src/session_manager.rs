use std::sync::Arc;

use chameleon_core::{ContentProvider, Session};
use chameleon_types::{
    ClientAction, ContentStatus, GameError, PlayerId, RankedScore, RoleReveal, SessionView,
    ThemeInfo,
};
use tokio::sync::RwLock;
use tracing::{info, warn};

/// Owns the single local session and its content source.
/// The session lock is never held while content is being fetched.
pub struct SessionManager {
    session: RwLock<Session>,
    provider: Arc<dyn ContentProvider>,
}

impl SessionManager {
    pub fn new(session: Session, provider: Arc<dyn ContentProvider>) -> Self {
        Self {
            session: RwLock::new(session),
            provider,
        }
    }

    pub async fn view(&self) -> SessionView {
        self.session.read().await.view()
    }

    pub async fn themes(&self) -> Vec<ThemeInfo> {
        self.session.read().await.registry().themes().to_vec()
    }

    /// Apply an action and fetch content if it left the session without any
    pub async fn apply(&self, action: ClientAction) -> Result<SessionView, GameError> {
        let needs_content = {
            let mut session = self.session.write().await;
            session.apply(action)?;
            *session.content_status() == ContentStatus::Idle
        };

        if needs_content {
            // a failed load is reported through the view
            let _ = self.load_content().await;
        }
        Ok(self.view().await)
    }

    /// Fetch content for the selected theme. Doubles as the manual retry.
    pub async fn load_content(&self) -> Result<(), GameError> {
        let theme = self.session.write().await.begin_content_load();
        info!("Fetching content for theme '{}'", theme.id);

        let result = self.provider.fetch_topic_and_secrets(&theme).await;
        if let Err(err) = &result {
            warn!("Content fetch for '{}' failed: {}", theme.id, err);
        }

        self.session
            .write()
            .await
            .finish_content_load(&theme.id, result)
    }

    pub async fn reveal_role(&self, player_id: PlayerId) -> Result<RoleReveal, GameError> {
        self.session.read().await.reveal_role(player_id)
    }

    pub async fn scores(&self) -> Vec<RankedScore> {
        self.session.read().await.rankings()
    }

    /// Score the finished round (at most once) and return the rankings
    pub async fn apply_scores(&self) -> Result<Vec<RankedScore>, GameError> {
        self.session.write().await.view_scores()
    }
}
