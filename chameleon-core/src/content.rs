use std::collections::HashMap;

use async_trait::async_trait;
use chameleon_types::{ContentBatch, GameError, ThemeInfo};

/// Source of topic/secret batches for a theme
#[async_trait]
pub trait ContentProvider: Send + Sync {
    async fn fetch_topic_and_secrets(&self, theme: &ThemeInfo) -> Result<ContentBatch, GameError>;
}

/// Reject batches a round cannot be dealt from
pub fn validate_batch(batch: ContentBatch) -> Result<ContentBatch, GameError> {
    if batch.secrets.is_empty() {
        return Err(GameError::ContentUnavailable {
            reason: format!("topic '{}' has no secret words", batch.topic),
        });
    }
    Ok(batch)
}

/// In-memory provider keyed by theme id
#[derive(Debug, Clone, Default)]
pub struct StaticContentProvider {
    batches: HashMap<String, ContentBatch>,
}

impl StaticContentProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_batch(mut self, theme_id: &str, batch: ContentBatch) -> Self {
        self.batches.insert(theme_id.to_string(), batch);
        self
    }
}

#[async_trait]
impl ContentProvider for StaticContentProvider {
    async fn fetch_topic_and_secrets(&self, theme: &ThemeInfo) -> Result<ContentBatch, GameError> {
        let batch = self
            .batches
            .get(&theme.id)
            .cloned()
            .ok_or_else(|| GameError::ContentUnavailable {
                reason: format!("no content for theme '{}'", theme.id),
            })?;
        validate_batch(batch)
    }
}
