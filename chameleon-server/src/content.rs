use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use chameleon_core::{ContentProvider, validate_batch};
use chameleon_types::{ContentBatch, GameError, ThemeInfo};
use reqwest::Client;
use tracing::{debug, warn};

use crate::config::ContentSource;

#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("Failed to reach content source: {0}")]
    Request(reqwest::Error),
    #[error("Content source returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("Failed to decode content: {0}")]
    Decode(reqwest::Error),
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Malformed content file: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl From<ContentError> for GameError {
    fn from(error: ContentError) -> Self {
        GameError::ContentUnavailable {
            reason: error.to_string(),
        }
    }
}

/// Fetches `<base_url><file_path>` over HTTP
pub struct HttpContentProvider {
    client: Client,
    base_url: String,
}

impl HttpContentProvider {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    async fn fetch(&self, theme: &ThemeInfo) -> Result<ContentBatch, ContentError> {
        let url = format!("{}{}", self.base_url, theme.file_path);
        debug!("Fetching content for theme '{}' from {}", theme.id, url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            warn!("Failed to fetch content: {:?}", e);
            ContentError::Request(e)
        })?;

        if !response.status().is_success() {
            warn!("Content fetch returned status: {}", response.status());
            return Err(ContentError::Status(response.status()));
        }

        response.json().await.map_err(|e| {
            warn!("Failed to parse content JSON: {:?}", e);
            ContentError::Decode(e)
        })
    }
}

#[async_trait]
impl ContentProvider for HttpContentProvider {
    async fn fetch_topic_and_secrets(&self, theme: &ThemeInfo) -> Result<ContentBatch, GameError> {
        let batch = self.fetch(theme).await?;
        validate_batch(batch)
    }
}

/// Reads `<root>/<file_path>` from a local directory
pub struct FileContentProvider {
    root: PathBuf,
}

impl FileContentProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    async fn read(&self, theme: &ThemeInfo) -> Result<ContentBatch, ContentError> {
        let path = self.root.join(theme.file_path.trim_start_matches('/'));
        debug!("Reading content for theme '{}' from {}", theme.id, path.display());

        let raw = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| {
                warn!("Failed to read content file {}: {}", path.display(), source);
                ContentError::Io {
                    path: path.display().to_string(),
                    source,
                }
            })?;
        Ok(serde_json::from_str(&raw)?)
    }
}

#[async_trait]
impl ContentProvider for FileContentProvider {
    async fn fetch_topic_and_secrets(&self, theme: &ThemeInfo) -> Result<ContentBatch, GameError> {
        let batch = self.read(theme).await?;
        validate_batch(batch)
    }
}

pub fn provider_for(source: &ContentSource) -> Arc<dyn ContentProvider> {
    match source {
        ContentSource::Http { base_url } => Arc::new(HttpContentProvider::new(base_url.clone())),
        ContentSource::Directory(root) => Arc::new(FileContentProvider::new(root.clone())),
    }
}
