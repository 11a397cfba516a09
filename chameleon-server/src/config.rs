use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use chameleon_core::{
    DEFAULT_MAX_PLAYERS, DEFAULT_MIN_PLAYERS, DEFAULT_NUMBER_OF_CHAMELEONS, DEFAULT_THEME_ID,
    GameConfig,
};

/// Where theme content files are served from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSource {
    Http { base_url: String },
    Directory(PathBuf),
}

impl ContentSource {
    pub fn parse(value: &str) -> Self {
        if value.starts_with("http://") || value.starts_with("https://") {
            ContentSource::Http {
                base_url: value.trim_end_matches('/').to_string(),
            }
        } else {
            ContentSource::Directory(PathBuf::from(value))
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub content_source: ContentSource,
    pub game: GameConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let game = GameConfig {
            min_players: parse_or(&lookup, "MIN_PLAYERS", DEFAULT_MIN_PLAYERS)?,
            max_players: parse_or(&lookup, "MAX_PLAYERS", DEFAULT_MAX_PLAYERS)?,
            impostor_count: parse_or(
                &lookup,
                "NUMBER_OF_CHAMELEONS",
                DEFAULT_NUMBER_OF_CHAMELEONS,
            )?,
            default_theme: lookup("DEFAULT_THEME").unwrap_or_else(|| DEFAULT_THEME_ID.to_string()),
            seed: lookup("GAME_SEED")
                .map(|raw| raw.parse().context("Invalid GAME_SEED"))
                .transpose()?,
        };
        game.validate()?;

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse_or(&lookup, "PORT", 8080)?,
            content_source: ContentSource::parse(
                &lookup("CONTENT_SOURCE").unwrap_or_else(|| "./content".to_string()),
            ),
            game,
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid {}: {:?}", key, raw)),
        None => Ok(default),
    }
}
