use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Entry of the theme registry. Selecting a theme changes where the
/// round content is fetched from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ThemeInfo {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub file_path: String, // relative to the content source
}

/// Topic plus candidate secret words, as served by a content provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ContentBatch {
    pub topic: String,
    pub secrets: Vec<String>,
}
