use chrono::{DateTime, Utc};
use serde_with::{serde_as, DefaultOnNull};
use strum_macros::{Display, EnumString};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SnippetType {
    #[default]
    Board,
    Package,
    Model,
    Footprint,
}

/// A saved circuit snippet, as listed by the snippets api.
#[serde_as]
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Snippet {
    pub snippet_id: String,
    /// e.g. `seveibar/led-matrix`
    pub name: String,
    /// e.g. `led-matrix`
    pub unscoped_name: String,
    pub owner_name: String,

    #[serde(default)]
    pub snippet_type: SnippetType,
    #[serde(default)]
    pub description: Option<String>,

    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub star_count: u32,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub is_private: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
