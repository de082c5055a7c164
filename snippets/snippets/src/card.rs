//! What a snippet looks like when listed, e.g. on a user's profile or in search results.

use chrono::{DateTime, Utc};
use tracing::trace;

use crate::snippet::{Snippet, SnippetType};
use crate::time_ago::time_ago;

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SnippetCardOptions {
    /// Base url for snippet images
    pub base_url: String,
    /// Useful in views listing other users' snippets, e.g. starred snippets.
    pub show_owner: bool,
    pub is_current_user_snippet: bool,
    /// Whether the host handles deletion.
    pub delete_enabled: bool,
    pub with_link: bool,
}

impl SnippetCardOptions {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            show_owner: false,
            is_current_user_snippet: false,
            delete_enabled: false,
            with_link: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Visibility {
    Public,
    Private,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum CardAction {
    Delete,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CardImage {
    pub src: String,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SnippetCard {
    pub snippet_id: String,
    pub owner: Option<String>,
    pub name: String,
    pub image: CardImage,
    /// `None` when the card is not a link.
    pub href: Option<String>,
    pub snippet_type: SnippetType,
    pub star_count: u32,
    /// `None` renders as a blank line, keeping card heights equal.
    pub description: Option<String>,
    pub visibility: Visibility,
    pub updated: String,
    pub actions: Vec<CardAction>,
}

impl SnippetCard {
    pub fn build(snippet: &Snippet, options: &SnippetCardOptions, now: DateTime<Utc>) -> Self {
        let image = CardImage {
            src: format!(
                "{}/snippets/images/{}/{}/pcb.svg",
                options.base_url, snippet.owner_name, snippet.unscoped_name
            ),
            alt: format!("{}'s profile", snippet.owner_name),
        };

        let href = options
            .with_link
            .then(|| format!("/{}/{}", snippet.owner_name, snippet.unscoped_name));

        let actions = match options.is_current_user_snippet && options.delete_enabled {
            true => vec![CardAction::Delete],
            false => vec![],
        };

        let visibility = match snippet.is_private {
            true => Visibility::Private,
            false => Visibility::Public,
        };

        let card = SnippetCard {
            snippet_id: snippet.snippet_id.clone(),
            owner: options
                .show_owner
                .then(|| snippet.owner_name.clone()),
            name: snippet.unscoped_name.clone(),
            image,
            href,
            snippet_type: snippet.snippet_type,
            star_count: snippet.star_count,
            description: snippet
                .description
                .clone()
                .filter(|description| !description.is_empty()),
            visibility,
            updated: time_ago(now, snippet.updated_at),
            actions,
        };

        trace!("snippet card: {:?}", card);

        card
    }
}
