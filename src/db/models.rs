// Data models — Rust structs that map to database rows.
//
// These are the types that flow through the application. They're separate
// from the database queries so other modules can use them without depending
// on rusqlite directly.

use serde::{Deserialize, Serialize};

/// Post text is stored truncated to this many characters.
pub const MAX_POST_CHARS: usize = 300;

/// A known user and their ingestion high-water-mark.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Stable numeric ID assigned by the timeline API.
    pub id: i64,
    /// Display username — may change between syncs; the ID never does.
    pub username: String,
    /// ID of the newest post already ingested. None until the first sync
    /// brings anything in; once set it only ever increases.
    pub newest_post_id: Option<i64>,
}

/// A stored post: truncated text plus the embedding of the full text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// Numeric ID from the timeline API — unique across the whole store.
    pub id: i64,
    pub text: String,
    /// Dense sentence embedding, length = the embedder's output dimension.
    pub embedding: Vec<f64>,
    pub user_id: i64,
}

/// A post waiting to be persisted by `commit_sync`.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub id: i64,
    pub text: String,
    pub embedding: Vec<f64>,
}

/// Truncate text to `MAX_POST_CHARS` characters, safely on char boundaries.
pub fn truncate_text(text: &str) -> String {
    text.chars().take(MAX_POST_CHARS).collect()
}
