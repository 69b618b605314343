// Shared test doubles: an in-memory database, a deterministic fake
// embedder, and a scripted timeline API.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use rusqlite::Connection;

use graphite::db::schema::create_tables;
use graphite::db::{Database, SqliteDatabase};
use graphite::embedder::Embedder;
use graphite::error::CoreError;
use graphite::social::traits::{Profile, SocialApi, TimelinePost};

/// Fresh in-memory database behind the Database trait.
pub fn test_db() -> Arc<dyn Database> {
    let conn = Connection::open_in_memory().unwrap();
    create_tables(&conn).unwrap();
    Arc::new(SqliteDatabase::new(conn))
}

/// Deterministic bag-of-words hashing embedder. Texts sharing vocabulary
/// land near each other, which is enough signal for the classifier tests,
/// and the same text always embeds identically.
pub struct FakeEmbedder {
    pub dim: usize,
    /// When set, embedding any text containing this substring fails —
    /// used to simulate a mid-batch embedding error.
    pub poison: Option<String>,
}

impl FakeEmbedder {
    pub fn new() -> Self {
        Self {
            dim: 16,
            poison: None,
        }
    }

    pub fn poisoned(marker: &str) -> Self {
        Self {
            dim: 16,
            poison: Some(marker.to_string()),
        }
    }
}

pub fn hash_embed(text: &str, dim: usize) -> Vec<f64> {
    let mut vec = vec![0.0_f64; dim];
    for token in text.to_lowercase().split_whitespace() {
        // FNV-1a
        let mut h: u64 = 0xcbf29ce484222325;
        for byte in token.bytes() {
            h ^= byte as u64;
            h = h.wrapping_mul(0x100000001b3);
        }
        vec[(h % dim as u64) as usize] += 1.0;
    }
    let norm: f64 = vec.iter().map(|v| v * v).sum::<f64>().sqrt();
    if norm > 0.0 {
        for v in &mut vec {
            *v /= norm;
        }
    }
    vec
}

#[async_trait]
impl Embedder for FakeEmbedder {
    fn dim(&self) -> usize {
        self.dim
    }

    async fn embed(&self, text: &str) -> Result<Vec<f64>> {
        if let Some(ref marker) = self.poison {
            if text.contains(marker) {
                anyhow::bail!("embedding failed for text containing {marker:?}");
            }
        }
        Ok(hash_embed(text, self.dim))
    }
}

/// Scripted timeline API: per-user profiles and newest-first post lists.
pub struct MockApi {
    users: HashMap<String, Profile>,
    timelines: HashMap<i64, Vec<TimelinePost>>,
    /// When true, `since_id` is ignored — simulates a backend that returns
    /// already-seen or out-of-order posts.
    pub ignore_since: bool,
}

impl MockApi {
    pub fn new() -> Self {
        Self {
            users: HashMap::new(),
            timelines: HashMap::new(),
            ignore_since: false,
        }
    }

    /// Register a user with a newest-first list of (post_id, text).
    pub fn add_user(&mut self, username: &str, id: i64, posts: &[(i64, &str)]) {
        self.users.insert(
            username.to_lowercase(),
            Profile {
                id,
                username: username.to_string(),
            },
        );
        self.timelines.insert(
            id,
            posts
                .iter()
                .map(|(post_id, text)| TimelinePost {
                    id: *post_id,
                    text: text.to_string(),
                })
                .collect(),
        );
    }

    /// Publish a new post at the head of a user's timeline.
    pub fn push_post(&mut self, user_id: i64, post_id: i64, text: &str) {
        self.timelines.entry(user_id).or_default().insert(
            0,
            TimelinePost {
                id: post_id,
                text: text.to_string(),
            },
        );
    }

    /// Rename a user (the numeric ID stays stable).
    pub fn rename_user(&mut self, old: &str, new: &str) {
        if let Some(mut profile) = self.users.remove(&old.to_lowercase()) {
            profile.username = new.to_string();
            self.users.insert(new.to_lowercase(), profile.clone());
            // The old handle still resolves to the same account
            self.users.insert(old.to_lowercase(), profile);
        }
    }
}

#[async_trait]
impl SocialApi for MockApi {
    async fn lookup_user(&self, username: &str) -> Result<Profile> {
        self.users
            .get(&username.to_lowercase())
            .cloned()
            .ok_or_else(|| CoreError::UserNotFound(username.to_string()).into())
    }

    async fn fetch_timeline(
        &self,
        user_id: i64,
        since_id: Option<i64>,
        limit: usize,
    ) -> Result<Vec<TimelinePost>> {
        let posts = self
            .timelines
            .get(&user_id)
            .ok_or_else(|| CoreError::UserNotFound(user_id.to_string()))?;

        let filtered: Vec<TimelinePost> = posts
            .iter()
            .filter(|p| {
                if self.ignore_since {
                    true
                } else {
                    since_id.map_or(true, |since| p.id > since)
                }
            })
            .take(limit)
            .cloned()
            .collect();

        Ok(filtered)
    }
}
