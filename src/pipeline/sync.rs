// Ingestion — pull a user's new posts, embed them, and persist the batch.
//
// One sync call is all-or-nothing: every fetched post is embedded up front,
// and the user row plus the post batch go into the store in a single
// transaction. A failure anywhere (API, embedder, SQLite) leaves the store
// untouched and the error propagates to the caller unchanged.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::db::models::{truncate_text, NewPost, User};
use crate::db::Database;
use crate::embedder::Embedder;
use crate::social::client::MAX_FETCH;
use crate::social::traits::SocialApi;

/// What one sync call did.
#[derive(Debug)]
pub struct SyncReport {
    pub user_id: i64,
    pub username: String,
    /// How many new posts were fetched, embedded, and stored.
    pub new_posts: usize,
}

/// Sync one user: resolve their ID, fetch posts newer than the stored
/// high-water-mark, embed each one, and commit the batch atomically.
///
/// Calling this again when nothing new has been published is a no-op for
/// posts (the incremental fetch comes back empty) and leaves the
/// high-water-mark where it was.
pub async fn sync_user(
    api: &dyn SocialApi,
    embedder: &dyn Embedder,
    db: &Arc<dyn Database>,
    username: &str,
) -> Result<SyncReport> {
    let profile = api.lookup_user(username).await?;

    let user = db.get_user(profile.id).await?.unwrap_or(User {
        id: profile.id,
        username: profile.username.clone(),
        newest_post_id: None,
    });

    let batch = api
        .fetch_timeline(profile.id, user.newest_post_id, MAX_FETCH)
        .await
        .with_context(|| format!("Failed to fetch timeline for @{username}"))?;

    debug!(
        user_id = profile.id,
        fetched = batch.len(),
        since_id = ?user.newest_post_id,
        "Fetched timeline batch"
    );

    // Embed every post before anything is written. The batch arrives
    // newest-first and is stored in that order.
    let texts: Vec<String> = batch.iter().map(|p| p.text.clone()).collect();
    let embeddings = embedder
        .embed_batch(&texts)
        .await
        .context("Failed to embed fetched posts")?;

    let new_posts: Vec<NewPost> = batch
        .iter()
        .zip(embeddings)
        .map(|(post, embedding)| NewPost {
            id: post.id,
            text: truncate_text(&post.text),
            embedding,
        })
        .collect();

    // High-water-mark: take the batch maximum rather than trusting the
    // API's first-item ordering, and never let the stored value regress.
    let batch_max = new_posts.iter().map(|p| p.id).max();
    let newest_post_id = match (batch_max, user.newest_post_id) {
        (Some(batch), Some(stored)) => Some(batch.max(stored)),
        (Some(batch), None) => Some(batch),
        (None, stored) => stored,
    };

    let updated = User {
        id: profile.id,
        // The lookup response carries the canonical current username
        username: profile.username.clone(),
        newest_post_id,
    };

    db.commit_sync(&updated, &new_posts).await?;

    info!(
        user = %profile.username,
        new_posts = new_posts.len(),
        "Sync committed"
    );

    Ok(SyncReport {
        user_id: profile.id,
        username: profile.username,
        new_posts: new_posts.len(),
    })
}
