// Database trait — backend-agnostic async interface for all DB operations.
//
// The methods mirror the queries.rs function signatures, so callers work
// against `Arc<dyn Database>` and tests can use an in-memory SQLite
// instance through the same interface.

use anyhow::Result;
use async_trait::async_trait;

use super::models::{NewPost, Post, User};

#[async_trait]
pub trait Database: Send + Sync {
    // --- Lifecycle ---

    /// Count the number of user-created tables in the database.
    async fn table_count(&self) -> Result<i64>;

    /// Drop all data and recreate empty tables.
    async fn reset(&self) -> Result<()>;

    // --- Users ---

    /// Get a user by their numeric ID.
    async fn get_user(&self, id: i64) -> Result<Option<User>>;

    /// Get a user by username (case-insensitive).
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;

    /// List all known users, ordered by username.
    async fn list_users(&self) -> Result<Vec<User>>;

    // --- Posts ---

    /// Get all stored posts for a user, newest first.
    async fn posts_for_user(&self, user_id: i64) -> Result<Vec<Post>>;

    /// Count stored posts for one user.
    async fn post_count(&self, user_id: i64) -> Result<u32>;

    /// Count all stored posts.
    async fn total_post_count(&self) -> Result<u32>;

    // --- Sync ---

    /// Atomically persist one sync call: upsert the user row and insert the
    /// batch of new posts. All or nothing.
    async fn commit_sync(&self, user: &User, posts: &[NewPost]) -> Result<()>;
}
