// Social API trait — the swap-ready abstraction over the timeline service.
//
// Ingestion only needs two calls: resolve a username to its stable numeric
// ID, and fetch a page of that user's recent posts. Keeping this behind a
// trait means tests can feed the pipeline canned timelines without HTTP.

use anyhow::Result;
use async_trait::async_trait;

/// A resolved user profile from the timeline API.
#[derive(Debug, Clone)]
pub struct Profile {
    /// Stable numeric ID — survives display-name changes.
    pub id: i64,
    pub username: String,
}

/// A single post as returned by the timeline API.
#[derive(Debug, Clone)]
pub struct TimelinePost {
    pub id: i64,
    pub text: String,
}

/// Trait for the external social API. Implementations must be async because
/// the real backend is an HTTP service.
#[async_trait]
pub trait SocialApi: Send + Sync {
    /// Resolve a username to its profile (numeric ID + canonical username).
    async fn lookup_user(&self, username: &str) -> Result<Profile>;

    /// Fetch up to `limit` of a user's most recent posts, newest first.
    ///
    /// When `since_id` is set, only posts with a strictly greater ID are
    /// returned. Replies and reshares are excluded server-side — every
    /// returned post was authored by the user.
    async fn fetch_timeline(
        &self,
        user_id: i64,
        since_id: Option<i64>,
        limit: usize,
    ) -> Result<Vec<TimelinePost>>;
}
