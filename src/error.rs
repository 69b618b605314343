// Typed errors for the core operations.
//
// Most of the codebase propagates anyhow::Error with context strings, but
// the failure modes callers need to tell apart get a concrete type here:
// a missing user is not the same as a degenerate comparison, and the CLI
// (or any future frontend) renders them differently. Typed errors still
// travel through anyhow and stay downcastable at the edge.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// The username is unknown to the timeline API or to the local store.
    #[error("user @{0} not found")]
    UserNotFound(String),

    /// Both sides of a pairwise comparison name the same user.
    #[error("cannot compare @{0} to themselves")]
    SameUser(String),

    /// A user exists but has no stored posts, so there is nothing to train on.
    #[error("@{0} has no stored posts — run `graphite add {0}` first")]
    NoPosts(String),

    /// The embedding model artifact is missing or unloadable. Fatal: nothing
    /// that touches text can run without it.
    #[error("embedding model unavailable: {0}")]
    ModelLoad(String),
}
