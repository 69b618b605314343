// predict_author — which of two users more likely wrote a hypothetical text.
//
// Gathers both users' stored embeddings, fits a fresh binary classifier
// (user_a = 0, user_b = 1), embeds the hypothetical text, and maps the
// predicted label back to a username. Nothing is cached: the model lives
// for exactly one call.

use std::sync::Arc;

use anyhow::Result;
use tracing::debug;

use crate::db::models::User;
use crate::db::Database;
use crate::embedder::Embedder;
use crate::error::CoreError;

use super::logistic::LogisticRegression;

/// The outcome of a pairwise prediction.
#[derive(Debug)]
pub struct Prediction {
    /// The input username the text is attributed to.
    pub username: String,
    /// The winning class probability (always >= 0.5).
    pub confidence: f64,
}

/// Predict which of `user_a` and `user_b` more likely authored `text`.
///
/// Fails with a typed error when the two names are equal, when either user
/// is unknown to the store, or when either has no stored posts (a one-class
/// training set is degenerate).
pub async fn predict_author(
    db: &Arc<dyn Database>,
    embedder: &dyn Embedder,
    user_a: &str,
    user_b: &str,
    text: &str,
) -> Result<Prediction> {
    // Rejected before any training happens — this is a user error, not a
    // classifier error.
    if user_a.eq_ignore_ascii_case(user_b) {
        return Err(CoreError::SameUser(user_a.to_string()).into());
    }

    let a_vecs = stored_embeddings(db, user_a).await?;
    let b_vecs = stored_embeddings(db, user_b).await?;

    debug!(
        user_a = user_a,
        user_b = user_b,
        a_posts = a_vecs.len(),
        b_posts = b_vecs.len(),
        "Training pairwise classifier"
    );

    // X matrix: user_a's embeddings labeled 0.0, user_b's labeled 1.0
    let mut features = Vec::with_capacity(a_vecs.len() + b_vecs.len());
    let mut labels = Vec::with_capacity(a_vecs.len() + b_vecs.len());
    for vec in a_vecs {
        features.push(vec);
        labels.push(0.0);
    }
    for vec in b_vecs {
        features.push(vec);
        labels.push(1.0);
    }

    let dim = features[0].len();
    if dim != embedder.dim() {
        anyhow::bail!(
            "Stored embeddings are {dim}-dimensional but the embedder produces {} — \
             the store was built with a different model",
            embedder.dim()
        );
    }

    let model = LogisticRegression::fit(&features, &labels)?;

    let query = embedder.embed(text).await?;
    let p_user_b = model.predict_proba(&query);

    let (username, confidence) = if p_user_b >= 0.5 {
        (user_b.to_string(), p_user_b)
    } else {
        (user_a.to_string(), 1.0 - p_user_b)
    };

    Ok(Prediction {
        username,
        confidence,
    })
}

/// Load a user's stored embeddings, failing with a typed error when the
/// user is unknown or has nothing stored.
async fn stored_embeddings(db: &Arc<dyn Database>, username: &str) -> Result<Vec<Vec<f64>>> {
    let user: User = db
        .get_user_by_username(username)
        .await?
        .ok_or_else(|| CoreError::UserNotFound(username.to_string()))?;

    let posts = db.posts_for_user(user.id).await?;
    if posts.is_empty() {
        return Err(CoreError::NoPosts(username.to_string()).into());
    }

    Ok(posts.into_iter().map(|p| p.embedding).collect())
}
