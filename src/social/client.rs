// Timeline HTTP client — unauthenticated JSON over HTTP.
//
// A thin reqwest wrapper around the two read endpoints the ingestion
// pipeline needs. The service filters replies and reshares server-side
// and supports incremental fetches via `since_id`, so the client stays
// a dumb pipe: build the query, check the status, deserialize.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::error::CoreError;

use super::traits::{Profile, SocialApi, TimelinePost};

/// The API never returns more than this many posts per fetch.
pub const MAX_FETCH: usize = 200;

/// HTTP client for the timeline API.
pub struct TimelineClient {
    client: reqwest::Client,
    base_url: String,
}

impl TimelineClient {
    /// Create a new client pointing at the given base URL.
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("graphite/0.1 (authorship-analysis)")
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Make a GET request to an API path and deserialize the response.
    ///
    /// `params` are query string key-value pairs. A 404 is surfaced as
    /// `Ok(None)` so callers can map it to their own not-found error;
    /// every other non-success status is an upstream failure.
    async fn api_get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<Option<T>> {
        let url = format!("{}{}", self.base_url, path);

        debug!(path = path, "timeline API GET");

        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .with_context(|| format!("Timeline API request failed: {path}"))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Timeline API {path} returned {status}: {body}");
        }

        let parsed = response
            .json::<T>()
            .await
            .with_context(|| format!("Failed to deserialize {path} response"))?;

        Ok(Some(parsed))
    }
}

#[async_trait]
impl SocialApi for TimelineClient {
    async fn lookup_user(&self, username: &str) -> Result<Profile> {
        let resp: Option<UserResponse> = self
            .api_get("/users/lookup", &[("username", username)])
            .await
            .with_context(|| format!("Failed to look up @{username}"))?;

        match resp {
            Some(user) => Ok(Profile {
                id: user.id,
                username: user.username,
            }),
            None => Err(CoreError::UserNotFound(username.to_string()).into()),
        }
    }

    async fn fetch_timeline(
        &self,
        user_id: i64,
        since_id: Option<i64>,
        limit: usize,
    ) -> Result<Vec<TimelinePost>> {
        let user_id_str = user_id.to_string();
        let limit_str = limit.min(MAX_FETCH).to_string();
        let since_str = since_id.map(|id| id.to_string());

        let mut params: Vec<(&str, &str)> = vec![
            ("limit", &limit_str),
            ("exclude_replies", "true"),
            ("include_reshares", "false"),
        ];
        if let Some(ref s) = since_str {
            params.push(("since_id", s));
        }

        let path = format!("/users/{user_id_str}/timeline");
        let resp: Option<TimelineResponse> = self
            .api_get(&path, &params)
            .await
            .with_context(|| format!("Failed to fetch timeline for user {user_id}"))?;

        let posts = resp
            .ok_or_else(|| CoreError::UserNotFound(user_id_str.clone()))?
            .posts
            .into_iter()
            .map(|p| TimelinePost {
                id: p.id,
                text: p.text,
            })
            .collect();

        Ok(posts)
    }
}

// -- Serde types for the timeline API --

#[derive(Deserialize)]
struct UserResponse {
    id: i64,
    username: String,
}

#[derive(Deserialize)]
struct TimelineResponse {
    posts: Vec<PostResponse>,
}

#[derive(Deserialize)]
struct PostResponse {
    id: i64,
    text: String,
}
