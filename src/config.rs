use std::env;
use std::path::PathBuf;

use anyhow::Result;

/// Central configuration loaded from environment variables.
///
/// All settings come from env vars; the .env file is loaded automatically
/// at startup via dotenvy.
pub struct Config {
    /// Base URL of the timeline API that serves user lookups and post feeds.
    pub timeline_api_url: String,
    /// Path to the SQLite database file.
    pub db_path: String,
    /// Directory containing the ONNX embedding model files.
    pub model_dir: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Only the timeline API URL has no default — it's required for anything
    /// that talks to the outside world (`add`, `update`).
    pub fn load() -> Result<Self> {
        let model_dir = env::var("GRAPHITE_MODEL_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| crate::embedder::download::default_model_dir());

        Ok(Self {
            timeline_api_url: env::var("TIMELINE_API_URL").unwrap_or_default(),
            db_path: env::var("GRAPHITE_DB_PATH").unwrap_or_else(|_| "./graphite.db".to_string()),
            model_dir,
        })
    }

    /// Check that the timeline API endpoint is configured.
    /// Call this before any operation that fetches posts.
    pub fn require_timeline_api(&self) -> Result<()> {
        if self.timeline_api_url.is_empty() {
            anyhow::bail!(
                "TIMELINE_API_URL not set. Add it to your .env file.\n\
                 See .env.example for the required variables."
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_timeline_api_rejects_empty() {
        let config = Config {
            timeline_api_url: String::new(),
            db_path: "./graphite.db".to_string(),
            model_dir: PathBuf::from("."),
        };
        assert!(config.require_timeline_api().is_err());
    }

    #[test]
    fn test_require_timeline_api_accepts_set() {
        let config = Config {
            timeline_api_url: "https://timeline.example".to_string(),
            db_path: "./graphite.db".to_string(),
            model_dir: PathBuf::from("."),
        };
        assert!(config.require_timeline_api().is_ok());
    }
}
