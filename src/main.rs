use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::sync::Arc;
use tracing::info;

use graphite::config::Config;
use graphite::db::{Database, SqliteDatabase};
use graphite::embedder::onnx::OnnxEmbedder;
use graphite::social::client::TimelineClient;

/// Graphite: authorship attribution and topic modeling over social timelines.
///
/// Ingest users' posts with sentence embeddings, then ask which of two users
/// more likely wrote a hypothetical post, or what topics a user posts about.
#[derive(Parser)]
#[command(name = "graphite", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database
    Init,

    /// Download the ONNX embedding model (~90 MB)
    DownloadModel,

    /// Ingest (or refresh) a user's recent posts and show what's stored
    Add {
        /// The username to ingest (e.g. someone)
        username: String,
    },

    /// Re-sync every known user's latest posts
    Update,

    /// List known users and their stored post counts
    Users,

    /// Predict which of two users more likely wrote a hypothetical post
    Predict {
        /// First candidate username
        user_a: String,
        /// Second candidate username
        user_b: String,
        /// The hypothetical post text
        text: String,
    },

    /// Extract topic clusters from a user's stored posts
    Topics {
        /// The username to analyze
        username: String,

        /// Number of topics to extract
        #[arg(long, default_value_t = graphite::topics::DEFAULT_NUM_TOPICS)]
        num_topics: usize,

        /// Words shown per topic
        #[arg(long, default_value_t = graphite::topics::DEFAULT_WORDS_PER_TOPIC)]
        words_per_topic: usize,
    },

    /// Drop all stored users and posts
    Reset,

    /// Show system status (DB stats, per-user sync state)
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("graphite=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => {
            info!("Initializing Graphite database...");
            let config = Config::load()?;
            let db = init_database(&config)?;
            let table_count = db.table_count().await?;
            println!("Database initialized at: {}", config.db_path);
            println!("Tables created: {table_count}");
            println!("\nGraphite is ready. Next step: set up your .env file");
            println!("  (see .env.example for required variables)");
            println!("\nThen run: cargo run -- add <username>");
        }

        Commands::DownloadModel => {
            let config = Config::load()?;

            println!("Downloading embedding model...");
            println!("  Destination: {}", config.model_dir.display());

            graphite::embedder::download::download_model(&config.model_dir).await?;

            println!("\n{}", "Model downloaded successfully.".bold());
            println!("You can now run `graphite add <username>`.");
        }

        Commands::Add { username } => {
            let config = Config::load()?;
            config.require_timeline_api()?;
            let db = open_database(&config)?;
            let embedder = load_embedder(&config)?;
            let client = TimelineClient::new(&config.timeline_api_url)?;

            let username = username.strip_prefix('@').unwrap_or(&username);
            println!("Syncing @{username}...");

            let report =
                graphite::pipeline::sync::sync_user(&client, &embedder, &db, username).await?;

            println!(
                "{}",
                format!("Stored {} new posts for @{}.", report.new_posts, report.username).bold()
            );

            let posts = db.posts_for_user(report.user_id).await?;
            graphite::output::terminal::display_posts(&report.username, &posts);
        }

        Commands::Update => {
            let config = Config::load()?;
            config.require_timeline_api()?;
            let db = open_database(&config)?;
            let embedder = load_embedder(&config)?;
            let client = TimelineClient::new(&config.timeline_api_url)?;

            let users = db.list_users().await?;
            if users.is_empty() {
                println!("No users to update. Run `graphite add <username>` first.");
                return Ok(());
            }

            println!("Updating {} users...", users.len());
            for user in users {
                let report =
                    graphite::pipeline::sync::sync_user(&client, &embedder, &db, &user.username)
                        .await?;
                println!("  @{}: {} new posts", report.username, report.new_posts);
            }
            println!("{}", "All users updated with their latest posts.".bold());
        }

        Commands::Users => {
            let config = Config::load()?;
            let db = open_database(&config)?;

            let users = db.list_users().await?;
            let mut with_counts = Vec::with_capacity(users.len());
            for user in users {
                let count = db.post_count(user.id).await?;
                with_counts.push((user, count));
            }
            graphite::output::terminal::display_users(&with_counts);
        }

        Commands::Predict {
            user_a,
            user_b,
            text,
        } => {
            let config = Config::load()?;
            let db = open_database(&config)?;
            let embedder = load_embedder(&config)?;

            let user_a = user_a.strip_prefix('@').unwrap_or(&user_a).to_string();
            let user_b = user_b.strip_prefix('@').unwrap_or(&user_b).to_string();

            let prediction =
                graphite::predict::predict_author(&db, &embedder, &user_a, &user_b, &text).await?;

            let other = if prediction.username == user_a {
                &user_b
            } else {
                &user_a
            };
            graphite::output::terminal::display_prediction(&text, &prediction, other);
        }

        Commands::Topics {
            username,
            num_topics,
            words_per_topic,
        } => {
            let config = Config::load()?;
            let db = open_database(&config)?;

            let username = username.strip_prefix('@').unwrap_or(&username);
            let user = db
                .get_user_by_username(username)
                .await?
                .ok_or_else(|| graphite::error::CoreError::UserNotFound(username.to_string()))?;

            let posts = db.posts_for_user(user.id).await?;
            let texts: Vec<String> = posts.into_iter().map(|p| p.text).collect();

            let summary = graphite::topics::extract_topics(&texts, num_topics, words_per_topic);
            graphite::output::terminal::display_topics(username, &summary);
        }

        Commands::Reset => {
            let config = Config::load()?;
            let db = open_database(&config)?;
            db.reset().await?;
            println!("Database has been cleared.");
        }

        Commands::Status => {
            let config = Config::load()?;
            let db = open_or_empty_database(&config)?;
            graphite::status::show(&db, &config.db_path).await?;
        }
    }

    Ok(())
}

/// Create (or open) the database and run migrations.
fn init_database(config: &Config) -> Result<Arc<dyn Database>> {
    let conn = graphite::db::initialize(&config.db_path)?;
    Ok(Arc::new(SqliteDatabase::new(conn)))
}

/// Open an existing database; fails with a hint to run `init` first.
fn open_database(config: &Config) -> Result<Arc<dyn Database>> {
    let conn = graphite::db::open(&config.db_path)?;
    Ok(Arc::new(SqliteDatabase::new(conn)))
}

/// Like `open_database`, but tolerates a missing file — `status` renders
/// "not initialized" instead of erroring.
fn open_or_empty_database(config: &Config) -> Result<Arc<dyn Database>> {
    if std::path::Path::new(&config.db_path).exists() {
        open_database(config)
    } else {
        let conn = rusqlite::Connection::open_in_memory()?;
        graphite::db::schema::create_tables(&conn)?;
        Ok(Arc::new(SqliteDatabase::new(conn)))
    }
}

/// Load the embedding model. Missing artifacts are fatal for any command
/// that needs vectors.
fn load_embedder(config: &Config) -> Result<OnnxEmbedder> {
    OnnxEmbedder::load(&config.model_dir)
}
