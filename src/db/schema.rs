// Database schema — table creation and migrations.
//
// A `schema_version` table tracks which migrations have run; each migration
// is a function that executes SQL statements. `create_tables` is idempotent
// and safe to call on every startup.

use anyhow::{Context, Result};
use rusqlite::Connection;

/// Create all tables if they don't exist yet.
pub fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        -- Tracks schema version for future migrations
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- Known users. The ID comes from the timeline API and is stable;
        -- the username is a display name and may be rewritten on sync.
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY,
            username TEXT NOT NULL,
            newest_post_id INTEGER       -- high-water-mark, null until first sync
        );

        -- Stored posts. Text is truncated to 300 chars; the embedding is a
        -- JSON array of floats computed from the full text at ingest time.
        CREATE TABLE IF NOT EXISTS posts (
            id INTEGER PRIMARY KEY,
            text TEXT NOT NULL,
            embedding TEXT NOT NULL,
            user_id INTEGER NOT NULL REFERENCES users(id)
        );

        -- Index for gathering a user's posts during prediction
        CREATE INDEX IF NOT EXISTS idx_posts_user
            ON posts(user_id);
        ",
    )
    .context("Failed to create database tables")?;

    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
        [1],
    )?;

    Ok(())
}

/// Drop every data table and recreate them empty.
///
/// This is the `graphite reset` operation — the only way users and posts
/// are ever deleted.
pub fn reset(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        DROP TABLE IF EXISTS posts;
        DROP TABLE IF EXISTS users;
        DROP TABLE IF EXISTS schema_version;
        ",
    )
    .context("Failed to drop tables")?;

    create_tables(conn)
}

/// Count the number of tables in the database (useful for init confirmation).
pub fn table_count(conn: &Connection) -> Result<i64> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
        [],
        |row| row.get(0),
    )?;
    Ok(count)
}
