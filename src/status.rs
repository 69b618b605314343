// System status display — shows DB stats and per-user ingestion state.

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

use crate::db::Database;

/// Display system status to the terminal.
pub async fn show(db: &Arc<dyn Database>, db_display_path: &str) -> Result<()> {
    if !Path::new(db_display_path).exists() {
        println!("Database: not initialized");
        println!("\nRun `graphite init` to set up the database.");
        return Ok(());
    }

    let file_size = std::fs::metadata(db_display_path)
        .map(|m| format_bytes(m.len()))
        .unwrap_or_else(|_| "unknown".to_string());
    println!("Database: {} ({})", db_display_path, file_size);

    let users = db.list_users().await?;
    let total_posts = db.total_post_count().await?;
    println!("Users: {}, stored posts: {}", users.len(), total_posts);

    if users.is_empty() {
        println!("  Run `graphite add <username>` to ingest someone");
        return Ok(());
    }

    for user in &users {
        let count = db.post_count(user.id).await?;
        match user.newest_post_id {
            Some(hwm) => println!("  @{}: {} posts (synced through {})", user.username, count, hwm),
            None => println!("  @{}: {} posts (never synced)", user.username, count),
        }
    }

    Ok(())
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3.0 MB");
    }
}
