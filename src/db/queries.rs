// Database queries — CRUD operations for users and posts.
//
// Every database interaction goes through this module. This keeps SQL
// contained in one place and gives the rest of the app clean Rust
// interfaces.

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use super::models::{NewPost, Post, User};

// --- Users ---

/// Get a user by their numeric ID.
pub fn get_user(conn: &Connection, id: i64) -> Result<Option<User>> {
    let mut stmt =
        conn.prepare("SELECT id, username, newest_post_id FROM users WHERE id = ?1")?;
    let result = stmt
        .query_row(params![id], |row| {
            Ok(User {
                id: row.get(0)?,
                username: row.get(1)?,
                newest_post_id: row.get(2)?,
            })
        })
        .optional()?;
    Ok(result)
}

/// Get a user by username (case-insensitive).
pub fn get_user_by_username(conn: &Connection, username: &str) -> Result<Option<User>> {
    let mut stmt = conn.prepare(
        "SELECT id, username, newest_post_id FROM users WHERE LOWER(username) = LOWER(?1)",
    )?;
    let result = stmt
        .query_row(params![username], |row| {
            Ok(User {
                id: row.get(0)?,
                username: row.get(1)?,
                newest_post_id: row.get(2)?,
            })
        })
        .optional()?;
    Ok(result)
}

/// List all known users, ordered by username.
pub fn list_users(conn: &Connection) -> Result<Vec<User>> {
    let mut stmt =
        conn.prepare("SELECT id, username, newest_post_id FROM users ORDER BY username")?;
    let users = stmt
        .query_map([], |row| {
            Ok(User {
                id: row.get(0)?,
                username: row.get(1)?,
                newest_post_id: row.get(2)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(users)
}

// --- Posts ---

/// Get all stored posts for a user, newest first.
pub fn posts_for_user(conn: &Connection, user_id: i64) -> Result<Vec<Post>> {
    let mut stmt = conn.prepare(
        "SELECT id, text, embedding, user_id FROM posts WHERE user_id = ?1 ORDER BY id DESC",
    )?;
    let rows = stmt
        .query_map(params![user_id], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, i64>(3)?,
            ))
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    let mut posts = Vec::with_capacity(rows.len());
    for (id, text, embedding_json, user_id) in rows {
        let embedding: Vec<f64> = serde_json::from_str(&embedding_json)
            .with_context(|| format!("Corrupt embedding stored for post {id}"))?;
        posts.push(Post {
            id,
            text,
            embedding,
            user_id,
        });
    }
    Ok(posts)
}

/// Count stored posts for one user.
pub fn post_count(conn: &Connection, user_id: i64) -> Result<u32> {
    let count: u32 = conn.query_row(
        "SELECT COUNT(*) FROM posts WHERE user_id = ?1",
        params![user_id],
        |row| row.get(0),
    )?;
    Ok(count)
}

/// Count all stored posts.
pub fn total_post_count(conn: &Connection) -> Result<u32> {
    let count: u32 = conn.query_row("SELECT COUNT(*) FROM posts", [], |row| row.get(0))?;
    Ok(count)
}

// --- Sync commit ---

/// Persist one sync call's results as a single transaction: upsert the user
/// row (username and high-water-mark) and insert the new posts.
///
/// Post IDs are primary keys with no conflict clause — a duplicate aborts
/// the whole transaction, so a sync can never half-commit.
pub fn commit_sync(conn: &mut Connection, user: &User, posts: &[NewPost]) -> Result<()> {
    let tx = conn.transaction()?;

    tx.execute(
        "INSERT INTO users (id, username, newest_post_id)
         VALUES (?1, ?2, ?3)
         ON CONFLICT(id) DO UPDATE SET
            username = ?2,
            newest_post_id = ?3",
        params![user.id, user.username, user.newest_post_id],
    )?;

    for post in posts {
        let embedding_json = serde_json::to_string(&post.embedding)?;
        tx.execute(
            "INSERT INTO posts (id, text, embedding, user_id) VALUES (?1, ?2, ?3, ?4)",
            params![post.id, post.text, embedding_json, user.id],
        )
        .with_context(|| format!("Failed to insert post {}", post.id))?;
    }

    tx.commit().context("Failed to commit sync transaction")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema::create_tables;

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        conn
    }

    fn new_post(id: i64, text: &str) -> NewPost {
        NewPost {
            id,
            text: text.to_string(),
            embedding: vec![0.1, 0.2, 0.3],
        }
    }

    #[test]
    fn test_get_user_missing() {
        let conn = test_conn();
        assert!(get_user(&conn, 1).unwrap().is_none());
        assert!(get_user_by_username(&conn, "alice").unwrap().is_none());
    }

    #[test]
    fn test_commit_sync_creates_user_and_posts() {
        let mut conn = test_conn();
        let user = User {
            id: 7,
            username: "alice".to_string(),
            newest_post_id: Some(102),
        };
        commit_sync(&mut conn, &user, &[new_post(101, "one"), new_post(102, "two")]).unwrap();

        let stored = get_user_by_username(&conn, "alice").unwrap().unwrap();
        assert_eq!(stored.id, 7);
        assert_eq!(stored.newest_post_id, Some(102));

        let posts = posts_for_user(&conn, 7).unwrap();
        assert_eq!(posts.len(), 2);
        // Newest first
        assert_eq!(posts[0].id, 102);
        assert_eq!(posts[0].embedding, vec![0.1, 0.2, 0.3]);
    }

    #[test]
    fn test_commit_sync_updates_username_and_hwm() {
        let mut conn = test_conn();
        let user = User {
            id: 7,
            username: "alice".to_string(),
            newest_post_id: Some(100),
        };
        commit_sync(&mut conn, &user, &[new_post(100, "first")]).unwrap();

        let renamed = User {
            id: 7,
            username: "alice_v2".to_string(),
            newest_post_id: Some(200),
        };
        commit_sync(&mut conn, &renamed, &[new_post(200, "second")]).unwrap();

        let stored = get_user(&conn, 7).unwrap().unwrap();
        assert_eq!(stored.username, "alice_v2");
        assert_eq!(stored.newest_post_id, Some(200));
        assert_eq!(post_count(&conn, 7).unwrap(), 2);
    }

    #[test]
    fn test_commit_sync_duplicate_post_rolls_back_everything() {
        let mut conn = test_conn();
        let user = User {
            id: 7,
            username: "alice".to_string(),
            newest_post_id: Some(100),
        };
        commit_sync(&mut conn, &user, &[new_post(100, "first")]).unwrap();

        // Second batch contains a fresh post and a duplicate ID. The whole
        // call must fail and leave the store exactly as it was.
        let user2 = User {
            id: 7,
            username: "alice".to_string(),
            newest_post_id: Some(300),
        };
        let result = commit_sync(&mut conn, &user2, &[new_post(300, "fresh"), new_post(100, "dup")]);
        assert!(result.is_err());

        assert_eq!(post_count(&conn, 7).unwrap(), 1);
        let stored = get_user(&conn, 7).unwrap().unwrap();
        assert_eq!(stored.newest_post_id, Some(100), "hwm must not move on a failed sync");
    }

    #[test]
    fn test_username_lookup_is_case_insensitive() {
        let mut conn = test_conn();
        let user = User {
            id: 1,
            username: "Alice".to_string(),
            newest_post_id: None,
        };
        commit_sync(&mut conn, &user, &[]).unwrap();
        assert!(get_user_by_username(&conn, "alice").unwrap().is_some());
        assert!(get_user_by_username(&conn, "ALICE").unwrap().is_some());
    }

    #[test]
    fn test_list_users_ordered() {
        let mut conn = test_conn();
        for (id, name) in [(1, "zoe"), (2, "alice"), (3, "mira")] {
            let user = User {
                id,
                username: name.to_string(),
                newest_post_id: None,
            };
            commit_sync(&mut conn, &user, &[]).unwrap();
        }
        let users = list_users(&conn).unwrap();
        let names: Vec<&str> = users.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, vec!["alice", "mira", "zoe"]);
    }

    #[test]
    fn test_total_post_count() {
        let mut conn = test_conn();
        let user = User {
            id: 1,
            username: "alice".to_string(),
            newest_post_id: Some(2),
        };
        commit_sync(&mut conn, &user, &[new_post(1, "a"), new_post(2, "b")]).unwrap();
        assert_eq!(total_post_count(&conn).unwrap(), 2);
    }
}
