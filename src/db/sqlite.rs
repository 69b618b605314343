// SqliteDatabase — rusqlite backend implementing the Database trait.
//
// The Connection is wrapped in tokio::sync::Mutex because Connection is
// !Send. Trait methods lock the mutex, do synchronous rusqlite work, and
// return. The lock is never held across .await points — Rust enforces this
// because MutexGuard is !Send.

use anyhow::Result;
use async_trait::async_trait;
use rusqlite::Connection;
use tokio::sync::Mutex;

use super::models::{NewPost, Post, User};
use super::traits::Database;

pub struct SqliteDatabase {
    conn: Mutex<Connection>,
}

impl SqliteDatabase {
    /// Wrap an already-opened rusqlite Connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }
}

#[async_trait]
impl Database for SqliteDatabase {
    async fn table_count(&self) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::schema::table_count(&conn)
    }

    async fn reset(&self) -> Result<()> {
        let conn = self.conn.lock().await;
        super::schema::reset(&conn)
    }

    async fn get_user(&self, id: i64) -> Result<Option<User>> {
        let conn = self.conn.lock().await;
        super::queries::get_user(&conn, id)
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let conn = self.conn.lock().await;
        super::queries::get_user_by_username(&conn, username)
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        let conn = self.conn.lock().await;
        super::queries::list_users(&conn)
    }

    async fn posts_for_user(&self, user_id: i64) -> Result<Vec<Post>> {
        let conn = self.conn.lock().await;
        super::queries::posts_for_user(&conn, user_id)
    }

    async fn post_count(&self, user_id: i64) -> Result<u32> {
        let conn = self.conn.lock().await;
        super::queries::post_count(&conn, user_id)
    }

    async fn total_post_count(&self) -> Result<u32> {
        let conn = self.conn.lock().await;
        super::queries::total_post_count(&conn)
    }

    async fn commit_sync(&self, user: &User, posts: &[NewPost]) -> Result<()> {
        let mut conn = self.conn.lock().await;
        super::queries::commit_sync(&mut conn, user, posts)
    }
}
