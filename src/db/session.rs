//! SQLite-backed session store.

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::auth::SessionStore;
use crate::Result;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Repository for session entries.
///
/// Expired rows are invisible to [`SessionStore::get`] and removed by
/// [`SessionStore::purge_expired`].
#[derive(Debug, Clone)]
pub struct SessionRepository {
    pool: SqlitePool,
}

impl SessionRepository {
    /// Create a new SessionRepository on the given pool.
    pub fn new(pool: &SqlitePool) -> Self {
        Self { pool: pool.clone() }
    }

    /// Expiry time of a live entry.
    pub async fn expires_at(&self, key: &str) -> Result<Option<NaiveDateTime>> {
        let raw: Option<String> = sqlx::query_scalar(
            "SELECT expires_at FROM sessions WHERE key = ? AND expires_at > ?",
        )
        .bind(key)
        .bind(format_timestamp(Utc::now()))
        .fetch_optional(&self.pool)
        .await?;

        Ok(raw.and_then(|s| NaiveDateTime::parse_from_str(&s, TIMESTAMP_FORMAT).ok()))
    }
}

#[async_trait]
impl SessionStore for SessionRepository {
    async fn set(&self, key: &str, value: &str, ttl_secs: u64) -> Result<()> {
        let ttl = Duration::seconds(i64::from(u32::try_from(ttl_secs).unwrap_or(u32::MAX)));
        let expires_at = Utc::now()
            .checked_add_signed(ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        sqlx::query("INSERT OR REPLACE INTO sessions (key, value, expires_at) VALUES (?, ?, ?)")
            .bind(key)
            .bind(value)
            .bind(format_timestamp(expires_at))
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let value: Option<String> =
            sqlx::query_scalar("SELECT value FROM sessions WHERE key = ? AND expires_at > ?")
                .bind(key)
                .bind(format_timestamp(Utc::now()))
                .fetch_optional(&self.pool)
                .await?;

        Ok(value)
    }

    async fn del(&self, key: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM sessions WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn purge_expired(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
            .bind(format_timestamp(Utc::now()))
            .execute(&self.pool)
            .await?;

        let removed = result.rows_affected();
        if removed > 0 {
            debug!(removed, "Cleaned up expired sessions");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;

    async fn setup() -> (Database, SessionRepository) {
        let db = Database::open_in_memory().await.unwrap();
        let repo = SessionRepository::new(db.pool());
        (db, repo)
    }

    #[tokio::test]
    async fn test_set_and_get() {
        let (_db, repo) = setup().await;

        repo.set("auth_t", "user-1", 86400).await.unwrap();

        assert_eq!(repo.get("auth_t").await.unwrap().as_deref(), Some("user-1"));
        assert!(repo.get("auth_other").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_expiry_is_ttl_from_now() {
        let (_db, repo) = setup().await;
        let before = Utc::now().naive_utc();

        repo.set("auth_t", "user-1", 86400).await.unwrap();

        let expires_at = repo.expires_at("auth_t").await.unwrap().unwrap();
        let delta = (expires_at - before).num_seconds();
        assert!((86399..=86401).contains(&delta), "delta was {delta}");
    }

    #[tokio::test]
    async fn test_expired_entry_is_hidden() {
        let (_db, repo) = setup().await;

        repo.set("auth_t", "user-1", 0).await.unwrap();

        assert!(repo.get("auth_t").await.unwrap().is_none());
        assert_eq!(repo.purge_expired().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_del() {
        let (_db, repo) = setup().await;
        repo.set("auth_t", "user-1", 60).await.unwrap();

        assert!(repo.del("auth_t").await.unwrap());
        assert!(repo.get("auth_t").await.unwrap().is_none());
        assert!(!repo.del("auth_t").await.unwrap());
    }

    #[tokio::test]
    async fn test_set_replaces_existing() {
        let (_db, repo) = setup().await;
        repo.set("auth_t", "a", 60).await.unwrap();
        repo.set("auth_t", "b", 60).await.unwrap();

        assert_eq!(repo.get("auth_t").await.unwrap().as_deref(), Some("b"));
    }
}
