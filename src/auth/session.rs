//! Session storage for filestash.
//!
//! Sessions are plain key/value entries with an expiry, written as
//! `"auth_" + token -> user_id`. The store itself is a collaborator so the
//! service can run against SQLite or an in-process map.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::Result;

/// Session lifetime (24 hours).
pub const SESSION_TTL_SECS: u64 = 24 * 60 * 60;

/// Prefix of every session key.
pub const SESSION_KEY_PREFIX: &str = "auth_";

/// Build the store key for a session token.
pub fn session_key(token: &str) -> String {
    format!("{SESSION_KEY_PREFIX}{token}")
}

/// Key/value store with per-entry expiry.
///
/// Each call must be atomic with respect to the others.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Set `key` to `value`, expiring after `ttl_secs`.
    async fn set(&self, key: &str, value: &str, ttl_secs: u64) -> Result<()>;

    /// Get the value of `key` if present and not expired.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Delete `key`. Returns whether an entry was removed.
    async fn del(&self, key: &str) -> Result<bool>;

    /// Drop every expired entry. Returns how many were removed.
    async fn purge_expired(&self) -> Result<u64>;
}

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    ttl_secs: u64,
    /// `None` when the TTL overflows the clock.
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|at| Instant::now() >= at)
    }
}

/// In-process session store.
///
/// Expired entries are dropped lazily when read, or in bulk by
/// [`SessionStore::purge_expired`].
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: Mutex<HashMap<String, Entry>>,
}

impl MemorySessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// TTL the live entry at `key` was written with.
    pub async fn ttl_secs(&self, key: &str) -> Option<u64> {
        let entries = self.entries.lock().await;
        entries
            .get(key)
            .filter(|e| !e.is_expired())
            .map(|e| e.ttl_secs)
    }

    /// Number of stored entries, expired ones included.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    /// Whether the store holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn set(&self, key: &str, value: &str, ttl_secs: u64) -> Result<()> {
        let entry = Entry {
            value: value.to_string(),
            ttl_secs,
            expires_at: Instant::now().checked_add(Duration::from_secs(ttl_secs)),
        };
        self.entries.lock().await.insert(key.to_string(), entry);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut entries = self.entries.lock().await;
        match entries.get(key) {
            Some(entry) if entry.is_expired() => {
                entries.remove(key);
                Ok(None)
            }
            Some(entry) => Ok(Some(entry.value.clone())),
            None => Ok(None),
        }
    }

    async fn del(&self, key: &str) -> Result<bool> {
        Ok(self.entries.lock().await.remove(key).is_some())
    }

    async fn purge_expired(&self) -> Result<u64> {
        let mut entries = self.entries.lock().await;
        let before = entries.len();
        entries.retain(|_, e| !e.is_expired());
        let removed = (before - entries.len()) as u64;
        if removed > 0 {
            debug!(removed, "Purged expired sessions");
        }
        Ok(removed)
    }
}
