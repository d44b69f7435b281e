//! Sign-in and sign-out for filestash.
//!
//! [`AuthService`] checks Basic credentials against the user directory and
//! issues opaque tokens stored in the session store. It never touches file
//! metadata.

use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use super::credentials::parse_basic_auth;
use super::session::{session_key, SessionStore, SESSION_TTL_SECS};
use super::{hash_password, UserDirectory};
use crate::db::{User, UserId};
use crate::{FilestashError, Result};

/// A freshly issued session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Opaque token handed to the client.
    pub token: String,
    /// Owner of the session.
    pub user_id: UserId,
}

/// A token resolved against the session store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSession {
    pub user_id: UserId,
    /// Store key the token maps to.
    pub key: String,
}

/// Authentication service.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserDirectory>,
    sessions: Arc<dyn SessionStore>,
    ttl_secs: u64,
}

impl AuthService {
    /// Create a service issuing sessions valid for 24 hours.
    pub fn new(users: Arc<dyn UserDirectory>, sessions: Arc<dyn SessionStore>) -> Self {
        Self {
            users,
            sessions,
            ttl_secs: SESSION_TTL_SECS,
        }
    }

    /// Override the session lifetime.
    pub fn with_ttl(mut self, ttl_secs: u64) -> Self {
        self.ttl_secs = ttl_secs;
        self
    }

    /// Session lifetime in seconds.
    pub fn ttl_secs(&self) -> u64 {
        self.ttl_secs
    }

    /// Sign in with an `Authorization` header value.
    ///
    /// Creates exactly one new session on success; earlier sessions of the
    /// same user are left alone.
    pub async fn sign_in(&self, authorization: Option<&str>) -> Result<Session> {
        let Some(credentials) = parse_basic_auth(authorization) else {
            debug!("Rejected malformed authorization header");
            return Err(FilestashError::Unauthorized);
        };

        let password_hash = hash_password(&credentials.password);
        let Some(user) = self
            .users
            .find_by_credentials(&credentials.email, &password_hash)
            .await?
        else {
            warn!(email = %credentials.email, "Login failed: invalid credentials");
            return Err(FilestashError::Unauthorized);
        };

        let token = Uuid::new_v4().to_string();
        self.sessions
            .set(&session_key(&token), &user.id.to_string(), self.ttl_secs)
            .await?;

        info!(user_id = %user.id, email = %user.email, "Login successful");

        Ok(Session {
            token,
            user_id: user.id,
        })
    }

    /// Sign out the session behind `token`.
    ///
    /// An unknown or already revoked token is `Unauthorized` and changes
    /// nothing.
    pub async fn sign_out(&self, token: Option<&str>) -> Result<()> {
        let resolved = match token {
            Some(token) => self.resolve(token).await?,
            None => None,
        };
        let Some(resolved) = resolved else {
            return Err(FilestashError::Unauthorized);
        };

        self.sessions.del(&resolved.key).await?;
        info!(user_id = %resolved.user_id, "Logout");

        Ok(())
    }

    /// Look up the session behind `token`.
    pub async fn resolve(&self, token: &str) -> Result<Option<ResolvedSession>> {
        let key = session_key(token);
        let Some(value) = self.sessions.get(&key).await? else {
            return Ok(None);
        };

        match value.parse::<UserId>() {
            Ok(user_id) => Ok(Some(ResolvedSession { user_id, key })),
            Err(e) => {
                warn!(error = %e, "Session holds an invalid user id");
                Ok(None)
            }
        }
    }

    /// Drop expired sessions from the store.
    pub async fn purge_expired_sessions(&self) -> Result<u64> {
        self.sessions.purge_expired().await
    }

    /// Load the user owning `token`.
    pub async fn current_user(&self, token: Option<&str>) -> Result<User> {
        let resolved = match token {
            Some(token) => self.resolve(token).await?,
            None => None,
        };
        let resolved = resolved.ok_or(FilestashError::Unauthorized)?;

        self.users
            .find_by_id(resolved.user_id)
            .await?
            .ok_or(FilestashError::Unauthorized)
    }
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("ttl_secs", &self.ttl_secs)
            .finish()
    }
}
