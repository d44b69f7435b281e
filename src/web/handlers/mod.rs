//! API handlers.

pub mod auth;
pub mod file;
pub mod status;
pub mod user;

pub use auth::*;
pub use file::*;
pub use status::*;
pub use user::*;

use std::path::PathBuf;
use std::sync::Arc;

use crate::auth::{AuthService, SessionStore, UserDirectory};
use crate::db::UserRepository;
use crate::file::{BlobWriter, FileRepository, FileStore, FileValidator, FsBlobWriter};
use crate::Database;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database handle, used for health checks.
    pub db: Database,
    pub auth: AuthService,
    pub users: Arc<dyn UserDirectory>,
    pub validator: FileValidator,
    pub files: FileStore,
    /// Directory receiving uploaded payloads.
    pub blob_root: PathBuf,
}

impl AppState {
    /// Wire the services on top of `db`, using `sessions` for tokens and
    /// the local filesystem for blobs.
    pub fn new(db: Database, sessions: Arc<dyn SessionStore>, blob_root: impl Into<PathBuf>) -> Self {
        let users: Arc<dyn UserDirectory> = Arc::new(UserRepository::new(db.pool()));
        let files = Arc::new(FileRepository::new(db.pool()));

        Self {
            auth: AuthService::new(users.clone(), sessions),
            users,
            validator: FileValidator::new(files.clone()),
            files: FileStore::new(files, Arc::new(FsBlobWriter)),
            blob_root: blob_root.into(),
            db,
        }
    }

    /// Override the session lifetime.
    pub fn with_session_ttl(mut self, ttl_secs: u64) -> Self {
        self.auth = self.auth.with_ttl(ttl_secs);
        self
    }

    /// Write blobs through `blobs` instead of the local filesystem.
    pub fn with_blob_writer(mut self, blobs: Arc<dyn BlobWriter>) -> Self {
        self.files = FileStore::new(Arc::new(FileRepository::new(self.db.pool())), blobs);
        self
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("auth", &self.auth)
            .field("blob_root", &self.blob_root)
            .finish()
    }
}
