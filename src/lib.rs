//! filestash - authentication and file persistence core
//!
//! Issues and revokes session tokens for registered users, and validates,
//! stores and retrieves file, image and folder entries together with their
//! binary payloads. A thin axum API exposes both over HTTP.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod file;
pub mod logging;
pub mod web;

pub use auth::{
    hash_password, parse_basic_auth, register, AuthService, Credentials, MemorySessionStore,
    RegistrationError, Session, SessionStore, UserDirectory, SESSION_TTL_SECS,
};
pub use config::Config;
pub use db::{Database, NewUser, SessionRepository, User, UserId, UserRepository};
pub use error::{FilestashError, Result};
pub use file::{
    CreateFileRequest, FileCollection, FileId, FileRepository, FileStore, FileType,
    FileValidator, FsBlobWriter, ParentRef, PublicFile, ValidatedFile, ValidationError,
};
pub use web::{create_router, AppState, WebServer};
