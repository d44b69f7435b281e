//! Authentication module for filestash.
//!
//! This module provides password digests, Basic header parsing, session
//! storage, user registration and the sign-in/sign-out service.

mod credentials;
mod directory;
mod password;
mod registration;
mod service;
mod session;

pub use credentials::{parse_basic_auth, Credentials};
pub use directory::UserDirectory;
pub use password::hash_password;
pub use registration::{register, RegistrationError};
pub use service::{AuthService, ResolvedSession, Session};
pub use session::{
    session_key, MemorySessionStore, SessionStore, SESSION_KEY_PREFIX, SESSION_TTL_SECS,
};
