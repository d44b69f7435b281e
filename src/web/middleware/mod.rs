//! Middleware for Web API.

pub mod auth;

pub use auth::{token_from_headers, AuthUser, TOKEN_HEADER};
