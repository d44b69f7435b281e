//! Response DTOs for Web API.

use serde::Serialize;

use crate::db::{User, UserId};

/// Sign-in response.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Public view of a user.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: UserId,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
        }
    }
}

/// Liveness of the backing stores.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub db: bool,
}
