//! User registration for filestash.

use thiserror::Error;
use tracing::info;

use crate::auth::{hash_password, UserDirectory};
use crate::db::{NewUser, User};
use crate::Result;

/// Registration-specific errors.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("Missing email")]
    MissingEmail,

    #[error("Missing password")]
    MissingPassword,

    /// The email is already registered.
    #[error("Already exist")]
    AlreadyExists,
}

/// Register a new user.
///
/// Checks the fields, rejects an email that is already registered, then
/// stores the password digest.
pub async fn register(
    users: &dyn UserDirectory,
    email: Option<&str>,
    password: Option<&str>,
) -> Result<User> {
    let email = email
        .filter(|e| !e.is_empty())
        .ok_or(RegistrationError::MissingEmail)?;
    let password = password
        .filter(|p| !p.is_empty())
        .ok_or(RegistrationError::MissingPassword)?;

    if users.find_by_email(email).await?.is_some() {
        return Err(RegistrationError::AlreadyExists.into());
    }

    let user = users
        .create(&NewUser::new(email, hash_password(password)))
        .await?;

    info!(user_id = %user.id, email = %user.email, "New user registered");

    Ok(user)
}
