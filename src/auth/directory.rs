//! User directory collaborator.

use async_trait::async_trait;

use crate::db::{NewUser, User, UserId};
use crate::Result;

/// Read access to registered users, plus creation for registration.
///
/// Lookups by credentials compare the stored digest by equality; callers
/// hash the presented password before asking.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Find the user with this email and password digest.
    async fn find_by_credentials(&self, email: &str, password_hash: &str)
        -> Result<Option<User>>;

    /// Find a user by ID.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>>;

    /// Find a user by email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Store a new user and return it with its assigned ID.
    async fn create(&self, new_user: &NewUser) -> Result<User>;
}
