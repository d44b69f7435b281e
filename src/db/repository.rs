//! User repository for filestash.
//!
//! SQLite-backed implementation of the [`UserDirectory`] collaborator.

use async_trait::async_trait;
use sqlx::SqlitePool;

use super::user::{NewUser, User, UserId};
use crate::auth::{RegistrationError, UserDirectory};
use crate::{FilestashError, Result};

/// Repository for user operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Create a new UserRepository on the given pool.
    pub fn new(pool: &SqlitePool) -> Self {
        Self { pool: pool.clone() }
    }

    /// Create a new user in the database.
    ///
    /// Returns the created user with the assigned ID. A taken email is
    /// `RegistrationError::AlreadyExists`.
    pub async fn create(&self, new_user: &NewUser) -> Result<User> {
        let id = UserId::new();

        sqlx::query("INSERT INTO users (id, email, password) VALUES (?, ?, ?)")
            .bind(id.to_string())
            .bind(&new_user.email)
            .bind(&new_user.password)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                let taken = e
                    .as_database_error()
                    .is_some_and(|db_err| db_err.is_unique_violation());
                if taken {
                    FilestashError::from(RegistrationError::AlreadyExists)
                } else {
                    FilestashError::from(e)
                }
            })?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| FilestashError::NotFound("user".to_string()))
    }

    /// Get a user by ID.
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT id, email, password FROM users WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    /// Get a user by email.
    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>> {
        let user =
            sqlx::query_as::<_, User>("SELECT id, email, password FROM users WHERE email = ?")
                .bind(email)
                .fetch_optional(&self.pool)
                .await?;

        Ok(user)
    }

    /// Get the user matching both email and password digest.
    pub async fn get_by_credentials(&self, email: &str, password_hash: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password FROM users WHERE email = ? AND password = ?",
        )
        .bind(email)
        .bind(password_hash)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Count all users.
    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[async_trait]
impl UserDirectory for UserRepository {
    async fn find_by_credentials(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<Option<User>> {
        self.get_by_credentials(email, password_hash).await
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>> {
        self.get_by_id(id).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_by_email(email).await
    }

    async fn create(&self, new_user: &NewUser) -> Result<User> {
        UserRepository::create(self, new_user).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::hash_password;
    use crate::Database;

    async fn setup() -> (Database, UserRepository) {
        let db = Database::open_in_memory().await.unwrap();
        let repo = UserRepository::new(db.pool());
        (db, repo)
    }

    #[tokio::test]
    async fn test_create_user() {
        let (_db, repo) = setup().await;

        let user = repo
            .create(&NewUser::new("a@b.com", hash_password("pw")))
            .await
            .unwrap();

        assert_eq!(user.email, "a@b.com");
        assert_eq!(user.password, hash_password("pw"));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let (_db, repo) = setup().await;

        repo.create(&NewUser::new("a@b.com", "x")).await.unwrap();
        let result = repo.create(&NewUser::new("a@b.com", "y")).await;

        assert!(matches!(
            result,
            Err(FilestashError::Registration(RegistrationError::AlreadyExists))
        ));
    }

    #[tokio::test]
    async fn test_get_by_credentials() {
        let (_db, repo) = setup().await;
        let created = repo
            .create(&NewUser::new("a@b.com", hash_password("pw")))
            .await
            .unwrap();

        let found = repo
            .get_by_credentials("a@b.com", &hash_password("pw"))
            .await
            .unwrap();
        assert_eq!(found.unwrap().id, created.id);

        let wrong = repo
            .get_by_credentials("a@b.com", &hash_password("wrong"))
            .await
            .unwrap();
        assert!(wrong.is_none());
    }

    #[tokio::test]
    async fn test_get_by_id_and_email() {
        let (_db, repo) = setup().await;
        let created = repo.create(&NewUser::new("c@d.com", "h")).await.unwrap();

        assert!(repo.get_by_id(created.id).await.unwrap().is_some());
        assert!(repo.get_by_id(UserId::new()).await.unwrap().is_none());
        assert!(repo.get_by_email("c@d.com").await.unwrap().is_some());
        assert!(repo.get_by_email("nobody@d.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_usable_as_directory() {
        let (_db, repo) = setup().await;
        let directory: &dyn UserDirectory = &repo;

        let created = directory
            .create(&NewUser::new("e@f.com", hash_password("secret")))
            .await
            .unwrap();

        let found = directory
            .find_by_credentials("e@f.com", &hash_password("secret"))
            .await
            .unwrap();
        assert_eq!(found.unwrap().id, created.id);
    }
}
