//! Error types for filestash.

use thiserror::Error;

use crate::auth::RegistrationError;
use crate::file::ValidationError;

/// Common error type for filestash.
#[derive(Error, Debug)]
pub enum FilestashError {
    /// Database error.
    ///
    /// Wraps failures from the document, user and session stores.
    /// Errors from sqlx are automatically converted.
    #[error("database error: {0}")]
    Database(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing or bad credentials, or an unknown session token.
    #[error("Unauthorized")]
    Unauthorized,

    /// A file creation request was rejected.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// A registration request was rejected.
    #[error("{0}")]
    Registration(#[from] RegistrationError),

    /// The payload could not be written to the blob area.
    #[error("{0}")]
    Storage(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<sqlx::Error> for FilestashError {
    fn from(e: sqlx::Error) -> Self {
        FilestashError::Database(e.to_string())
    }
}

/// Result type alias for filestash operations.
pub type Result<T> = std::result::Result<T, FilestashError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_display() {
        assert_eq!(FilestashError::Unauthorized.to_string(), "Unauthorized");
    }

    #[test]
    fn test_validation_error_display() {
        let err: FilestashError = ValidationError::MissingName.into();
        assert_eq!(err.to_string(), "Missing name");
    }

    #[test]
    fn test_registration_error_display() {
        let err: FilestashError = RegistrationError::AlreadyExists.into();
        assert_eq!(err.to_string(), "Already exist");
    }

    #[test]
    fn test_storage_error_display() {
        let err = FilestashError::Storage("permission denied".to_string());
        assert_eq!(err.to_string(), "permission denied");
    }

    #[test]
    fn test_not_found_error_display() {
        let err = FilestashError::NotFound("file".to_string());
        assert_eq!(err.to_string(), "file not found");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: FilestashError = io_err.into();
        assert!(matches!(err, FilestashError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }
}
