use thiserror::Error;

/// Error type for password hashing operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Stored password hash is invalid: {0}")]
    InvalidHash(String),

    #[error("Invalid hashing parameters: {0}")]
    InvalidParams(String),
}
