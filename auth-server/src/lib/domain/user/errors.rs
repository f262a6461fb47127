use thiserror::Error;

/// Error for Username validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("Username too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Username too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error(
        "Username contains invalid characters (only alphanumeric, underscore, and hyphen allowed)"
    )]
    InvalidCharacters,
}

/// Top-level error for all user-related operations
#[derive(Debug, Clone, Error)]
pub enum UserError {
    #[error("Invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    #[error("User not found: {0}")]
    NotFound(i64),

    #[error("Username already exists: {0}")]
    UsernameAlreadyExists(String),

    #[error("User id already exists: {0}")]
    IdAlreadyExists(i64),

    #[error("Wrong credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    Password(#[from] auth::PasswordError),

    #[error("Token issuance failed: {0}")]
    TokenIssuance(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<auth::IssueError> for UserError {
    fn from(err: auth::IssueError) -> Self {
        match err {
            auth::IssueError::InvalidCredentials => UserError::InvalidCredentials,
            auth::IssueError::Password(e) => UserError::Password(e),
            auth::IssueError::Encoding(e) => UserError::TokenIssuance(e.to_string()),
        }
    }
}

impl From<anyhow::Error> for UserError {
    fn from(err: anyhow::Error) -> Self {
        UserError::Unknown(err.to_string())
    }
}
