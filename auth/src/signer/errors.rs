use thiserror::Error;

/// Error type for signing key setup.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum KeyError {
    #[error("Secret key must not be empty")]
    Empty,

    #[error("Secret key rejected by MAC: {0}")]
    InvalidLength(String),
}
