use thiserror::Error;

/// Error type for turning tokens into segments and segments into values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CodecError {
    #[error("Token must have exactly three non-empty segments, got {0}")]
    Format(usize),

    #[error("Failed to decode segment: {0}")]
    Decode(String),

    #[error("Failed to encode segment: {0}")]
    Encode(String),
}

/// Decoded claims are missing a field or carry the wrong type.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StructureError {
    #[error("Claims must be a JSON object")]
    NotAnObject,

    #[error("Missing required claim: {0}")]
    MissingClaim(&'static str),

    #[error("Claim '{claim}' must be {expected}")]
    InvalidClaim {
        claim: &'static str,
        expected: &'static str,
    },
}

/// The token's expiry is not after the supplied current time.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("Token expired at {expired_at} (now {now})")]
pub struct ExpiredError {
    pub expired_at: i64,
    pub now: i64,
}
