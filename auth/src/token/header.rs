use serde::Deserialize;
use serde::Serialize;

/// Token kind tag carried in the header.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TokenType {
    #[serde(rename = "JWT")]
    Jwt,
}

/// Signing algorithm tag carried in the header.
///
/// Only one variant exists; it is never used to pick a signer. A header
/// naming anything else fails to decode.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Algorithm {
    /// HMAC-SHA256 over the unsigned message, hex encoded.
    #[serde(rename = "HS1")]
    Hs1,
}

/// Token header, serialized as `{"typ":"JWT","alg":"HS1"}`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Header {
    pub typ: TokenType,
    pub alg: Algorithm,
}

impl Header {
    pub const fn new() -> Self {
        Self {
            typ: TokenType::Jwt,
            alg: Algorithm::Hs1,
        }
    }
}

impl Default for Header {
    fn default() -> Self {
        Self::new()
    }
}
