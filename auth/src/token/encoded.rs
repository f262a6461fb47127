use std::fmt;

use serde_json::Value;

use super::claims::check_structure;
use super::claims::Claims;
use super::codec;
use super::errors::CodecError;
use super::header::Header;

/// A wire token split into its three encoded segments.
///
/// Immutable once built. Parsing only checks the layout; nothing here
/// verifies the signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    header: String,
    payload: String,
    signature: String,
}

impl Token {
    pub(crate) fn from_segments(header: String, payload: String, signature: String) -> Self {
        Self {
            header,
            payload,
            signature,
        }
    }

    /// Split a wire string into a token.
    ///
    /// # Errors
    /// * `Format` - Not exactly three non-empty segments
    pub fn parse(raw: &str) -> Result<Self, CodecError> {
        let (header, payload, signature) = codec::split_token(raw)?;
        Ok(Self::from_segments(
            header.to_string(),
            payload.to_string(),
            signature.to_string(),
        ))
    }

    pub fn header_segment(&self) -> &str {
        &self.header
    }

    pub fn payload_segment(&self) -> &str {
        &self.payload
    }

    pub fn signature_segment(&self) -> &str {
        &self.signature
    }

    /// The signed portion: `header.payload`.
    pub fn unsigned_message(&self) -> String {
        codec::unsigned_message(&self.header, &self.payload)
    }

    /// Decode the header segment.
    pub fn header(&self) -> Result<Header, CodecError> {
        codec::decode_segment(&self.header)
    }

    /// Decode the payload without checking the signature.
    ///
    /// For display and debugging only. Never base an authorization decision
    /// on claims obtained this way.
    pub fn claims_unverified(&self) -> Result<Claims, CodecError> {
        let payload: Value = codec::decode_segment(&self.payload)?;
        check_structure(&payload).map_err(|e| CodecError::Decode(e.to_string()))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&codec::join_token(
            &self.header,
            &self.payload,
            &self.signature,
        ))
    }
}

impl From<Token> for String {
    fn from(token: Token) -> Self {
        token.to_string()
    }
}
