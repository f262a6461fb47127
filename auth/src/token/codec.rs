//! Wire codec for the three-segment token.
//!
//! ```text
//! B64(header_json) . B64(payload_json) . B64(hex(mac))
//! ```
//!
//! `B64` is standard base64 with padding. Its alphabet never contains the `.`
//! delimiter, so splitting a token is unambiguous.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::errors::CodecError;

/// Separator between the header, payload and signature segments.
pub const DELIMITER: char = '.';

/// Serialize a value to JSON and encode it into a token segment.
///
/// Field order follows the struct declaration, so the same value always
/// yields the same segment.
///
/// # Errors
/// * `Encode` - The value cannot be represented as JSON
pub fn encode_segment<T: Serialize>(value: &T) -> Result<String, CodecError> {
    let json = serde_json::to_string(value).map_err(|e| CodecError::Encode(e.to_string()))?;
    Ok(encode_bytes(json.as_bytes()))
}

/// Decode a token segment back into a structured value.
///
/// # Errors
/// * `Decode` - Invalid base64, text that is not UTF-8, or malformed JSON
pub fn decode_segment<T: DeserializeOwned>(segment: &str) -> Result<T, CodecError> {
    let bytes = decode_bytes(segment)?;
    let text = String::from_utf8(bytes).map_err(|e| CodecError::Decode(e.to_string()))?;

    serde_json::from_str(&text).map_err(|e| CodecError::Decode(e.to_string()))
}

/// Encode raw bytes with the token's transport alphabet.
pub fn encode_bytes(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode a segment into raw bytes.
///
/// # Errors
/// * `Decode` - The segment is not valid standard base64
pub fn decode_bytes(segment: &str) -> Result<Vec<u8>, CodecError> {
    STANDARD
        .decode(segment)
        .map_err(|e| CodecError::Decode(e.to_string()))
}

/// The exact byte string covered by the signature.
pub fn unsigned_message(header: &str, payload: &str) -> String {
    format!("{header}{DELIMITER}{payload}")
}

/// Join three encoded segments into a wire token.
pub fn join_token(header: &str, payload: &str, signature: &str) -> String {
    format!("{header}{DELIMITER}{payload}{DELIMITER}{signature}")
}

/// Split a wire token into its header, payload and signature segments.
///
/// # Errors
/// * `Format` - Not exactly three segments, or one of them is empty
pub fn split_token(token: &str) -> Result<(&str, &str, &str), CodecError> {
    let segments: Vec<&str> = token.split(DELIMITER).collect();

    match segments.as_slice() {
        [header, payload, signature]
            if !header.is_empty() && !payload.is_empty() && !signature.is_empty() =>
        {
            Ok((header, payload, signature))
        }
        _ => Err(CodecError::Format(segments.len())),
    }
}
