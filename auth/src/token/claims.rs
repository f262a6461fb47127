use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use super::errors::ExpiredError;
use super::errors::StructureError;

/// Claims embedded in a token payload.
///
/// Serialized as `{"id":<int>,"permissionGroup":<string>,"exp":<int>}`.
/// `exp` is a Unix timestamp in seconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject identifier from the user directory
    pub id: i64,

    /// Permission group of the subject
    #[serde(rename = "permissionGroup")]
    pub permission_group: String,

    /// Expiration time (Unix timestamp, seconds)
    pub exp: i64,
}

impl Claims {
    /// Create claims for a subject expiring at `expires_at`.
    pub fn new(id: i64, permission_group: impl ToString, expires_at: DateTime<Utc>) -> Self {
        Self {
            id,
            permission_group: permission_group.to_string(),
            exp: expires_at.timestamp(),
        }
    }

    /// Expiration as a date, if the timestamp is representable.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }

    /// A token is expired from the second named by `exp` onwards.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.exp <= now.timestamp()
    }
}

/// Interpret a decoded payload as claims.
///
/// Extra fields are ignored.
///
/// # Errors
/// * `NotAnObject` - Payload is not a JSON object
/// * `MissingClaim` - `id`, `permissionGroup` or `exp` is absent
/// * `InvalidClaim` - A claim has the wrong type
pub fn check_structure(payload: &Value) -> Result<Claims, StructureError> {
    let fields = payload.as_object().ok_or(StructureError::NotAnObject)?;

    let claim = |name: &'static str| fields.get(name).ok_or(StructureError::MissingClaim(name));

    let id = claim("id")?
        .as_i64()
        .ok_or(StructureError::InvalidClaim {
            claim: "id",
            expected: "an integer",
        })?;

    let permission_group = claim("permissionGroup")?
        .as_str()
        .ok_or(StructureError::InvalidClaim {
            claim: "permissionGroup",
            expected: "a string",
        })?;

    let exp = claim("exp")?
        .as_i64()
        .ok_or(StructureError::InvalidClaim {
            claim: "exp",
            expected: "an integer timestamp",
        })?;

    Ok(Claims {
        id,
        permission_group: permission_group.to_string(),
        exp,
    })
}

/// Reject claims whose expiry is not strictly after `now`.
///
/// # Errors
/// * `ExpiredError` - `exp <= now`
pub fn check_expiry(claims: Claims, now: DateTime<Utc>) -> Result<Claims, ExpiredError> {
    if claims.is_expired(now) {
        return Err(ExpiredError {
            expired_at: claims.exp,
            now: now.timestamp(),
        });
    }

    Ok(claims)
}
