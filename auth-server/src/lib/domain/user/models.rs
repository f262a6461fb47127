use std::fmt;

use crate::user::errors::UsernameError;

/// A directory entry.
///
/// Only the Argon2 hash of the password is held.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub full_name: String,
    pub permission_group: String,
    pub password_hash: String,
}

impl User {
    /// The fields a token is issued from.
    pub fn identity(&self) -> auth::IdentityRecord {
        auth::IdentityRecord {
            id: self.id.0,
            permission_group: self.permission_group.clone(),
            password_hash: self.password_hash.clone(),
        }
    }
}

/// User identifier, as embedded in token claims
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Username value type
///
/// 3 to 32 characters: alphanumeric, underscore or hyphen.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 32;

    /// Create a validated username.
    ///
    /// # Errors
    /// * `TooShort` - Fewer than 3 characters
    /// * `TooLong` - More than 32 characters
    /// * `InvalidCharacters` - Contains characters other than alphanumerics, `_` and `-`
    pub fn new(username: String) -> Result<Self, UsernameError> {
        let length = username.chars().count();
        if length < Self::MIN_LENGTH {
            return Err(UsernameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            });
        }
        if length > Self::MAX_LENGTH {
            return Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }
        if !username
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
        {
            return Err(UsernameError::InvalidCharacters);
        }

        Ok(Self(username))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
