use std::fmt;

/// Username and password supplied for one login attempt.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// The part of a directory entry the token service needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityRecord {
    pub id: i64,
    pub permission_group: String,
    /// Argon2 PHC string
    pub password_hash: String,
}

/// Read-only lookup into whatever stores user identities.
///
/// Implementations must be safe to call from many requests at once.
pub trait Directory: Send + Sync {
    /// Find the single identity registered under `username`.
    fn lookup_by_username(&self, username: &str) -> Option<IdentityRecord>;
}

impl<D: Directory + ?Sized> Directory for std::sync::Arc<D> {
    fn lookup_by_username(&self, username: &str) -> Option<IdentityRecord> {
        (**self).lookup_by_username(username)
    }
}
