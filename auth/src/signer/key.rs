use std::fmt;

use super::errors::KeyError;

/// Process-wide token signing secret.
///
/// Loaded once at startup and handed to the token service. The bytes never
/// appear in `Debug` output and are zeroed on drop.
pub struct SecretKey(Vec<u8>);

impl SecretKey {
    /// Wrap raw secret bytes.
    ///
    /// # Errors
    /// * `Empty` - No key material supplied
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, KeyError> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(KeyError::Empty);
        }
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SecretKey").field(&"<redacted>").finish()
    }
}

impl Drop for SecretKey {
    fn drop(&mut self) {
        self.0.iter_mut().for_each(|b| *b = 0);
    }
}
