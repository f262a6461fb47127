use hmac::Hmac;
use hmac::Mac;
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::errors::KeyError;
use super::key::SecretKey;

type HmacSha256 = Hmac<Sha256>;

/// Length of a hex encoded HMAC-SHA256 signature.
pub const SIGNATURE_LEN: usize = 64;

/// Signs and verifies unsigned token messages with HMAC-SHA256.
///
/// Signatures are the lowercase hex digest of the MAC, which is what the
/// token's third segment carries (before base64).
#[derive(Clone)]
pub struct Signer {
    mac: HmacSha256,
}

impl Signer {
    /// Create a signer keyed with the process secret.
    ///
    /// # Errors
    /// * `InvalidLength` - The MAC rejected the key
    pub fn new(key: &SecretKey) -> Result<Self, KeyError> {
        let mac = HmacSha256::new_from_slice(key.as_bytes())
            .map_err(|e| KeyError::InvalidLength(e.to_string()))?;

        Ok(Self { mac })
    }

    /// Compute the hex signature of `message`.
    pub fn sign(&self, message: &[u8]) -> String {
        let mut mac = self.mac.clone();
        mac.update(message);
        hex::encode(mac.finalize().into_bytes())
    }

    /// Check `claimed` against the signature of `message`.
    ///
    /// Runs in constant time with respect to both content and length of
    /// `claimed`: short or long input is padded or truncated to the expected
    /// length before the comparison, and the length check is folded in at
    /// the end.
    pub fn verify(&self, message: &[u8], claimed: &[u8]) -> bool {
        let expected = self.sign(message);

        let mut padded = [0u8; SIGNATURE_LEN];
        let copied = claimed.len().min(SIGNATURE_LEN);
        padded[..copied].copy_from_slice(&claimed[..copied]);

        let same_length = (claimed.len() as u64).ct_eq(&(SIGNATURE_LEN as u64));
        let same_content = padded[..].ct_eq(expected.as_bytes());

        (same_length & same_content).into()
    }
}
