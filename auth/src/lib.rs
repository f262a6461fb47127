//! Compact signed access tokens.
//!
//! A client logs in once and receives a token of three base64 segments:
//! a fixed header, the claims (subject id, permission group, expiry) and an
//! HMAC-SHA256 signature over the first two. Later requests present the
//! token instead of credentials.
//!
//! - [`token`] encodes and decodes segments and checks claims
//! - [`signer`] computes and verifies signatures in constant time
//! - [`password`] hashes and verifies stored passwords (Argon2id)
//! - [`TokenService`] issues tokens and authenticates presented ones
//!
//! The crate performs no I/O and reads no clock: callers pass the current
//! time and a [`Directory`] to look users up in.
//!
//! # Example
//! ```
//! use auth::{Credentials, Directory, IdentityRecord, PasswordHasher, SecretKey, TokenService};
//! use chrono::{Duration, Utc};
//!
//! struct OneUser(IdentityRecord);
//!
//! impl Directory for OneUser {
//!     fn lookup_by_username(&self, username: &str) -> Option<IdentityRecord> {
//!         (username == "rijk").then(|| self.0.clone())
//!     }
//! }
//!
//! let hasher = PasswordHasher::with_params(64, 1, 1).unwrap();
//! let directory = OneUser(IdentityRecord {
//!     id: 1,
//!     permission_group: "administrator".to_string(),
//!     password_hash: hasher.hash("password").unwrap(),
//! });
//!
//! let service = TokenService::new(&SecretKey::new("instance-secret").unwrap()).unwrap();
//! let now = Utc::now();
//!
//! let token = service
//!     .issue(&Credentials::new("rijk", "password"), &directory, now)
//!     .unwrap();
//!
//! let identity = service
//!     .authenticate(Some(&token.to_string()), now + Duration::seconds(10))
//!     .unwrap();
//! assert_eq!(identity.id, 1);
//! ```

pub mod directory;
pub mod password;
pub mod service;
pub mod signer;
pub mod token;

// Re-export commonly used items
pub use directory::Credentials;
pub use directory::Directory;
pub use directory::IdentityRecord;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use service::AuthenticationError;
pub use service::Identity;
pub use service::IssueError;
pub use service::TokenService;
pub use service::VALIDITY_WINDOW_SECS;
pub use signer::KeyError;
pub use signer::SecretKey;
pub use signer::Signer;
pub use token::Claims;
pub use token::Token;
