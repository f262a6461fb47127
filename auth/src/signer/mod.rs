pub mod errors;
pub mod key;
pub mod mac;

pub use errors::KeyError;
pub use key::SecretKey;
pub use mac::Signer;
