pub mod claims;
pub mod codec;
pub mod encoded;
pub mod errors;
pub mod header;

pub use claims::check_expiry;
pub use claims::check_structure;
pub use claims::Claims;
pub use encoded::Token;
pub use errors::CodecError;
pub use errors::ExpiredError;
pub use errors::StructureError;
pub use header::Algorithm;
pub use header::Header;
pub use header::TokenType;
