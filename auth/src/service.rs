use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde_json::Value;

use crate::directory::Credentials;
use crate::directory::Directory;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::signer::KeyError;
use crate::signer::SecretKey;
use crate::signer::Signer;
use crate::token::check_expiry;
use crate::token::check_structure;
use crate::token::codec;
use crate::token::Claims;
use crate::token::CodecError;
use crate::token::ExpiredError;
use crate::token::Header;
use crate::token::StructureError;
use crate::token::Token;

/// How long an issued token stays valid, in seconds.
pub const VALIDITY_WINDOW_SECS: i64 = 2 * 60 * 60;

/// Issues tokens for matching credentials and authenticates presented tokens.
///
/// Holds no per-request state; one instance is shared by every request for
/// the lifetime of the process.
pub struct TokenService {
    signer: Signer,
    password_hasher: PasswordHasher,
}

/// Identity carried by a token that passed every check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: i64,
    pub permission_group: String,
    pub expires_at: i64,
}

impl From<Claims> for Identity {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.id,
            permission_group: claims.permission_group,
            expires_at: claims.exp,
        }
    }
}

/// Token issuance errors.
#[derive(Debug, thiserror::Error)]
pub enum IssueError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Token encoding failed: {0}")]
    Encoding(#[from] CodecError),
}

/// Why a presented token was not accepted.
///
/// Variants are listed in the order the checks run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthenticationError {
    #[error("No access token presented")]
    MissingCredential,

    #[error("Malformed access token: {0}")]
    MalformedToken(String),

    #[error("Invalid signature")]
    BadSignature,

    #[error("Token has expired: {0}")]
    Expired(ExpiredError),
}

impl From<CodecError> for AuthenticationError {
    fn from(err: CodecError) -> Self {
        Self::MalformedToken(err.to_string())
    }
}

impl From<StructureError> for AuthenticationError {
    fn from(err: StructureError) -> Self {
        Self::MalformedToken(err.to_string())
    }
}

impl From<ExpiredError> for AuthenticationError {
    fn from(err: ExpiredError) -> Self {
        Self::Expired(err)
    }
}

impl TokenService {
    /// Create a token service signing with `key`.
    ///
    /// # Errors
    /// * `KeyError` - The key cannot be used for HMAC
    pub fn new(key: &SecretKey) -> Result<Self, KeyError> {
        Ok(Self {
            signer: Signer::new(key)?,
            password_hasher: PasswordHasher::new(),
        })
    }

    /// Check credentials against the directory and issue a token.
    ///
    /// # Arguments
    /// * `credentials` - Username and password of the login attempt
    /// * `directory` - Where the identity is looked up
    /// * `now` - Issuance time; the token expires `VALIDITY_WINDOW_SECS` later
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown username or wrong password
    /// * `Password` - The stored hash could not be parsed
    /// * `Encoding` - Header or claims could not be serialized
    pub fn issue<D>(
        &self,
        credentials: &Credentials,
        directory: &D,
        now: DateTime<Utc>,
    ) -> Result<Token, IssueError>
    where
        D: Directory + ?Sized,
    {
        let record = directory
            .lookup_by_username(&credentials.username)
            .ok_or(IssueError::InvalidCredentials)?;

        if !self
            .password_hasher
            .verify(&credentials.password, &record.password_hash)?
        {
            return Err(IssueError::InvalidCredentials);
        }

        let expires_at = now + Duration::seconds(VALIDITY_WINDOW_SECS);
        let claims = Claims::new(record.id, record.permission_group, expires_at);

        Ok(self.sign_claims(&claims)?)
    }

    /// Encode and sign claims without a credential check.
    ///
    /// # Errors
    /// * `Encode` - Header or claims could not be serialized
    pub fn sign_claims(&self, claims: &Claims) -> Result<Token, CodecError> {
        let header = codec::encode_segment(&Header::new())?;
        let payload = codec::encode_segment(claims)?;

        let signature = self
            .signer
            .sign(codec::unsigned_message(&header, &payload).as_bytes());

        Ok(Token::from_segments(
            header,
            payload,
            codec::encode_bytes(signature.as_bytes()),
        ))
    }

    /// Authenticate a raw token string.
    ///
    /// Checks run in a fixed order: presence, layout and decoding, claim
    /// structure, signature, then expiry. Expiry is only read from claims
    /// whose signature has been confirmed.
    ///
    /// # Errors
    /// * `MissingCredential` - No token or an empty string
    /// * `MalformedToken` - Bad layout, undecodable segment, unsupported
    ///   header or incomplete claims
    /// * `BadSignature` - Signature does not match header and payload
    /// * `Expired` - `exp` is not after `now`
    pub fn authenticate(
        &self,
        raw: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Identity, AuthenticationError> {
        let raw = match raw {
            Some(raw) if !raw.is_empty() => raw,
            _ => return Err(AuthenticationError::MissingCredential),
        };

        let token = Token::parse(raw)?;
        let _header: Header = token.header()?;
        let payload: Value = codec::decode_segment(token.payload_segment())?;
        let claimed_signature = codec::decode_bytes(token.signature_segment())?;
        let claims = check_structure(&payload)?;

        if !self
            .signer
            .verify(token.unsigned_message().as_bytes(), &claimed_signature)
        {
            return Err(AuthenticationError::BadSignature);
        }

        Ok(check_expiry(claims, now)?.into())
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::directory::IdentityRecord;

    mock! {
        pub TestDirectory {}

        impl Directory for TestDirectory {
            fn lookup_by_username(&self, username: &str) -> Option<IdentityRecord>;
        }
    }

    const SECRET: &str = "directus_da_best";
    const ISSUED_AT: i64 = 1_700_000_000;
    const RIJK_TOKEN: &str = "eyJ0eXAiOiJKV1QiLCJhbGciOiJIUzEifQ==.eyJpZCI6MSwicGVybWlzc2lvbkdyb3VwIjoiYWRtaW5pc3RyYXRvciIsImV4cCI6MTcwMDAwNzIwMH0=.ZTg1OGFkNGYyMWY4NjhhZWEwN2M4MjdiOWQyYzQzMGFjOWExMDMyNTNiOWI4OTdlMzI2YjQ4NzcwMmQxZjRkMg==";

    fn at(timestamp: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(timestamp, 0).unwrap()
    }

    fn service(secret: &str) -> TokenService {
        TokenService::new(&SecretKey::new(secret).unwrap()).unwrap()
    }

    fn rijk() -> IdentityRecord {
        IdentityRecord {
            id: 1,
            permission_group: "administrator".to_string(),
            password_hash: PasswordHasher::with_params(64, 1, 1)
                .unwrap()
                .hash("password")
                .unwrap(),
        }
    }

    fn directory_with_rijk() -> MockTestDirectory {
        let record = rijk();
        let mut directory = MockTestDirectory::new();
        directory
            .expect_lookup_by_username()
            .with(eq("rijk"))
            .times(1)
            .returning(move |_| Some(record.clone()));
        directory
    }

    fn issue_rijk(service: &TokenService) -> Token {
        service
            .issue(
                &Credentials::new("rijk", "password"),
                &directory_with_rijk(),
                at(ISSUED_AT),
            )
            .expect("Failed to issue token")
    }

    #[test]
    fn test_issue_success() {
        let token = issue_rijk(&service(SECRET));

        let claims = token.claims_unverified().unwrap();
        assert_eq!(claims.id, 1);
        assert_eq!(claims.permission_group, "administrator");
        assert_eq!(claims.exp, ISSUED_AT + 7200);
        assert_eq!(token.header().unwrap(), Header::new());
    }

    #[test]
    fn test_issue_produces_reference_wire_format() {
        let token = issue_rijk(&service(SECRET));
        assert_eq!(token.to_string(), RIJK_TOKEN);
    }

    #[test]
    fn test_issue_wrong_password() {
        let result = service(SECRET).issue(
            &Credentials::new("rijk", "hunter2"),
            &directory_with_rijk(),
            at(ISSUED_AT),
        );
        assert!(matches!(result, Err(IssueError::InvalidCredentials)));
    }

    #[test]
    fn test_issue_unknown_user() {
        let mut directory = MockTestDirectory::new();
        directory
            .expect_lookup_by_username()
            .with(eq("nobody"))
            .times(1)
            .returning(|_| None);

        let result = service(SECRET).issue(
            &Credentials::new("nobody", "password"),
            &directory,
            at(ISSUED_AT),
        );
        assert!(matches!(result, Err(IssueError::InvalidCredentials)));
    }

    #[test]
    fn test_issue_corrupt_stored_hash() {
        let mut directory = MockTestDirectory::new();
        directory.expect_lookup_by_username().returning(|_| {
            Some(IdentityRecord {
                id: 1,
                permission_group: "administrator".to_string(),
                password_hash: "password".to_string(),
            })
        });

        let result = service(SECRET).issue(
            &Credentials::new("rijk", "password"),
            &directory,
            at(ISSUED_AT),
        );
        assert!(matches!(result, Err(IssueError::Password(_))));
    }

    #[test]
    fn test_authenticate_success() {
        let service = service(SECRET);
        let token = issue_rijk(&service);

        let identity = service
            .authenticate(Some(&token.to_string()), at(ISSUED_AT + 10))
            .expect("Token should authenticate");

        assert_eq!(
            identity,
            Identity {
                id: 1,
                permission_group: "administrator".to_string(),
                expires_at: ISSUED_AT + 7200,
            }
        );
    }

    #[test]
    fn test_authenticate_missing() {
        let service = service(SECRET);

        assert_eq!(
            service.authenticate(None, at(ISSUED_AT)),
            Err(AuthenticationError::MissingCredential)
        );
        assert_eq!(
            service.authenticate(Some(""), at(ISSUED_AT)),
            Err(AuthenticationError::MissingCredential)
        );
    }

    #[test]
    fn test_authenticate_two_segments() {
        let service = service(SECRET);
        let token = issue_rijk(&service);
        let two_parts = token.unsigned_message();

        let result = service.authenticate(Some(&two_parts), at(ISSUED_AT));
        assert!(matches!(
            result,
            Err(AuthenticationError::MalformedToken(_))
        ));
    }

    #[test]
    fn test_authenticate_undecodable_segments() {
        let service = service(SECRET);

        let malformed = [
            "a.b.c",
            "!!!!.eyJpZCI6MX0=.c2ln",
            "eyJ0eXAiOiJKV1QifQ==.eyJpZCI6MX0=.***",
        ];

        for raw in malformed {
            let result = service.authenticate(Some(raw), at(ISSUED_AT));
            assert!(
                matches!(result, Err(AuthenticationError::MalformedToken(_))),
                "{raw} should be malformed, got {result:?}"
            );
        }
    }

    #[test]
    fn test_authenticate_unsupported_header() {
        let service = service(SECRET);
        let header = codec::encode_bytes(br#"{"typ":"JWT","alg":"none"}"#);
        let payload = codec::encode_segment(&Claims::new(1, "administrator", at(ISSUED_AT + 60)))
            .unwrap();
        let raw = codec::join_token(&header, &payload, "c2ln");

        let result = service.authenticate(Some(&raw), at(ISSUED_AT));
        assert!(matches!(
            result,
            Err(AuthenticationError::MalformedToken(_))
        ));
    }

    #[test]
    fn test_authenticate_incomplete_claims() {
        let service = service(SECRET);
        let header = codec::encode_segment(&Header::new()).unwrap();
        let payload = codec::encode_bytes(br#"{"id":1,"exp":1700007200}"#);
        let signature = service.signer.sign(codec::unsigned_message(&header, &payload).as_bytes());
        let raw = codec::join_token(&header, &payload, &codec::encode_bytes(signature.as_bytes()));

        let result = service.authenticate(Some(&raw), at(ISSUED_AT));
        assert!(matches!(
            result,
            Err(AuthenticationError::MalformedToken(_))
        ));
    }

    #[test]
    fn test_authenticate_tampered_payload() {
        let service = service(SECRET);
        let token = issue_rijk(&service);

        // Changes the encoded id from 1 to 2 by rewriting a single character
        let tampered_payload = token
            .payload_segment()
            .replacen("eyJpZCI6MSwi", "eyJpZCI6Miwi", 1);
        assert_ne!(tampered_payload, token.payload_segment());

        let raw = codec::join_token(
            token.header_segment(),
            &tampered_payload,
            token.signature_segment(),
        );

        assert_eq!(
            service.authenticate(Some(&raw), at(ISSUED_AT + 10)),
            Err(AuthenticationError::BadSignature)
        );
    }

    #[test]
    fn test_authenticate_never_accepts_single_character_edits() {
        let service = service(SECRET);
        let token = issue_rijk(&service);
        let payload = token.payload_segment().to_string();

        for (index, current) in payload.char_indices() {
            let replacement = if current == 'A' { 'B' } else { 'A' };
            let mut edited = payload.clone();
            edited.replace_range(index..index + 1, &replacement.to_string());

            let raw = codec::join_token(token.header_segment(), &edited, token.signature_segment());
            let result = service.authenticate(Some(&raw), at(ISSUED_AT + 10));

            assert!(
                matches!(
                    result,
                    Err(AuthenticationError::BadSignature)
                        | Err(AuthenticationError::MalformedToken(_))
                ),
                "edit at {index} was accepted: {result:?}"
            );
        }
    }

    #[test]
    fn test_authenticate_wrong_key() {
        let token = issue_rijk(&service(SECRET));

        assert_eq!(
            service("another_secret").authenticate(Some(&token.to_string()), at(ISSUED_AT + 10)),
            Err(AuthenticationError::BadSignature)
        );
    }

    #[test]
    fn test_authenticate_expired() {
        let service = service(SECRET);
        let token = issue_rijk(&service);
        let expires_at = ISSUED_AT + 7200;

        assert_eq!(
            service.authenticate(Some(&token.to_string()), at(expires_at + 1)),
            Err(AuthenticationError::Expired(ExpiredError {
                expired_at: expires_at,
                now: expires_at + 1,
            }))
        );
        assert!(matches!(
            service.authenticate(Some(&token.to_string()), at(expires_at)),
            Err(AuthenticationError::Expired(_))
        ));
        assert!(service
            .authenticate(Some(&token.to_string()), at(expires_at - 1))
            .is_ok());
    }

    #[test]
    fn test_forged_and_expired_reports_bad_signature() {
        let forged = service("attacker_key").sign_claims(&Claims::new(
            1,
            "administrator",
            at(ISSUED_AT),
        ))
        .unwrap();

        assert_eq!(
            service(SECRET).authenticate(Some(&forged.to_string()), at(ISSUED_AT + 3600)),
            Err(AuthenticationError::BadSignature)
        );
    }
}
