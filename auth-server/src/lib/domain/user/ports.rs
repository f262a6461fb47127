use async_trait::async_trait;
use auth::Credentials;
use auth::Token;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Check credentials and issue an access token.
    ///
    /// # Arguments
    /// * `credentials` - Username and password from the login request
    /// * `now` - Issuance time
    ///
    /// # Returns
    /// Signed access token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown username or wrong password
    /// * `Password` - Stored hash is unreadable
    async fn login(&self, credentials: Credentials, now: DateTime<Utc>)
        -> Result<Token, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Errors
    /// * `NotFound` - No user with this id
    async fn get_user(&self, id: &UserId) -> Result<User, UserError>;
}

/// Read access to stored users.
///
/// Login goes through the `auth::Directory` supertrait; everything else
/// through the async methods here.
#[async_trait]
pub trait UserRepository: auth::Directory + Send + Sync + 'static {
    /// Retrieve user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
}
