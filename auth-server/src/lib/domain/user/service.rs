use std::sync::Arc;

use async_trait::async_trait;
use auth::Credentials;
use auth::Token;
use auth::TokenService;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    token_service: Arc<TokenService>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Where users are looked up
    /// * `token_service` - Issues tokens for successful logins
    pub fn new(repository: Arc<UR>, token_service: Arc<TokenService>) -> Self {
        Self {
            repository,
            token_service,
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn login(
        &self,
        credentials: Credentials,
        now: DateTime<Utc>,
    ) -> Result<Token, UserError> {
        let token = self
            .token_service
            .issue(&credentials, self.repository.as_ref(), now)?;

        tracing::info!(username = %credentials.username, "Access token issued");

        Ok(token)
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.0))
    }
}
