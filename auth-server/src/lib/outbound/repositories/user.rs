use std::collections::HashMap;

use async_trait::async_trait;
use auth::IdentityRecord;
use auth::PasswordHasher;

use crate::config::SeedUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

/// Read-only user directory built once at startup.
///
/// Stands in for a real data store; nothing mutates it after construction,
/// so concurrent lookups need no locking.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    by_id: HashMap<i64, User>,
    id_by_username: HashMap<String, i64>,
}

impl InMemoryUserRepository {
    /// Build a directory from already hashed users.
    ///
    /// # Errors
    /// * `IdAlreadyExists` - Two users share an id
    /// * `UsernameAlreadyExists` - Two users share a username
    pub fn new(users: Vec<User>) -> Result<Self, UserError> {
        let mut repository = Self::default();

        for user in users {
            if repository.by_id.contains_key(&user.id.0) {
                return Err(UserError::IdAlreadyExists(user.id.0));
            }
            if repository
                .id_by_username
                .contains_key(user.username.as_str())
            {
                return Err(UserError::UsernameAlreadyExists(
                    user.username.as_str().to_string(),
                ));
            }

            repository
                .id_by_username
                .insert(user.username.as_str().to_string(), user.id.0);
            repository.by_id.insert(user.id.0, user);
        }

        Ok(repository)
    }

    /// Hash the seed passwords and build the directory.
    ///
    /// # Errors
    /// * `InvalidUsername` - A seed username fails validation
    /// * `Password` - Hashing failed
    /// * `IdAlreadyExists` / `UsernameAlreadyExists` - Duplicate seeds
    pub fn from_seed(seeds: &[SeedUser], hasher: &PasswordHasher) -> Result<Self, UserError> {
        let users = seeds
            .iter()
            .map(|seed| -> Result<User, UserError> {
                Ok(User {
                    id: UserId(seed.id),
                    username: Username::new(seed.username.clone())?,
                    full_name: seed.full_name.clone(),
                    permission_group: seed.permission_group.clone(),
                    password_hash: hasher.hash(&seed.password)?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(users)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

impl auth::Directory for InMemoryUserRepository {
    fn lookup_by_username(&self, username: &str) -> Option<IdentityRecord> {
        self.id_by_username
            .get(username)
            .and_then(|id| self.by_id.get(id))
            .map(User::identity)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.by_id.get(&id.0).cloned())
    }
}
