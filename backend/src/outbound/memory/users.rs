//! In-memory `UserRepository`.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{StoredCredentials, UserPersistenceError, UserRepository};
use crate::domain::{PasswordHash, SessionGeneration, User, UserId, Username};

use super::lock;

#[derive(Debug, Default)]
struct Users {
    by_id: HashMap<UserId, StoredCredentials>,
    ids_by_username: HashMap<Username, UserId>,
    generations: HashMap<UserId, SessionGeneration>,
}

/// User store keyed by id with a unique username index.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    inner: Mutex<Users>,
}

impl InMemoryUserRepository {
    fn users(&self) -> Result<MutexGuard<'_, Users>, UserPersistenceError> {
        lock(&self.inner, UserPersistenceError::query)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(
        &self,
        user: &User,
        password_hash: &PasswordHash,
    ) -> Result<(), UserPersistenceError> {
        let mut users = self.users()?;
        if users.ids_by_username.contains_key(user.username()) {
            return Err(UserPersistenceError::username_taken(
                user.username().as_ref(),
            ));
        }
        users
            .ids_by_username
            .insert(user.username().clone(), user.id().clone());
        users.by_id.insert(
            user.id().clone(),
            StoredCredentials {
                user: user.clone(),
                password_hash: password_hash.clone(),
            },
        );
        users
            .generations
            .insert(user.id().clone(), SessionGeneration::INITIAL);
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.users()?.by_id.get(id).map(|stored| stored.user.clone()))
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        Ok(self
            .find_credentials(username)
            .await?
            .map(|stored| stored.user))
    }

    async fn find_credentials(
        &self,
        username: &Username,
    ) -> Result<Option<StoredCredentials>, UserPersistenceError> {
        let users = self.users()?;
        Ok(users
            .ids_by_username
            .get(username)
            .and_then(|id| users.by_id.get(id))
            .cloned())
    }

    async fn session_generation(
        &self,
        id: &UserId,
    ) -> Result<Option<SessionGeneration>, UserPersistenceError> {
        Ok(self.users()?.generations.get(id).copied())
    }

    async fn advance_session_generation(&self, id: &UserId) -> Result<(), UserPersistenceError> {
        if let Some(generation) = self.users()?.generations.get_mut(id) {
            *generation = generation.next();
        }
        Ok(())
    }
}
