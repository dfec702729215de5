//! Account domain service.
//!
//! Implements the registration and login driving ports on top of the user
//! repository and password hasher.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use crate::domain::ports::{
    LoginService, PasswordHasher, PasswordHasherError, RegistrationService, UserPersistenceError,
    UserRepository,
};
use crate::domain::{
    Error, FormErrors, INVALID_LOGIN, LoginCredentials, NON_FIELD_ERRORS, Registration,
    SessionGeneration, USERNAME_TAKEN, User, UserId, Username,
};

const INVALID_REGISTRATION: &str = "registration form is invalid";

/// Account service implementing [`LoginService`] and [`RegistrationService`].
#[derive(Clone)]
pub struct AccountService<U, H> {
    users: Arc<U>,
    hasher: Arc<H>,
}

impl<U, H> AccountService<U, H> {
    /// Create a new service with the given repository and hasher.
    pub fn new(users: Arc<U>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }
}

impl<U, H> AccountService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    fn map_user_error(error: UserPersistenceError) -> Error {
        match error {
            UserPersistenceError::Connection { message } => {
                Error::service_unavailable(format!("user repository unavailable: {message}"))
            }
            UserPersistenceError::Query { message } => {
                Error::internal(format!("user repository error: {message}"))
            }
            UserPersistenceError::UsernameTaken { .. } => Self::username_taken(),
        }
    }

    fn map_hasher_error(error: PasswordHasherError) -> Error {
        Error::internal(format!("password hasher error: {error}"))
    }

    fn username_taken() -> Error {
        let mut errors = FormErrors::default();
        errors.add("username", USERNAME_TAKEN);
        errors.into_error(INVALID_REGISTRATION)
    }

    fn invalid_login() -> Error {
        let mut errors = FormErrors::default();
        errors.add(NON_FIELD_ERRORS, INVALID_LOGIN);
        Error::unauthorized(INVALID_LOGIN).with_details(json!({ "fields": errors }))
    }
}

#[async_trait]
impl<U, H> LoginService for AccountService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        let Ok(username) = Username::new(credentials.username()) else {
            return Err(Self::invalid_login());
        };

        let Some(stored) = self
            .users
            .find_credentials(&username)
            .await
            .map_err(Self::map_user_error)?
        else {
            debug!(%username, "login rejected: unknown username");
            return Err(Self::invalid_login());
        };

        let verified = self
            .hasher
            .verify(credentials.password(), &stored.password_hash)
            .await
            .map_err(Self::map_hasher_error)?;
        if !verified {
            debug!(%username, "login rejected: password mismatch");
            return Err(Self::invalid_login());
        }

        Ok(stored.user.id().clone())
    }

    async fn session_generation(
        &self,
        user_id: &UserId,
    ) -> Result<Option<SessionGeneration>, Error> {
        self.users
            .session_generation(user_id)
            .await
            .map_err(Self::map_user_error)
    }

    async fn revoke_sessions(&self, user_id: &UserId) -> Result<(), Error> {
        self.users
            .advance_session_generation(user_id)
            .await
            .map_err(Self::map_user_error)?;
        debug!(%user_id, "sessions revoked");
        Ok(())
    }
}

#[async_trait]
impl<U, H> RegistrationService for AccountService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn register(&self, registration: &Registration) -> Result<User, Error> {
        let username = registration.username();
        if self
            .users
            .find_by_username(username)
            .await
            .map_err(Self::map_user_error)?
            .is_some()
        {
            return Err(Self::username_taken());
        }

        let password_hash = self
            .hasher
            .hash(registration.password())
            .await
            .map_err(Self::map_hasher_error)?;
        let user = User::new(UserId::random(), username.clone());
        self.users
            .create(&user, &password_hash)
            .await
            .map_err(Self::map_user_error)?;

        debug!(user_id = %user.id(), username = %user.username(), "user registered");
        Ok(user)
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
