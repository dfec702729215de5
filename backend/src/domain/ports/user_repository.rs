//! Port abstraction for user persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{PasswordHash, SessionGeneration, User, UserId, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// A user with the requested username already exists.
        UsernameTaken { username: String } => "username already taken: {username}",
    }
}

/// A user together with the stored password hash, used only for
/// authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCredentials {
    /// Public user record.
    pub user: User,
    /// Encoded password hash.
    pub password_hash: PasswordHash,
}

/// Persistence port for user accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user at [`SessionGeneration::INITIAL`]; fails with [`UserPersistenceError::UsernameTaken`]
    /// when the username is already registered.
    async fn create(
        &self,
        user: &User,
        password_hash: &PasswordHash,
    ) -> Result<(), UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by username.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user and their password hash by username.
    async fn find_credentials(
        &self,
        username: &Username,
    ) -> Result<Option<StoredCredentials>, UserPersistenceError>;

    /// Current session generation for `id`; `None` when the user does not
    /// exist.
    async fn session_generation(
        &self,
        id: &UserId,
    ) -> Result<Option<SessionGeneration>, UserPersistenceError>;

    /// Move `id` to the next session generation, revoking every session
    /// opened before. Unknown ids are ignored.
    async fn advance_session_generation(&self, id: &UserId) -> Result<(), UserPersistenceError>;
}
