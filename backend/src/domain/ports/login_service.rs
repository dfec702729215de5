//! Driving port for login/authentication use-cases.
//!
//! Inbound adapters call this port to authenticate credentials without
//! importing the backing infrastructure, so handler tests can substitute a
//! mock instead of wiring persistence.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, SessionGeneration, UserId};

/// Domain use-case port for authentication and session revocation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated user id.
    ///
    /// Unknown usernames and wrong passwords are indistinguishable: both
    /// yield [`crate::domain::ErrorCode::Unauthorized`] carrying
    /// [`crate::domain::INVALID_LOGIN`].
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error>;

    /// Generation a session for `user_id` must carry to stay valid; `None`
    /// when the user no longer exists.
    async fn session_generation(
        &self,
        user_id: &UserId,
    ) -> Result<Option<SessionGeneration>, Error>;

    /// Revoke every session opened for `user_id` so far.
    async fn revoke_sessions(&self, user_id: &UserId) -> Result<(), Error>;
}
