//! Driving port for account registration.

use async_trait::async_trait;

use crate::domain::{Error, Registration, User};

/// Domain use-case port creating new accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationService: Send + Sync {
    /// Create the account described by `registration`.
    ///
    /// A taken username is reported as an `invalid_request` error whose
    /// `details.fields.username` carries [`crate::domain::USERNAME_TAKEN`].
    async fn register(&self, registration: &Registration) -> Result<User, Error>;
}
