//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{FollowCommand, LoginService, ProfileQuery, RegistrationService};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn RegistrationService>,
    pub profiles: Arc<dyn ProfileQuery>,
    pub follows: Arc<dyn FollowCommand>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn RegistrationService>,
    pub profiles: Arc<dyn ProfileQuery>,
    pub follows: Arc<dyn FollowCommand>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use docshare::domain::{AccountService, ProfileService};
    /// use docshare::inbound::http::state::{HttpState, HttpStatePorts};
    /// use docshare::outbound::events::SignalDispatcher;
    /// use docshare::outbound::hashing::Argon2PasswordHasher;
    /// use docshare::outbound::memory::{
    ///     InMemoryDocumentRepository, InMemoryFollowRepository, InMemoryUserRepository,
    /// };
    ///
    /// let users = Arc::new(InMemoryUserRepository::default());
    /// let accounts = Arc::new(AccountService::new(
    ///     users.clone(),
    ///     Arc::new(Argon2PasswordHasher::default()),
    /// ));
    /// let profiles = Arc::new(ProfileService::new(
    ///     users,
    ///     Arc::new(InMemoryFollowRepository::default()),
    ///     Arc::new(InMemoryDocumentRepository::default()),
    ///     Arc::new(SignalDispatcher::default()),
    /// ));
    /// let state = HttpState::new(HttpStatePorts {
    ///     login: accounts.clone(),
    ///     registration: accounts,
    ///     profiles: profiles.clone(),
    ///     follows: profiles,
    /// });
    /// let _login = state.login.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            login,
            registration,
            profiles,
            follows,
        } = ports;
        Self {
            login,
            registration,
            profiles,
            follows,
        }
    }
}
