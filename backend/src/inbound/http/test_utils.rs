//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use actix_web::web;

use crate::domain::SessionGeneration;
use crate::domain::ports::{
    MockFollowCommand, MockLoginService, MockProfileQuery, MockRegistrationService,
};
use crate::inbound::http::session_config::SESSION_COOKIE_NAME;
use crate::inbound::http::state::{HttpState, HttpStatePorts};

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(SESSION_COOKIE_NAME.to_owned())
        .cookie_secure(false)
        .build()
}

/// Mocked driving ports; unset expectations panic when called.
#[derive(Default)]
pub struct TestPorts {
    pub login: MockLoginService,
    pub registration: MockRegistrationService,
    pub profiles: MockProfileQuery,
    pub follows: MockFollowCommand,
}

impl TestPorts {
    /// Treat every session as current at [`SessionGeneration::INITIAL`].
    pub fn with_current_sessions(mut self) -> Self {
        self.login
            .expect_session_generation()
            .returning(|_| Ok(Some(SessionGeneration::INITIAL)));
        self
    }

    /// Wrap the mocks in shared handler state.
    pub fn into_state(self) -> web::Data<HttpState> {
        web::Data::new(HttpState::new(HttpStatePorts {
            login: Arc::new(self.login),
            registration: Arc::new(self.registration),
            profiles: Arc::new(self.profiles),
            follows: Arc::new(self.follows),
        }))
    }
}

/// The `session` cookie set on `response`, if any.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .map(Cookie::into_owned)
}
