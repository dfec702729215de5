//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Provides a thin wrapper around Actix sessions so handlers only deal with
//! domain-friendly operations: logging a user in or out and reading the
//! authenticated user id.
//!
//! Sessions live in signed cookies, so a session is only trusted while the
//! [`SessionGeneration`] it carries matches the one stored for the user.
//! Logging out advances the stored generation, which revokes every cookie
//! issued before, including copies a client kept.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::debug;

use crate::domain::ports::LoginService;
use crate::domain::{Error, SessionGeneration, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const SESSION_GENERATION_KEY: &str = "session_generation";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Start an authenticated session for `user_id` at `generation`.
    ///
    /// The session key is renewed first so an identifier issued before login
    /// cannot be reused afterwards.
    pub fn log_in(&self, user_id: &UserId, generation: SessionGeneration) -> Result<(), Error> {
        self.0.renew();
        self.insert(USER_ID_KEY, user_id.to_string())?;
        self.insert(SESSION_GENERATION_KEY, generation)
    }

    /// Revoke the current user's sessions and expire the cookie.
    ///
    /// The cookie is dropped even when revocation fails; the failure is still
    /// reported.
    pub async fn log_out(&self, sessions: &dyn LoginService) -> Result<(), Error> {
        let revoked = match self.user_id(sessions).await {
            Ok(Some(user_id)) => sessions.revoke_sessions(&user_id).await,
            Ok(None) => Ok(()),
            Err(error) => Err(error),
        };
        self.0.purge();
        revoked
    }

    /// The authenticated user, if the session names one whose generation is
    /// still current. Revoked sessions are purged.
    pub async fn user_id(&self, sessions: &dyn LoginService) -> Result<Option<UserId>, Error> {
        let Some((user_id, generation)) = self.claim()? else {
            return Ok(None);
        };
        match sessions.session_generation(&user_id).await? {
            Some(current) if current == generation => Ok(Some(user_id)),
            current => {
                debug!(%user_id, ?generation, ?current, "discarding revoked session");
                self.0.purge();
                Ok(None)
            }
        }
    }

    /// Require an authenticated user id or return `401 Unauthorized`.
    pub async fn require_user_id(&self, sessions: &dyn LoginService) -> Result<UserId, Error> {
        self.user_id(sessions)
            .await?
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    /// User id and generation recorded in the cookie, unverified.
    fn claim(&self) -> Result<Option<(UserId, SessionGeneration)>, Error> {
        let Some(raw) = self.get::<String>(USER_ID_KEY)? else {
            return Ok(None);
        };
        let user_id = match UserId::new(raw) {
            Ok(id) => id,
            Err(error) => {
                tracing::warn!("invalid user id in session cookie: {error}");
                return Ok(None);
            }
        };
        Ok(self
            .get::<SessionGeneration>(SESSION_GENERATION_KEY)?
            .map(|generation| (user_id, generation)))
    }

    fn get<T: serde::de::DeserializeOwned>(&self, key: &str) -> Result<Option<T>, Error> {
        self.0
            .get::<T>(key)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))
    }

    fn insert<T: serde::Serialize>(&self, key: &str, value: T) -> Result<(), Error> {
        self.0
            .insert(key, value)
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
