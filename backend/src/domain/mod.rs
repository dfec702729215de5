//! Domain primitives, services and ports.
//!
//! Purpose: define strongly typed domain entities used by the HTTP and
//! persistence adapters, plus the services implementing the driving ports.
//! Types document their invariants and serialisation contracts (serde) in
//! their own Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User / UserId / Username: account identity.
//! - LoginCredentials / Registration / FormErrors: inbound form values.
//! - SessionGeneration: server-side session revocation counter.
//! - Document / ProfileDocumentsQuery: profile document listing.
//! - FollowEdge / FollowOutcome / FollowResponse: follow toggle.
//! - ProfileEvent: `follow_done` / `unfollow_done` notifications.
//! - AccountService / ProfileService: driving port implementations.

pub mod account_service;
pub mod auth;
pub mod document;
pub mod error;
pub mod follow;
pub mod ports;
pub mod profile_events;
pub mod profile_service;
pub mod trace_id;
pub mod user;

pub use self::account_service::AccountService;
pub use self::auth::{
    FIELD_REQUIRED, FormErrors, INVALID_LOGIN, LoginCredentials, LoginValidationError,
    NON_FIELD_ERRORS, PASSWORD_MISMATCH, PasswordHash, Registration, SessionGeneration,
    USERNAME_TAKEN,
};
pub use self::document::{Document, ProfileDocumentsQuery};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::follow::{ALREADY_FOLLOWING, FollowEdge, FollowOutcome, FollowResponse};
pub use self::profile_events::{FollowEvent, PROFILE_DETAIL_SENDER, ProfileEvent};
pub use self::profile_service::ProfileService;
pub use self::trace_id::TraceId;
pub use self::user::{USERNAME_MAX, User, UserId, UserValidationError, Username};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use docshare::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
