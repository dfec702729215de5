//! Driving port for reading profile pages.

use async_trait::async_trait;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{Document, Error, User, UserId, Username};

/// Request for the profile page of `username` as seen by `viewer`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfilePageRequest {
    /// Path segment identifying the profile.
    pub username: Username,
    /// Authenticated viewer, `None` for anonymous requests.
    pub viewer: Option<UserId>,
}

/// Context rendered for a profile page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePage {
    /// The viewed user.
    pub profile: User,
    /// Documents owned by `profile` that the viewer may see, newest first.
    pub documents: Vec<Document>,
    /// Whether the viewer follows `profile`.
    pub is_followed: bool,
    /// Whether the viewer may follow `profile`.
    pub can_follow: bool,
}

/// Domain use-case port for profile pages.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileQuery: Send + Sync {
    /// Build the profile page; unknown usernames yield `not_found`.
    async fn profile_page(&self, request: &ProfilePageRequest) -> Result<ProfilePage, Error>;
}
