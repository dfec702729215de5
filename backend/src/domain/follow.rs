//! Follow relationships between users.

use serde::Serialize;
use utoipa::ToSchema;

use super::UserId;

/// Message returned when a follow edge already exists.
///
/// Clients match on this exact text, grammar included.
pub const ALREADY_FOLLOWING: &str = "You already following this people.";

/// Directed edge meaning "`follower` is following `following`".
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FollowEdge {
    /// User doing the following.
    pub follower: UserId,
    /// User being followed.
    pub following: UserId,
}

impl FollowEdge {
    /// Build an edge from `follower` to `following`.
    pub fn new(follower: UserId, following: UserId) -> Self {
        Self {
            follower,
            following,
        }
    }
}

/// Result of a follow request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowOutcome {
    /// A new edge was created.
    Followed,
    /// The edge already existed; nothing changed.
    AlreadyFollowing,
}

/// JSON body returned by follow and unfollow requests.
///
/// Both variants are delivered with a success status; `error` is a soft
/// failure the client displays as-is.
///
/// # Examples
/// ```
/// use docshare::domain::{FollowOutcome, FollowResponse};
///
/// let body = serde_json::to_value(FollowResponse::from(FollowOutcome::Followed)).unwrap();
/// assert_eq!(body, serde_json::json!({ "success": true }));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum FollowResponse {
    /// The request took effect (or was a no-op unfollow).
    Success {
        /// Always `true`.
        success: bool,
    },
    /// The request was refused without changing state.
    Error {
        /// Human-readable reason.
        error: String,
    },
}

impl FollowResponse {
    /// The `{"success": true}` body.
    pub fn success() -> Self {
        Self::Success { success: true }
    }
}

impl From<FollowOutcome> for FollowResponse {
    fn from(value: FollowOutcome) -> Self {
        match value {
            FollowOutcome::Followed => Self::success(),
            FollowOutcome::AlreadyFollowing => Self::Error {
                error: ALREADY_FOLLOWING.to_owned(),
            },
        }
    }
}
