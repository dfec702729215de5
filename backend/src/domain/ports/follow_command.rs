//! Driving port for the follow/unfollow toggle.

use async_trait::async_trait;

use crate::domain::{Error, FollowOutcome, UserId, Username};

/// Request to change the edge from `follower` to the user named `following`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowRequest {
    /// Authenticated requester.
    pub follower: UserId,
    /// Username of the profile being followed or unfollowed.
    pub following: Username,
}

/// Domain use-case port mutating follow edges.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FollowCommand: Send + Sync {
    /// Create the edge unless it already exists. Emits `follow_done` only
    /// when a new edge is stored.
    async fn follow(&self, request: &FollowRequest) -> Result<FollowOutcome, Error>;

    /// Remove the edge if present and emit `unfollow_done` regardless.
    async fn unfollow(&self, request: &FollowRequest) -> Result<(), Error>;
}
