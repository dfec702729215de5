//! Domain events emitted by the profile follow toggle.
//!
//! Events stay transport agnostic; receivers (notifications, activity feeds,
//! analytics) subscribe through [`crate::domain::ports::ProfileEventPublisher`]
//! adapters and never influence the HTTP response.

use super::{TraceId, User};

/// Sender label attached to events raised by the profile endpoint.
pub const PROFILE_DETAIL_SENDER: &str = "profile_detail";

/// Participants of a follow or unfollow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowEvent {
    /// Component that raised the event.
    pub sender: &'static str,
    /// Correlation identifier of the originating request.
    pub trace_id: Option<TraceId>,
    /// User who followed or unfollowed.
    pub follower: User,
    /// User who was followed or unfollowed.
    pub following: User,
}

impl FollowEvent {
    /// Build an event raised by the profile endpoint, capturing the ambient
    /// trace identifier.
    pub fn from_profile_detail(follower: User, following: User) -> Self {
        Self {
            sender: PROFILE_DETAIL_SENDER,
            trace_id: TraceId::current(),
            follower,
            following,
        }
    }
}

/// Follow relationship lifecycle events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileEvent {
    /// `follow_done`: a follow edge was created.
    FollowDone(FollowEvent),
    /// `unfollow_done`: an unfollow request was processed.
    UnfollowDone(FollowEvent),
}

impl ProfileEvent {
    /// Stable event name used by receivers and logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::FollowDone(_) => "follow_done",
            Self::UnfollowDone(_) => "unfollow_done",
        }
    }

    /// Participants carried by the event.
    #[must_use]
    pub const fn payload(&self) -> &FollowEvent {
        match self {
            Self::FollowDone(event) | Self::UnfollowDone(event) => event,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserId;

    fn user(name: &str) -> User {
        User::new(UserId::random(), crate::domain::Username::new(name).expect("username"))
    }

    #[tokio::test]
    async fn events_capture_trace_and_names() {
        let trace_id = TraceId::generate();
        let event = TraceId::scope(trace_id, async {
            ProfileEvent::FollowDone(FollowEvent::from_profile_detail(user("bob"), user("alice")))
        })
        .await;

        assert_eq!(event.name(), "follow_done");
        assert_eq!(event.payload().sender, PROFILE_DETAIL_SENDER);
        assert_eq!(event.payload().trace_id, Some(trace_id));
        assert_eq!(event.payload().follower.username().as_ref(), "bob");
    }

    #[test]
    fn unfollow_name_is_stable() {
        let event =
            ProfileEvent::UnfollowDone(FollowEvent::from_profile_detail(user("bob"), user("alice")));
        assert_eq!(event.name(), "unfollow_done");
        assert!(event.payload().trace_id.is_none());
    }
}
