//! Profile domain service.
//!
//! Builds profile pages and toggles follow edges, publishing
//! [`ProfileEvent`]s after successful mutations. Event delivery is
//! best-effort: publisher failures are logged and never change the outcome
//! reported to the caller.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::ports::{
    DocumentRepository, DocumentRepositoryError, FollowCommand, FollowRepository,
    FollowRepositoryError, FollowRequest, ProfileEventPublisher, ProfilePage, ProfilePageRequest,
    ProfileQuery, UserPersistenceError, UserRepository,
};
use crate::domain::{
    Error, FollowEdge, FollowEvent, FollowOutcome, ProfileDocumentsQuery, ProfileEvent, User,
    UserId, Username,
};

/// Profile service implementing [`ProfileQuery`] and [`FollowCommand`].
#[derive(Clone)]
pub struct ProfileService<U, F, D, P> {
    users: Arc<U>,
    follows: Arc<F>,
    documents: Arc<D>,
    events: Arc<P>,
}

impl<U, F, D, P> ProfileService<U, F, D, P> {
    /// Create a new service from its driven ports.
    pub fn new(users: Arc<U>, follows: Arc<F>, documents: Arc<D>, events: Arc<P>) -> Self {
        Self {
            users,
            follows,
            documents,
            events,
        }
    }
}

impl<U, F, D, P> ProfileService<U, F, D, P>
where
    U: UserRepository,
    F: FollowRepository,
    D: DocumentRepository,
    P: ProfileEventPublisher,
{
    fn map_user_error(error: UserPersistenceError) -> Error {
        match error {
            UserPersistenceError::Connection { message } => {
                Error::service_unavailable(format!("user repository unavailable: {message}"))
            }
            UserPersistenceError::Query { message } => {
                Error::internal(format!("user repository error: {message}"))
            }
            UserPersistenceError::UsernameTaken { username } => {
                Error::internal(format!("unexpected username conflict: {username}"))
            }
        }
    }

    fn map_follow_error(error: FollowRepositoryError) -> Error {
        match error {
            FollowRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("follow repository unavailable: {message}"))
            }
            FollowRepositoryError::Query { message } => {
                Error::internal(format!("follow repository error: {message}"))
            }
            FollowRepositoryError::AlreadyExists => {
                Error::internal("unexpected follow edge conflict")
            }
        }
    }

    fn map_document_error(error: DocumentRepositoryError) -> Error {
        match error {
            DocumentRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("document repository unavailable: {message}"))
            }
            DocumentRepositoryError::Query { message } => {
                Error::internal(format!("document repository error: {message}"))
            }
        }
    }

    async fn profile_user(&self, username: &Username) -> Result<User, Error> {
        self.users
            .find_by_username(username)
            .await
            .map_err(Self::map_user_error)?
            .ok_or_else(|| Error::not_found(format!("no user named {username}")))
    }

    async fn requesting_user(&self, id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(Self::map_user_error)?
            .ok_or_else(|| Error::unauthorized("session user no longer exists"))
    }

    async fn participants(&self, request: &FollowRequest) -> Result<(User, User), Error> {
        let following = self.profile_user(&request.following).await?;
        let follower = self.requesting_user(&request.follower).await?;
        Ok((follower, following))
    }

    async fn publish(&self, event: ProfileEvent) {
        if let Err(error) = self.events.publish(&event).await {
            warn!(event = event.name(), %error, "profile event delivery failed");
        }
    }
}

#[async_trait]
impl<U, F, D, P> ProfileQuery for ProfileService<U, F, D, P>
where
    U: UserRepository,
    F: FollowRepository,
    D: DocumentRepository,
    P: ProfileEventPublisher,
{
    async fn profile_page(&self, request: &ProfilePageRequest) -> Result<ProfilePage, Error> {
        let profile = self.profile_user(&request.username).await?;
        let query = ProfileDocumentsQuery::new(profile.id().clone(), request.viewer.clone());
        let documents = self
            .documents
            .list_for_profile(&query)
            .await
            .map_err(Self::map_document_error)?;

        let is_followed = match &request.viewer {
            Some(viewer) => self
                .follows
                .exists(&FollowEdge::new(viewer.clone(), profile.id().clone()))
                .await
                .map_err(Self::map_follow_error)?,
            None => false,
        };
        let can_follow = request
            .viewer
            .as_ref()
            .is_some_and(|viewer| viewer != profile.id());

        Ok(ProfilePage {
            profile,
            documents,
            is_followed,
            can_follow,
        })
    }
}

#[async_trait]
impl<U, F, D, P> FollowCommand for ProfileService<U, F, D, P>
where
    U: UserRepository,
    F: FollowRepository,
    D: DocumentRepository,
    P: ProfileEventPublisher,
{
    async fn follow(&self, request: &FollowRequest) -> Result<FollowOutcome, Error> {
        let (follower, following) = self.participants(request).await?;
        let edge = FollowEdge::new(follower.id().clone(), following.id().clone());

        if self
            .follows
            .exists(&edge)
            .await
            .map_err(Self::map_follow_error)?
        {
            return Ok(FollowOutcome::AlreadyFollowing);
        }

        match self.follows.insert(&edge).await {
            Ok(()) => {}
            Err(FollowRepositoryError::AlreadyExists) => {
                debug!(follower = %edge.follower, following = %edge.following, "follow raced");
                return Ok(FollowOutcome::AlreadyFollowing);
            }
            Err(error) => return Err(Self::map_follow_error(error)),
        }

        self.publish(ProfileEvent::FollowDone(FollowEvent::from_profile_detail(
            follower, following,
        )))
        .await;
        Ok(FollowOutcome::Followed)
    }

    async fn unfollow(&self, request: &FollowRequest) -> Result<(), Error> {
        let (follower, following) = self.participants(request).await?;
        let edge = FollowEdge::new(follower.id().clone(), following.id().clone());

        let removed = self
            .follows
            .delete(&edge)
            .await
            .map_err(Self::map_follow_error)?;
        debug!(follower = %edge.follower, following = %edge.following, removed, "unfollow processed");

        self.publish(ProfileEvent::UnfollowDone(FollowEvent::from_profile_detail(
            follower, following,
        )))
        .await;
        Ok(())
    }
}

#[cfg(test)]
#[path = "profile_service_tests.rs"]
mod tests;
