//! Port for follow edge persistence.

use async_trait::async_trait;

use crate::domain::FollowEdge;

use super::define_port_error;

define_port_error! {
    /// Errors raised by follow repository adapters.
    pub enum FollowRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "follow repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "follow repository query failed: {message}",
        /// The edge was inserted concurrently by another request.
        AlreadyExists => "follow edge already exists",
    }
}

/// Storage for directed follow edges, unique per (follower, following).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FollowRepository: Send + Sync {
    /// Whether the edge is currently stored.
    async fn exists(&self, edge: &FollowEdge) -> Result<bool, FollowRepositoryError>;

    /// Store a new edge. Returns [`FollowRepositoryError::AlreadyExists`]
    /// if the pair is already present.
    async fn insert(&self, edge: &FollowEdge) -> Result<(), FollowRepositoryError>;

    /// Remove the edge if present; returns whether a row was deleted.
    async fn delete(&self, edge: &FollowEdge) -> Result<bool, FollowRepositoryError>;
}
