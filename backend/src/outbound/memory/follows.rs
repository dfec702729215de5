//! In-memory `FollowRepository`.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::FollowEdge;
use crate::domain::ports::{FollowRepository, FollowRepositoryError};

use super::lock;

/// Follow edges held in a set, so each pair is stored at most once.
#[derive(Debug, Default)]
pub struct InMemoryFollowRepository {
    edges: Mutex<HashSet<FollowEdge>>,
}

impl InMemoryFollowRepository {
    /// Number of stored edges.
    pub fn len(&self) -> usize {
        self.edges.lock().map(|edges| edges.len()).unwrap_or_default()
    }

    /// True when no edges are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl FollowRepository for InMemoryFollowRepository {
    async fn exists(&self, edge: &FollowEdge) -> Result<bool, FollowRepositoryError> {
        Ok(lock(&self.edges, FollowRepositoryError::query)?.contains(edge))
    }

    async fn insert(&self, edge: &FollowEdge) -> Result<(), FollowRepositoryError> {
        if lock(&self.edges, FollowRepositoryError::query)?.insert(edge.clone()) {
            Ok(())
        } else {
            Err(FollowRepositoryError::already_exists())
        }
    }

    async fn delete(&self, edge: &FollowEdge) -> Result<bool, FollowRepositoryError> {
        Ok(lock(&self.edges, FollowRepositoryError::query)?.remove(edge))
    }
}
