//! PostgreSQL-backed `FollowRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::FollowEdge;
use crate::domain::ports::{FollowRepository, FollowRepositoryError};

use super::diesel_basic_error_mapping::{
    is_unique_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::NewFollowRow;
use super::pool::{DbPool, PoolError};
use super::schema::follows;

/// Diesel-backed implementation of the [`FollowRepository`] port.
///
/// Duplicate edges are rejected by the `(follower_id, following_id)` primary
/// key; the resulting unique violation is reported as
/// [`FollowRepositoryError::AlreadyExists`].
#[derive(Clone)]
pub struct DieselFollowRepository {
    pool: DbPool,
}

impl DieselFollowRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> FollowRepositoryError {
    map_basic_pool_error(error, FollowRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> FollowRepositoryError {
    map_basic_diesel_error(
        error,
        FollowRepositoryError::query,
        FollowRepositoryError::connection,
    )
}

/// Map a failed insert; the composite primary key turns duplicates into
/// unique violations.
fn map_insert_error(error: diesel::result::Error) -> FollowRepositoryError {
    if is_unique_violation(&error) {
        FollowRepositoryError::already_exists()
    } else {
        map_diesel_error(error)
    }
}

#[async_trait]
impl FollowRepository for DieselFollowRepository {
    async fn exists(&self, edge: &FollowEdge) -> Result<bool, FollowRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::select(exists(
            follows::table
                .filter(follows::follower_id.eq(edge.follower.as_uuid()))
                .filter(follows::following_id.eq(edge.following.as_uuid())),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_diesel_error)
    }

    async fn insert(&self, edge: &FollowEdge) -> Result<(), FollowRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewFollowRow {
            follower_id: *edge.follower.as_uuid(),
            following_id: *edge.following.as_uuid(),
        };

        diesel::insert_into(follows::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_insert_error)
    }

    async fn delete(&self, edge: &FollowEdge) -> Result<bool, FollowRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let removed = diesel::delete(
            follows::table
                .filter(follows::follower_id.eq(edge.follower.as_uuid()))
                .filter(follows::following_id.eq(edge.following.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(removed > 0)
    }
}
