//! PostgreSQL-backed `DocumentRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{DocumentRepository, DocumentRepositoryError};
use crate::domain::{Document, ProfileDocumentsQuery, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::DocumentRow;
use super::pool::{DbPool, PoolError};
use super::schema::documents;

/// Diesel-backed implementation of the [`DocumentRepository`] port.
#[derive(Clone)]
pub struct DieselDocumentRepository {
    pool: DbPool,
}

impl DieselDocumentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> DocumentRepositoryError {
    map_basic_pool_error(error, DocumentRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> DocumentRepositoryError {
    map_basic_diesel_error(
        error,
        DocumentRepositoryError::query,
        DocumentRepositoryError::connection,
    )
}

fn row_to_document(row: DocumentRow) -> Document {
    Document {
        id: row.id,
        user_id: UserId::from_uuid(row.user_id),
        title: row.title,
        is_public: row.is_public,
        created_at: row.created_at,
    }
}

/// Documents owned by `query.owner`, newest first, restricted to public ones
/// unless the owner is the viewer.
fn profile_documents(query: &ProfileDocumentsQuery) -> documents::BoxedQuery<'static, Pg> {
    let statement = documents::table
        .filter(documents::user_id.eq(*query.owner.as_uuid()))
        .order(documents::created_at.desc())
        .into_boxed();
    if query.includes_private() {
        statement
    } else {
        statement.filter(documents::is_public.eq(true))
    }
}

#[async_trait]
impl DocumentRepository for DieselDocumentRepository {
    async fn list_for_profile(
        &self,
        query: &ProfileDocumentsQuery,
    ) -> Result<Vec<Document>, DocumentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<DocumentRow> = profile_documents(query)
            .select(DocumentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(row_to_document).collect())
    }
}
