//! In-memory `DocumentRepository`.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{DocumentRepository, DocumentRepositoryError};
use crate::domain::{Document, ProfileDocumentsQuery};

use super::lock;

/// Document store seeded through [`InMemoryDocumentRepository::insert`].
#[derive(Debug, Default)]
pub struct InMemoryDocumentRepository {
    documents: Mutex<Vec<Document>>,
}

impl InMemoryDocumentRepository {
    /// Store `document`.
    ///
    /// # Errors
    /// Fails only if the store's lock was poisoned.
    pub fn insert(&self, document: Document) -> Result<(), DocumentRepositoryError> {
        lock(&self.documents, DocumentRepositoryError::query)?.push(document);
        Ok(())
    }
}

#[async_trait]
impl DocumentRepository for InMemoryDocumentRepository {
    async fn list_for_profile(
        &self,
        query: &ProfileDocumentsQuery,
    ) -> Result<Vec<Document>, DocumentRepositoryError> {
        let mut matching: Vec<Document> = lock(&self.documents, DocumentRepositoryError::query)?
            .iter()
            .filter(|document| query.matches(document))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matching)
    }
}
