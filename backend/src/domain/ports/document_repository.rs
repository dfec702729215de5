//! Port for reading documents shown on profile pages.

use async_trait::async_trait;

use crate::domain::{Document, ProfileDocumentsQuery};

use super::define_port_error;

define_port_error! {
    /// Errors raised by document repository adapters.
    pub enum DocumentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "document repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } => "document repository query failed: {message}",
    }
}

/// Read-only access to the document store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Documents matching `query`, newest first. Each call hits the store
    /// afresh; adapters must not cache results across calls.
    async fn list_for_profile(
        &self,
        query: &ProfileDocumentsQuery,
    ) -> Result<Vec<Document>, DocumentRepositoryError>;
}
