//! Shared documents as seen from a profile page.
//!
//! Documents are authored elsewhere; this service only reads them and decides
//! which ones a given viewer may list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::UserId;

/// A document owned by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Document identifier.
    pub id: Uuid,
    /// Owner of the document.
    #[schema(value_type = String)]
    pub user_id: UserId,
    /// Display title.
    pub title: String,
    /// Whether non-owners may see the document.
    pub is_public: bool,
    /// Creation timestamp, used for newest-first ordering.
    pub created_at: DateTime<Utc>,
}

impl Document {
    /// Whether `viewer` may list this document.
    ///
    /// Public documents are visible to everyone; private ones only to their
    /// owner. Anonymous viewers (`None`) match no owner.
    ///
    /// # Examples
    /// ```
    /// use chrono::Utc;
    /// use docshare::domain::{Document, UserId};
    /// use uuid::Uuid;
    ///
    /// let owner = UserId::random();
    /// let doc = Document {
    ///     id: Uuid::new_v4(),
    ///     user_id: owner.clone(),
    ///     title: "schema".into(),
    ///     is_public: false,
    ///     created_at: Utc::now(),
    /// };
    /// assert!(doc.is_visible_to(Some(&owner)));
    /// assert!(!doc.is_visible_to(None));
    /// ```
    pub fn is_visible_to(&self, viewer: Option<&UserId>) -> bool {
        self.is_public || viewer.is_some_and(|viewer| viewer == &self.user_id)
    }
}

/// Query for the documents listed on a profile page.
///
/// Matches documents where `user_id == owner` and the document is public or
/// owned by `viewer`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileDocumentsQuery {
    /// Profile whose documents are listed.
    pub owner: UserId,
    /// Authenticated viewer, if any.
    pub viewer: Option<UserId>,
}

impl ProfileDocumentsQuery {
    /// Build the query for `owner`'s profile as seen by `viewer`.
    pub fn new(owner: UserId, viewer: Option<UserId>) -> Self {
        Self { owner, viewer }
    }

    /// Whether the viewer is looking at their own profile, in which case
    /// private documents are included.
    pub fn includes_private(&self) -> bool {
        self.viewer.as_ref() == Some(&self.owner)
    }

    /// Apply the query to a single document.
    pub fn matches(&self, document: &Document) -> bool {
        document.user_id == self.owner && document.is_visible_to(self.viewer.as_ref())
    }
}
