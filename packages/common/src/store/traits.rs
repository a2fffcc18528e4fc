use async_trait::async_trait;

use super::error::StoreError;
use crate::id::{BlogId, UserId};
use crate::record::{BlogRecord, BlogUpdate, BlogWithOwner, NewBlog};

/// Persistence boundary for blog records.
///
/// Implementations must make each single-record operation linearizable.
/// Callers validate id syntax before calling in; an implementation may still
/// report [`StoreError::MalformedId`] for ids its backend cannot accept.
#[async_trait]
pub trait BlogStore: Send + Sync {
    /// Fetch one record.
    async fn find_by_id(&self, id: &BlogId) -> Result<Option<BlogRecord>, StoreError>;

    /// Remove one record.
    ///
    /// Returns `true` if the record was deleted, `false` if it did not exist.
    async fn delete_by_id(&self, id: &BlogId) -> Result<bool, StoreError>;

    /// Replace the editable fields of one record, returning the stored result.
    async fn update_by_id(
        &self,
        id: &BlogId,
        update: BlogUpdate,
    ) -> Result<Option<BlogRecord>, StoreError>;

    /// Every record joined with its owner, oldest first.
    async fn list_all(&self) -> Result<Vec<BlogWithOwner>, StoreError>;

    /// Persist a new record owned by `owner`.
    async fn insert(&self, blog: NewBlog, owner: UserId) -> Result<BlogRecord, StoreError>;
}
