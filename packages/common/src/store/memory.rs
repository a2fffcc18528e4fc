use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::error::StoreError;
use super::traits::BlogStore;
use crate::id::{BlogId, UserId};
use crate::record::{BlogRecord, BlogUpdate, BlogWithOwner, NewBlog, OwnerSummary};

/// Process-local [`BlogStore`] that keeps records in insertion order.
#[derive(Default)]
pub struct InMemoryBlogStore {
    records: RwLock<Vec<BlogRecord>>,
    owners: RwLock<HashMap<UserId, OwnerSummary>>,
}

impl InMemoryBlogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing records, e.g. legacy ones without an owner.
    pub fn with_records(records: Vec<BlogRecord>) -> Self {
        Self {
            records: RwLock::new(records),
            owners: RwLock::default(),
        }
    }

    /// Make an owner's identity available to [`BlogStore::list_all`].
    pub async fn register_owner(&self, owner: OwnerSummary) {
        self.owners.write().await.insert(owner.id, owner);
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl BlogStore for InMemoryBlogStore {
    async fn find_by_id(&self, id: &BlogId) -> Result<Option<BlogRecord>, StoreError> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| &r.id == id).cloned())
    }

    async fn delete_by_id(&self, id: &BlogId) -> Result<bool, StoreError> {
        let mut records = self.records.write().await;
        match records.iter().position(|r| &r.id == id) {
            Some(pos) => {
                records.remove(pos);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn update_by_id(
        &self,
        id: &BlogId,
        update: BlogUpdate,
    ) -> Result<Option<BlogRecord>, StoreError> {
        let mut records = self.records.write().await;
        Ok(records.iter_mut().find(|r| &r.id == id).map(|record| {
            record.apply(update);
            record.clone()
        }))
    }

    async fn list_all(&self) -> Result<Vec<BlogWithOwner>, StoreError> {
        let records = self.records.read().await;
        let owners = self.owners.read().await;
        Ok(records
            .iter()
            .map(|record| BlogWithOwner {
                user: record.owner.and_then(|id| owners.get(&id).cloned()),
                record: record.clone(),
            })
            .collect())
    }

    async fn insert(&self, blog: NewBlog, owner: UserId) -> Result<BlogRecord, StoreError> {
        let record = blog.into_record(BlogId::new(), owner);
        self.records.write().await.push(record.clone());
        Ok(record)
    }
}
