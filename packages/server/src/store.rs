use async_trait::async_trait;
use bloglist_common::store::{BlogStore, StoreError};
use bloglist_common::{
    BlogId, BlogRecord, BlogUpdate, BlogWithOwner, NewBlog, OwnerSummary, UserId,
};
use sea_orm::*;
use uuid::Uuid;

use crate::entity::{blog, user};

/// [`BlogStore`] backed by the `blog` and `user` tables.
pub struct SeaOrmBlogStore {
    db: DatabaseConnection,
}

impl SeaOrmBlogStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn backend(err: DbErr) -> StoreError {
    StoreError::Backend(err.to_string())
}

fn likes_to_column(likes: u64) -> Result<i64, StoreError> {
    i64::try_from(likes).map_err(|_| StoreError::Backend(format!("likes out of range: {likes}")))
}

/// Read a `likes` column back. A negative value means the row was written
/// outside this store and is reported rather than clamped.
pub(crate) fn likes_from_column(blog_id: Uuid, likes: i64) -> Result<u64, StoreError> {
    u64::try_from(likes).map_err(|_| {
        tracing::warn!(%blog_id, likes, "negative likes column");
        StoreError::Backend(format!("blog {blog_id} has negative likes: {likes}"))
    })
}

impl TryFrom<blog::Model> for BlogRecord {
    type Error = StoreError;

    fn try_from(m: blog::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            likes: likes_from_column(m.id, m.likes)?,
            id: m.id.into(),
            title: m.title,
            author: m.author,
            url: m.url,
            owner: m.user_id.map(UserId::from),
        })
    }
}

impl From<user::Model> for OwnerSummary {
    fn from(m: user::Model) -> Self {
        Self {
            id: m.id.into(),
            username: m.username,
            name: m.name,
        }
    }
}

#[async_trait]
impl BlogStore for SeaOrmBlogStore {
    async fn find_by_id(&self, id: &BlogId) -> Result<Option<BlogRecord>, StoreError> {
        let model = blog::Entity::find_by_id(*id.as_uuid())
            .one(&self.db)
            .await
            .map_err(backend)?;
        model.map(BlogRecord::try_from).transpose()
    }

    async fn delete_by_id(&self, id: &BlogId) -> Result<bool, StoreError> {
        let result = blog::Entity::delete_by_id(*id.as_uuid())
            .exec(&self.db)
            .await
            .map_err(backend)?;
        Ok(result.rows_affected > 0)
    }

    async fn update_by_id(
        &self,
        id: &BlogId,
        update: BlogUpdate,
    ) -> Result<Option<BlogRecord>, StoreError> {
        let likes = likes_to_column(update.likes)?;
        let txn = self.db.begin().await.map_err(backend)?;

        let Some(existing) = blog::Entity::find_by_id(*id.as_uuid())
            .one(&txn)
            .await
            .map_err(backend)?
        else {
            return Ok(None);
        };

        let mut active: blog::ActiveModel = existing.into();
        active.title = Set(update.title);
        active.author = Set(update.author);
        active.url = Set(update.url);
        active.likes = Set(likes);

        let model = match active.update(&txn).await {
            Ok(model) => model,
            Err(DbErr::RecordNotUpdated) => return Ok(None),
            Err(e) => return Err(backend(e)),
        };
        txn.commit().await.map_err(backend)?;

        Ok(Some(model.try_into()?))
    }

    async fn list_all(&self) -> Result<Vec<BlogWithOwner>, StoreError> {
        let rows = blog::Entity::find()
            .find_also_related(user::Entity)
            .order_by_asc(blog::Column::CreatedAt)
            .order_by_asc(blog::Column::Id)
            .all(&self.db)
            .await
            .map_err(backend)?;

        rows.into_iter()
            .map(|(b, owner)| {
                Ok(BlogWithOwner {
                    record: b.try_into()?,
                    user: owner.map(OwnerSummary::from),
                })
            })
            .collect()
    }

    async fn insert(&self, new_blog: NewBlog, owner: UserId) -> Result<BlogRecord, StoreError> {
        let model = blog::ActiveModel {
            id: Set(*BlogId::new().as_uuid()),
            title: Set(new_blog.title),
            author: Set(new_blog.author),
            url: Set(new_blog.url),
            likes: Set(likes_to_column(new_blog.likes)?),
            user_id: Set(Some(owner.into())),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(backend)?;

        model.try_into()
    }
}
