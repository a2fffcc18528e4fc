//! Blog workflows that sit between a request handler and a [`BlogStore`].
//!
//! Each function validates its input before touching the store and returns a
//! typed [`BlogError`] that callers translate into their own responses.

use thiserror::Error;
use tracing::{debug, warn};

use crate::id::{BlogId, UserId};
use crate::ownership::can_delete;
use crate::record::{BlogRecord, BlogUpdate, BlogWithOwner, NewBlog};
use crate::stats::{self, BlogStats};
use crate::store::{BlogStore, StoreError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlogError {
    /// The request cannot be acted on as given: malformed id, missing field,
    /// or a record that has no owner being targeted for deletion.
    #[error("{0}")]
    PreconditionFailed(String),
    #[error("{0}")]
    NotFound(String),
    /// Returned only after the record is known to exist.
    #[error("only the creator can delete this blog")]
    Forbidden,
    #[error("unexpected store failure: {0}")]
    Unexpected(String),
}

impl From<StoreError> for BlogError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::MalformedId(id) => {
                Self::PreconditionFailed(format!("Invalid ID format: {id}"))
            }
            StoreError::Backend(detail) => Self::Unexpected(detail),
        }
    }
}

fn parse_id(raw: &str) -> Result<BlogId, BlogError> {
    BlogId::parse(raw).map_err(|_| BlogError::PreconditionFailed("Invalid ID format".into()))
}

fn not_found() -> BlogError {
    BlogError::NotFound("Blog not found".into())
}

fn require_non_empty(field: &str, value: &str) -> Result<(), BlogError> {
    if value.trim().is_empty() {
        return Err(BlogError::PreconditionFailed(format!("{field} is required")));
    }
    Ok(())
}

/// Store a new record owned by `actor`. `likes` keeps whatever the caller
/// supplied, which is zero when the field was omitted.
pub async fn create_blog<S>(
    store: &S,
    actor: UserId,
    blog: NewBlog,
) -> Result<BlogRecord, BlogError>
where
    S: BlogStore + ?Sized,
{
    require_non_empty("title", &blog.title)?;
    require_non_empty("url", &blog.url)?;

    let record = store.insert(blog, actor).await?;
    debug!(blog_id = %record.id, owner = %actor, "blog created");
    Ok(record)
}

pub async fn list_blogs<S>(store: &S) -> Result<Vec<BlogWithOwner>, BlogError>
where
    S: BlogStore + ?Sized,
{
    Ok(store.list_all().await?)
}

/// Replace every editable field of a record.
///
/// No ownership check is made here, unlike [`delete_blog`]: any caller may
/// edit any record.
pub async fn update_blog<S>(
    store: &S,
    raw_id: &str,
    update: BlogUpdate,
) -> Result<BlogRecord, BlogError>
where
    S: BlogStore + ?Sized,
{
    let id = parse_id(raw_id)?;
    require_non_empty("title", &update.title)?;
    require_non_empty("url", &update.url)?;

    let updated = store
        .update_by_id(&id, update)
        .await?
        .ok_or_else(not_found)?;
    debug!(blog_id = %id, likes = updated.likes, "blog updated");
    Ok(updated)
}

/// Delete a record on behalf of `actor`.
///
/// Checks run in a fixed order: id syntax, existence, presence of an owner,
/// then ownership. A record that disappears between the lookup and the
/// delete is reported as not found.
pub async fn delete_blog<S>(store: &S, actor: &UserId, raw_id: &str) -> Result<(), BlogError>
where
    S: BlogStore + ?Sized,
{
    let id = parse_id(raw_id)?;

    let record = store.find_by_id(&id).await?.ok_or_else(not_found)?;

    if record.owner.is_none() {
        debug!(blog_id = %id, "refusing to delete blog without an owner");
        return Err(BlogError::PreconditionFailed(
            "Blog has no associated user".into(),
        ));
    }

    if !can_delete(actor, &record) {
        warn!(blog_id = %id, actor = %actor, "delete attempted by non-owner");
        return Err(BlogError::Forbidden);
    }

    if !store.delete_by_id(&id).await? {
        debug!(blog_id = %id, "blog vanished before delete");
        return Err(not_found());
    }

    debug!(blog_id = %id, "blog deleted");
    Ok(())
}

/// Aggregate statistics over every stored record.
pub async fn blog_stats<S>(store: &S) -> Result<BlogStats, BlogError>
where
    S: BlogStore + ?Sized,
{
    let records: Vec<BlogRecord> = store
        .list_all()
        .await?
        .into_iter()
        .map(|entry| entry.record)
        .collect();
    Ok(stats::summarize(&records))
}
