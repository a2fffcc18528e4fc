use serde::{Deserialize, Serialize};

use crate::id::{BlogId, UserId};

/// A single blog post.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogRecord {
    pub id: BlogId,
    pub title: String,
    pub author: String,
    pub url: String,
    #[serde(default)]
    pub likes: u64,
    /// Absent on records that were stored before ownership was tracked.
    pub owner: Option<UserId>,
}

/// Fields supplied when a record is created. The owner is not part of the
/// input; it is always the acting user.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct NewBlog {
    pub title: String,
    pub author: String,
    pub url: String,
    #[serde(default)]
    pub likes: u64,
}

/// Full replacement of a record's editable fields.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct BlogUpdate {
    pub title: String,
    pub author: String,
    pub url: String,
    #[serde(default)]
    pub likes: u64,
}

/// Minimal identity of a record's owner, joined into listings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerSummary {
    pub id: UserId,
    pub username: String,
    pub name: String,
}

/// A record together with its owner, if the owner is known and still exists.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlogWithOwner {
    pub record: BlogRecord,
    pub user: Option<OwnerSummary>,
}

impl NewBlog {
    pub(crate) fn into_record(self, id: BlogId, owner: UserId) -> BlogRecord {
        BlogRecord {
            id,
            title: self.title,
            author: self.author,
            url: self.url,
            likes: self.likes,
            owner: Some(owner),
        }
    }
}

impl BlogRecord {
    /// Overwrite every editable field, keeping identity and owner.
    pub fn apply(&mut self, update: BlogUpdate) {
        self.title = update.title;
        self.author = update.author;
        self.url = update.url;
        self.likes = update.likes;
    }
}
