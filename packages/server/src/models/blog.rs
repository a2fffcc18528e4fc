use bloglist_common::{
    AuthorBlogs, AuthorLikes, BlogRecord, BlogStats, BlogUpdate, BlogWithOwner, NewBlog,
    OwnerSummary,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

/// Body of both `POST /blogs` and `PUT /blogs/{id}`. Every field is replaced.
///
/// `title` and `url` are required and must not be blank; `author` is required
/// but may be empty; `likes` defaults to 0.
#[derive(Deserialize, Default, utoipa::ToSchema)]
pub struct BlogRequest {
    #[schema(example = "React patterns")]
    pub title: Option<String>,
    #[schema(example = "Michael Chan")]
    pub author: Option<String>,
    #[schema(example = "https://reactpatterns.com/")]
    pub url: Option<String>,
    #[schema(example = 7)]
    pub likes: Option<i64>,
}

/// Fields after the HTTP-level checks. Blank titles and urls pass through
/// here and are rejected by the domain workflow.
struct BlogFields {
    title: String,
    author: String,
    url: String,
    likes: u64,
}

fn validate_blog_request(payload: BlogRequest) -> Result<BlogFields, AppError> {
    let author = payload
        .author
        .ok_or_else(|| AppError::Validation("author is required".into()))?;

    let likes = match payload.likes {
        None => 0,
        Some(n) => u64::try_from(n)
            .map_err(|_| AppError::Validation("likes must be >= 0".into()))?,
    };

    Ok(BlogFields {
        title: payload.title.unwrap_or_default().trim().to_string(),
        author,
        url: payload.url.unwrap_or_default().trim().to_string(),
        likes,
    })
}

impl TryFrom<BlogRequest> for NewBlog {
    type Error = AppError;

    fn try_from(payload: BlogRequest) -> Result<Self, Self::Error> {
        let f = validate_blog_request(payload)?;
        Ok(NewBlog {
            title: f.title,
            author: f.author,
            url: f.url,
            likes: f.likes,
        })
    }
}

impl TryFrom<BlogRequest> for BlogUpdate {
    type Error = AppError;

    fn try_from(payload: BlogRequest) -> Result<Self, Self::Error> {
        let f = validate_blog_request(payload)?;
        Ok(BlogUpdate {
            title: f.title,
            author: f.author,
            url: f.url,
            likes: f.likes,
        })
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct BlogResponse {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub url: String,
    pub likes: u64,
    /// Id of the owning user; null on legacy blogs.
    pub user: Option<Uuid>,
}

impl From<BlogRecord> for BlogResponse {
    fn from(r: BlogRecord) -> Self {
        Self {
            id: r.id.into(),
            title: r.title,
            author: r.author,
            url: r.url,
            likes: r.likes,
            user: r.owner.map(Uuid::from),
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct BlogOwner {
    pub id: Uuid,
    pub username: String,
    pub name: String,
}

impl From<OwnerSummary> for BlogOwner {
    fn from(o: OwnerSummary) -> Self {
        Self {
            id: o.id.into(),
            username: o.username,
            name: o.name,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct BlogListItem {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub url: String,
    pub likes: u64,
    /// Owner identity, or null if the blog has no owner or the owner is gone.
    pub user: Option<BlogOwner>,
}

impl From<BlogWithOwner> for BlogListItem {
    fn from(entry: BlogWithOwner) -> Self {
        let r = entry.record;
        Self {
            id: r.id.into(),
            title: r.title,
            author: r.author,
            url: r.url,
            likes: r.likes,
            user: entry.user.map(BlogOwner::from),
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct AuthorBlogsResponse {
    #[schema(example = "Robert C. Martin")]
    pub author: String,
    #[schema(example = 3)]
    pub blogs: usize,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct AuthorLikesResponse {
    #[schema(example = "Edsger W. Dijkstra")]
    pub author: String,
    #[schema(example = 17)]
    pub likes: u128,
}

/// Aggregates over every stored blog. Ties resolve to the earliest blog.
#[derive(Serialize, utoipa::ToSchema)]
pub struct BlogStatsResponse {
    pub total_likes: u128,
    pub favorite_blog: Option<BlogResponse>,
    pub most_blogs: Option<AuthorBlogsResponse>,
    pub most_likes: Option<AuthorLikesResponse>,
}

impl From<BlogStats> for BlogStatsResponse {
    fn from(s: BlogStats) -> Self {
        Self {
            total_likes: s.total_likes,
            favorite_blog: s.favorite_blog.map(BlogResponse::from),
            most_blogs: s
                .most_blogs
                .map(|AuthorBlogs { author, blogs }| AuthorBlogsResponse { author, blogs }),
            most_likes: s
                .most_likes
                .map(|AuthorLikes { author, likes }| AuthorLikesResponse { author, likes }),
        }
    }
}
