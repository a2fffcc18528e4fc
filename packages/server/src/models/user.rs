use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

/// Request body for creating a user.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct RegisterRequest {
    /// Unique username (3-32 chars, alphanumeric and underscores).
    #[schema(example = "mluukkai")]
    pub username: String,
    /// Display name, up to 64 characters.
    #[serde(default)]
    #[schema(example = "Matti Luukkainen")]
    pub name: String,
    /// Password (8-128 characters).
    #[schema(example = "salainen1")]
    pub password: String,
}

pub fn validate_register_request(payload: &RegisterRequest) -> Result<(), AppError> {
    let username = payload.username.trim();
    let len = username.chars().count();
    if !(3..=32).contains(&len) {
        return Err(AppError::Validation(
            "Username must be 3-32 characters".into(),
        ));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(AppError::Validation(
            "Username must contain only letters, digits, and underscores".into(),
        ));
    }
    if payload.name.trim().chars().count() > 64 {
        return Err(AppError::Validation(
            "Name must be at most 64 characters".into(),
        ));
    }
    if payload.password.len() < 8 || payload.password.len() > 128 {
        return Err(AppError::Validation(
            "Password must be 8-128 characters".into(),
        ));
    }
    Ok(())
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    #[schema(example = "mluukkai")]
    pub username: String,
    #[schema(example = "Matti Luukkainen")]
    pub name: String,
}

impl From<crate::entity::user::Model> for UserResponse {
    fn from(user: crate::entity::user::Model) -> Self {
        Self {
            id: user.id,
            username: user.username,
            name: user.name,
        }
    }
}

/// A blog as listed under its owner.
#[derive(Serialize, utoipa::ToSchema)]
pub struct UserBlogItem {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub url: String,
    pub likes: u64,
}

impl TryFrom<crate::entity::blog::Model> for UserBlogItem {
    type Error = AppError;

    fn try_from(m: crate::entity::blog::Model) -> Result<Self, Self::Error> {
        let likes = crate::store::likes_from_column(m.id, m.likes)
            .map_err(|e| AppError::Internal(e.to_string()))?;
        Ok(Self {
            id: m.id,
            title: m.title,
            author: m.author,
            url: m.url,
            likes,
        })
    }
}

/// A user with every blog they own.
#[derive(Serialize, utoipa::ToSchema)]
pub struct UserWithBlogs {
    pub id: Uuid,
    pub username: String,
    pub name: String,
    pub blogs: Vec<UserBlogItem>,
}
