use std::collections::HashMap;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use sea_orm::*;
use tracing::instrument;
use uuid::Uuid;

use crate::entity::{blog, user};
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::user::{
    RegisterRequest, UserBlogItem, UserResponse, UserWithBlogs, validate_register_request,
};
use crate::state::AppState;
use crate::utils::hash;

#[utoipa::path(
    post,
    path = "/",
    tag = "Users",
    operation_id = "createUser",
    summary = "Register a new user",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 409, description = "Username already taken (USERNAME_TAKEN)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(username = %payload.username))]
pub async fn create_user(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_register_request(&payload)?;

    let hash = hash::hash_password(&payload.password)
        .map_err(|e| AppError::Internal(format!("Password hash error: {}", e)))?;

    let new_user = user::ActiveModel {
        id: Set(Uuid::now_v7()),
        username: Set(payload.username.trim().to_string()),
        name: Set(payload.name.trim().to_string()),
        password: Set(hash),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let user = new_user.insert(&state.db).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            tracing::debug!("Registration rejected: username already exists");
            AppError::UsernameTaken
        }
        _ => AppError::from(e),
    })?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Users",
    operation_id = "listUsers",
    summary = "List users with the blogs they own",
    responses(
        (status = 200, description = "All users", body = Vec<UserWithBlogs>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserWithBlogs>>, AppError> {
    let users = user::Entity::find()
        .order_by_asc(user::Column::CreatedAt)
        .all(&state.db)
        .await?;

    let owned = blog::Entity::find()
        .filter(blog::Column::UserId.is_not_null())
        .order_by_asc(blog::Column::CreatedAt)
        .all(&state.db)
        .await?;

    let mut by_owner: HashMap<Uuid, Vec<UserBlogItem>> = HashMap::new();
    for b in owned {
        if let Some(owner) = b.user_id {
            by_owner.entry(owner).or_default().push(b.try_into()?);
        }
    }

    let data = users
        .into_iter()
        .map(|u| UserWithBlogs {
            blogs: by_owner.remove(&u.id).unwrap_or_default(),
            id: u.id,
            username: u.username,
            name: u.name,
        })
        .collect();

    Ok(Json(data))
}
