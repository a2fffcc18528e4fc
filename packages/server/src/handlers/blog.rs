use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use bloglist_common::service;
use bloglist_common::{BlogUpdate, NewBlog};
use sea_orm::EntityTrait;
use tracing::instrument;

use crate::entity::user;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::blog::*;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/",
    tag = "Blogs",
    operation_id = "listBlogs",
    summary = "List every blog with its owner",
    description = "Returns all blogs, oldest first. Each blog carries the owner's id, username and name, or null when it has no owner.",
    responses(
        (status = 200, description = "All blogs", body = Vec<BlogListItem>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_blogs(
    State(state): State<AppState>,
) -> Result<Json<Vec<BlogListItem>>, AppError> {
    let blogs = service::list_blogs(state.blogs.as_ref()).await?;
    Ok(Json(blogs.into_iter().map(BlogListItem::from).collect()))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Blogs",
    operation_id = "createBlog",
    summary = "Create a blog owned by the caller",
    description = "`title` and `url` are required. `likes` defaults to 0 when omitted.",
    request_body = BlogRequest,
    responses(
        (status = 201, description = "Blog created", body = BlogResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(
    skip(state, auth_user, payload),
    fields(user_id = %auth_user.user_id, username = %auth_user.username)
)]
pub async fn create_blog(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<BlogRequest>,
) -> Result<impl IntoResponse, AppError> {
    let new_blog = NewBlog::try_from(payload)?;

    // The token may outlive its user.
    user::Entity::find_by_id(*auth_user.user_id.as_uuid())
        .one(&state.db)
        .await?
        .ok_or(AppError::TokenInvalid)?;

    let record = service::create_blog(state.blogs.as_ref(), auth_user.user_id, new_blog).await?;

    Ok((StatusCode::CREATED, Json(BlogResponse::from(record))))
}

/// Replace a blog's fields.
///
/// This route does not require authentication and does not check ownership,
/// while deletion does both.
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Blogs",
    operation_id = "updateBlog",
    summary = "Replace a blog's title, author, url and likes",
    description = "Full replacement: every field is overwritten. No authentication or ownership check is applied.",
    params(("id" = String, Path, description = "Blog ID (UUID)")),
    request_body = BlogRequest,
    responses(
        (status = 200, description = "Blog updated", body = BlogResponse),
        (status = 400, description = "Malformed id or invalid fields (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Blog not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn update_blog(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<BlogRequest>,
) -> Result<Json<BlogResponse>, AppError> {
    let update = BlogUpdate::try_from(payload)?;
    let record = service::update_blog(state.blogs.as_ref(), &id, update).await?;
    Ok(Json(record.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Blogs",
    operation_id = "deleteBlog",
    summary = "Delete a blog",
    description = "Only the blog's creator may delete it. Blogs without a recorded owner cannot be deleted.",
    params(("id" = String, Path, description = "Blog ID (UUID)")),
    responses(
        (status = 204, description = "Blog deleted"),
        (status = 400, description = "Malformed id or blog without owner (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Caller is not the creator (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Blog not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(
    skip(state, auth_user),
    fields(user_id = %auth_user.user_id, username = %auth_user.username)
)]
pub async fn delete_blog(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    service::delete_blog(state.blogs.as_ref(), &auth_user.user_id, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/stats",
    tag = "Blogs",
    operation_id = "blogStats",
    summary = "Aggregate statistics over all blogs",
    description = "Total likes, the most-liked blog, the author with most blogs and the author with most likes. Ties go to whichever appears first in creation order.",
    responses(
        (status = 200, description = "Statistics", body = BlogStatsResponse),
    ),
)]
#[instrument(skip(state))]
pub async fn blog_stats(
    State(state): State<AppState>,
) -> Result<Json<BlogStatsResponse>, AppError> {
    let stats = service::blog_stats(state.blogs.as_ref()).await?;
    Ok(Json(stats.into()))
}
