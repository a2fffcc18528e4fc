use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

/// Request body for user login.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    /// Username of the account to log into.
    #[schema(example = "mluukkai")]
    pub username: String,
    /// Account password.
    #[schema(example = "salainen")]
    pub password: String,
}

pub fn validate_login_request(payload: &LoginRequest) -> Result<(), AppError> {
    if payload.username.trim().is_empty() {
        return Err(AppError::Validation("Username must not be empty".into()));
    }
    if payload.password.is_empty() {
        return Err(AppError::Validation("Password must not be empty".into()));
    }
    Ok(())
}

/// Successful login response.
#[derive(Serialize, utoipa::ToSchema)]
pub struct LoginResponse {
    /// JWT bearer token.
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub token: String,
    #[schema(example = "mluukkai")]
    pub username: String,
    #[schema(example = "Matti Luukkainen")]
    pub name: String,
}

/// Current authenticated user's profile.
#[derive(Serialize, utoipa::ToSchema)]
pub struct MeResponse {
    pub id: Uuid,
    #[schema(example = "mluukkai")]
    pub username: String,
    #[schema(example = "Matti Luukkainen")]
    pub name: String,
}
