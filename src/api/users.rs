use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;

use super::auth::CurrentUser;
use super::{ApiError, ApiResponse, AppState, RegisterRequest, UserDto, UserFlagsRequest};
use crate::db::is_unique_violation;

const MIN_PASSWORD_LEN: usize = 8;

/// POST /auth/register
/// Public registration; accounts start as regular active users.
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if payload.username.trim().is_empty() {
        return Err(ApiError::validation("Username is required"));
    }
    if payload.password.len() < MIN_PASSWORD_LEN {
        return Err(ApiError::validation(
            "Password must be at least 8 characters",
        ));
    }

    let security = state.config().read().await.security.clone();

    let user = state
        .store()
        .create_user(payload.username.trim(), &payload.password, &security)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                ApiError::Conflict("Username already taken".to_string())
            } else {
                ApiError::DatabaseError(e.to_string())
            }
        })?;

    tracing::info!("Registered user: {}", user.username);

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(UserDto::from(user))),
    ))
}

/// GET /users
/// All non-deleted users (superuser only)
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(caller)): Extension<CurrentUser>,
) -> Result<Json<ApiResponse<Vec<UserDto>>>, ApiError> {
    require_superuser(&caller)?;

    let users = state
        .store()
        .list_users()
        .await
        .map_err(|e| ApiError::internal(format!("Failed to list users: {e}")))?;

    Ok(Json(ApiResponse::success(
        users.into_iter().map(UserDto::from).collect(),
    )))
}

/// GET /users/{id}
/// A single user; callers may read themselves, superusers anyone.
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(caller)): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    if caller.id != id {
        require_superuser(&caller)?;
    }

    let user = state
        .store()
        .get_user_by_id(id)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to get user: {e}")))?
        .filter(|u| !u.is_deleted())
        .ok_or_else(|| ApiError::not_found("User", id))?;

    Ok(Json(ApiResponse::success(UserDto::from(user))))
}

/// PUT /users/{id}
/// Toggle administrative flags (superuser only)
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(caller)): Extension<CurrentUser>,
    Path(id): Path<i32>,
    Json(payload): Json<UserFlagsRequest>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    require_superuser(&caller)?;

    let user = state
        .store()
        .update_user_flags(id, payload.is_superuser, payload.is_active)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to update user: {e}")))?
        .ok_or_else(|| ApiError::not_found("User", id))?;

    tracing::info!(
        "Updated flags for user {} (superuser={}, active={})",
        user.username,
        user.is_superuser,
        user.is_active
    );

    Ok(Json(ApiResponse::success(UserDto::from(user))))
}

/// DELETE /users/{id}
/// Soft delete (superuser only); the record is kept for history.
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(caller)): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    require_superuser(&caller)?;

    let deleted = state
        .store()
        .soft_delete_user(id)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to delete user: {e}")))?;

    if !deleted {
        return Err(ApiError::not_found("User", id));
    }

    Ok(StatusCode::NO_CONTENT)
}

fn require_superuser(caller: &crate::models::User) -> Result<(), ApiError> {
    if caller.is_superuser {
        Ok(())
    } else {
        Err(ApiError::Forbidden(
            "Superuser privileges required".to_string(),
        ))
    }
}
