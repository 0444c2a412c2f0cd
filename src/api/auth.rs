use axum::{
    Json,
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, LoginRequest, LogoutRequest, RefreshRequest,
    TokenPairResponse, UserDto};
use crate::models::User;

/// The authenticated caller, injected by the middleware for every
/// protected route.
#[derive(Clone)]
pub struct CurrentUser(pub User);

// ============================================================================
// Middleware
// ============================================================================

/// Resolves the `Authorization: Bearer` token to an active user and makes
/// it available as a request extension. Requests without a usable token
/// never reach the protected handlers.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(token) = bearer_token(&headers) else {
        return Err(ApiError::Unauthorized("Not authenticated".to_string()));
    };

    let user = state.auth().authenticate(&token).await?;

    tracing::Span::current().record("user_id", user.id);
    request.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(request).await)
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let auth_header = headers.get("Authorization")?;
    let auth_str = auth_header.to_str().ok()?;
    let token = auth_str.strip_prefix("Bearer ")?;
    Some(token.trim().to_string())
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /auth/login
/// Exchange username and password for an access/refresh token pair
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<ApiResponse<TokenPairResponse>>, ApiError> {
    if payload.username.is_empty() {
        return Err(ApiError::validation("Username is required"));
    }
    if payload.password.is_empty() {
        return Err(ApiError::validation("Password is required"));
    }

    let pair = state
        .auth()
        .login(&payload.username, &payload.password)
        .await?;

    Ok(Json(ApiResponse::success(TokenPairResponse::bearer(pair))))
}

/// POST /auth/refresh
/// Rotate a refresh token into a new token pair
pub async fn refresh(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RefreshRequest>,
) -> Result<Json<ApiResponse<TokenPairResponse>>, ApiError> {
    let pair = state.auth().refresh(&payload.refresh_token).await?;

    Ok(Json(ApiResponse::success(TokenPairResponse::bearer(pair))))
}

/// POST /auth/logout
/// Revoke the presented access token (and refresh token, when supplied)
pub async fn logout(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Option<Json<LogoutRequest>>,
) -> Result<impl IntoResponse, ApiError> {
    let Some(token) = bearer_token(&headers) else {
        return Err(ApiError::Unauthorized("Not authenticated".to_string()));
    };

    let refresh_token = payload.and_then(|Json(body)| body.refresh_token);

    state
        .auth()
        .logout(&token, refresh_token.as_deref())
        .await?;

    Ok((StatusCode::OK, "Logged out"))
}

/// GET /auth/me
/// Current user information
pub async fn get_current_user(
    axum::Extension(CurrentUser(user)): axum::Extension<CurrentUser>,
) -> Json<ApiResponse<UserDto>> {
    Json(ApiResponse::success(UserDto::from(user)))
}
