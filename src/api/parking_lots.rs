use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;

use super::auth::CurrentUser;
use super::{ApiError, ApiResponse, AppState, ParkingLotDto};
use crate::models::{NewParkingLot, ParkingLotUpdate};

/// GET /parking_lots
pub async fn list_parking_lots(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<ParkingLotDto>>>, ApiError> {
    let lots = state.lots().list().await?;

    Ok(Json(ApiResponse::success(
        lots.into_iter().map(ParkingLotDto::from).collect(),
    )))
}

/// POST /parking_lots (superuser only)
pub async fn create_parking_lot(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(caller)): Extension<CurrentUser>,
    Json(payload): Json<NewParkingLot>,
) -> Result<impl IntoResponse, ApiError> {
    if payload.name.trim().is_empty() {
        return Err(ApiError::validation("Name is required"));
    }

    let lot = state.lots().create(&caller, payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(ParkingLotDto::from(lot))),
    ))
}

/// GET /parking_lots/{id}
pub async fn get_parking_lot(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<ParkingLotDto>>, ApiError> {
    let lot = state.lots().get(id).await?;

    Ok(Json(ApiResponse::success(ParkingLotDto::from(lot))))
}

/// PUT /parking_lots/{id} (superuser only)
pub async fn update_parking_lot(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(caller)): Extension<CurrentUser>,
    Path(id): Path<i32>,
    Json(payload): Json<ParkingLotUpdate>,
) -> Result<Json<ApiResponse<ParkingLotDto>>, ApiError> {
    if payload.name.trim().is_empty() {
        return Err(ApiError::validation("Name is required"));
    }

    let lot = state.lots().update(&caller, id, payload).await?;

    Ok(Json(ApiResponse::success(ParkingLotDto::from(lot))))
}

/// DELETE /parking_lots/{id} (superuser only, soft)
pub async fn delete_parking_lot(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(caller)): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state.lots().delete(&caller, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
