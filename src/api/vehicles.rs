use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;

use super::auth::CurrentUser;
use super::{ApiError, ApiResponse, AppState, CreateVehicleRequest, VehicleDto};
use crate::db::is_unique_violation;

/// GET /vehicles
/// The caller's vehicles; superusers see every vehicle.
pub async fn list_vehicles(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(caller)): Extension<CurrentUser>,
) -> Result<Json<ApiResponse<Vec<VehicleDto>>>, ApiError> {
    let vehicles = if caller.is_superuser {
        state.store().list_vehicles().await
    } else {
        state.store().list_vehicles_by_owner(caller.id).await
    }
    .map_err(|e| ApiError::internal(format!("Failed to list vehicles: {e}")))?;

    Ok(Json(ApiResponse::success(
        vehicles.into_iter().map(VehicleDto::from).collect(),
    )))
}

/// POST /vehicles
/// Registers a vehicle owned by the caller.
pub async fn create_vehicle(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(caller)): Extension<CurrentUser>,
    Json(payload): Json<CreateVehicleRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if payload.license_plate.trim().is_empty() {
        return Err(ApiError::validation("License plate is required"));
    }
    if payload.vehicle_type.trim().is_empty() {
        return Err(ApiError::validation("Vehicle type is required"));
    }

    let vehicle = state
        .store()
        .insert_vehicle(
            caller.id,
            payload.license_plate.trim(),
            payload.vehicle_type.trim(),
            payload.is_tracked,
        )
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                ApiError::Conflict("Vehicle already registered".to_string())
            } else {
                ApiError::DatabaseError(e.to_string())
            }
        })?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(VehicleDto::from(vehicle))),
    ))
}

/// GET /vehicles/{id}
pub async fn get_vehicle(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(caller)): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<VehicleDto>>, ApiError> {
    let vehicle = state
        .store()
        .get_vehicle(id)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to get vehicle: {e}")))?
        .ok_or_else(|| ApiError::not_found("Vehicle", id))?;

    if vehicle.owner_id != caller.id && !caller.is_superuser {
        // Hidden rather than forbidden; ownership is not disclosed.
        return Err(ApiError::not_found("Vehicle", id));
    }

    Ok(Json(ApiResponse::success(VehicleDto::from(vehicle))))
}

/// DELETE /vehicles/{id}
/// Owner or superuser; hard delete.
pub async fn delete_vehicle(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(caller)): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let vehicle = state
        .store()
        .get_vehicle(id)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to get vehicle: {e}")))?
        .ok_or_else(|| ApiError::not_found("Vehicle", id))?;

    if vehicle.owner_id != caller.id && !caller.is_superuser {
        return Err(ApiError::not_found("Vehicle", id));
    }

    state
        .store()
        .delete_vehicle(id)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to delete vehicle: {e}")))?;

    Ok(StatusCode::NO_CONTENT)
}
