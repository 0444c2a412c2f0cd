use serde::{Deserialize, Serialize};

use crate::models::{ParkingLot, User, Vehicle};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenPairResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
}

impl TokenPairResponse {
    #[must_use]
    pub fn bearer(pair: crate::services::TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            token_type: "bearer".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct LogoutRequest {
    pub refresh_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

/// Administrative flag changes; omitted fields are left untouched.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct UserFlagsRequest {
    pub is_superuser: Option<bool>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct UserDto {
    pub id: i32,
    pub username: String,
    pub is_superuser: bool,
    pub is_active: bool,
    pub created_at: String,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            is_superuser: user.is_superuser,
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

/// Wire shape keeps the `is_active` boolean for compatibility; internally
/// the lifecycle is a tagged state.
#[derive(Debug, Serialize)]
pub struct ParkingLotDto {
    pub id: i32,
    pub name: String,
    pub longitude: f64,
    pub latitude: f64,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: Option<String>,
}

impl From<ParkingLot> for ParkingLotDto {
    fn from(lot: ParkingLot) -> Self {
        Self {
            id: lot.id,
            name: lot.name,
            longitude: lot.longitude,
            latitude: lot.latitude,
            is_active: lot.lifecycle.is_active(),
            created_at: lot.created_at,
            updated_at: lot.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateVehicleRequest {
    pub license_plate: String,
    pub vehicle_type: String,
    #[serde(default)]
    pub is_tracked: bool,
}

#[derive(Debug, Serialize)]
pub struct VehicleDto {
    pub id: i32,
    pub license_plate: String,
    pub vehicle_type: String,
    pub is_tracked: bool,
    pub owner_id: i32,
    pub created_at: String,
}

impl From<Vehicle> for VehicleDto {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: vehicle.id,
            license_plate: vehicle.license_plate,
            vehicle_type: vehicle.vehicle_type,
            is_tracked: vehicle.is_tracked,
            owner_id: vehicle.owner_id,
            created_at: vehicle.created_at,
        }
    }
}
