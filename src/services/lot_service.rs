//! Domain service for the parking lot lifecycle.
//!
//! Lots are soft-deleted, and a name freed by a soft delete may be reused:
//! creating over a soft-deleted namesake renames the old record out of the
//! way instead of rejecting the new one.

use thiserror::Error;

use crate::models::{NewParkingLot, ParkingLot, ParkingLotUpdate, User};

#[derive(Debug, Error)]
pub enum LotError {
    #[error("Parking lot not found")]
    NotFound,

    #[error("Parking lot already exists")]
    Duplicate,

    #[error("Superuser privileges required")]
    Forbidden,

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for LotError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for LotError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// Domain service trait for parking lots. Mutating operations are
/// restricted to superusers.
#[async_trait::async_trait]
pub trait ParkingLotService: Send + Sync {
    /// Active lots only; soft-deleted records are invisible here.
    async fn list(&self) -> Result<Vec<ParkingLot>, LotError>;

    /// Creates an active lot, renaming a soft-deleted namesake first if one
    /// blocks the name.
    ///
    /// # Errors
    ///
    /// Returns [`LotError::Duplicate`] when an active lot already holds the
    /// name, including under a create/create race.
    async fn create(&self, caller: &User, input: NewParkingLot) -> Result<ParkingLot, LotError>;

    /// Active lots only; a soft-deleted lot is indistinguishable from a
    /// missing one.
    async fn get(&self, id: i32) -> Result<ParkingLot, LotError>;

    async fn update(
        &self,
        caller: &User,
        id: i32,
        update: ParkingLotUpdate,
    ) -> Result<ParkingLot, LotError>;

    /// Soft delete. Deleting an already-deleted lot is `NotFound`.
    async fn delete(&self, caller: &User, id: i32) -> Result<(), LotError>;
}
