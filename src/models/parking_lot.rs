use serde::{Deserialize, Serialize};

use crate::entities::parking_lots;

/// Tagged soft-delete state. A record is either active or deleted with a
/// deletion timestamp; the two storage columns (`is_active`, `deleted_at`)
/// are derived from this and can never disagree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum Lifecycle {
    Active,
    Deleted { at: String },
}

impl Lifecycle {
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    #[must_use]
    pub fn deleted_at(&self) -> Option<&str> {
        match self {
            Self::Active => None,
            Self::Deleted { at } => Some(at),
        }
    }

    /// Reconstructs the state from the storage columns. A deactivated row
    /// without a deletion timestamp falls back to an empty one rather than
    /// resurrecting the record.
    #[must_use]
    pub fn from_columns(is_active: bool, deleted_at: Option<String>) -> Self {
        if is_active {
            Self::Active
        } else {
            Self::Deleted {
                at: deleted_at.unwrap_or_default(),
            }
        }
    }
}

/// Domain view of a parking lot.
#[derive(Debug, Clone, Serialize)]
pub struct ParkingLot {
    pub id: i32,
    pub name: String,
    pub longitude: f64,
    pub latitude: f64,
    pub created_at: String,
    pub updated_at: Option<String>,
    pub lifecycle: Lifecycle,
}

impl From<parking_lots::Model> for ParkingLot {
    fn from(model: parking_lots::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            longitude: model.longitude,
            latitude: model.latitude,
            created_at: model.created_at,
            updated_at: model.updated_at,
            lifecycle: Lifecycle::from_columns(model.is_active, model.deleted_at),
        }
    }
}

/// Payload for creating a lot.
#[derive(Debug, Clone, Deserialize)]
pub struct NewParkingLot {
    pub name: String,
    pub longitude: f64,
    pub latitude: f64,
}

/// Payload for updating a lot's mutable fields.
#[derive(Debug, Clone, Deserialize)]
pub struct ParkingLotUpdate {
    pub name: String,
    pub longitude: f64,
    pub latitude: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle_from_columns_couples_flag_and_timestamp() {
        assert_eq!(
            Lifecycle::from_columns(true, None),
            Lifecycle::Active
        );
        assert_eq!(
            Lifecycle::from_columns(false, Some("2026-01-01T00:00:00+00:00".to_string())),
            Lifecycle::Deleted {
                at: "2026-01-01T00:00:00+00:00".to_string()
            }
        );
        // An active row never reports a deletion timestamp, even if the
        // column carries a stale value.
        assert!(
            Lifecycle::from_columns(true, Some("stale".to_string()))
                .deleted_at()
                .is_none()
        );
    }
}
