use serde::Serialize;

use crate::entities::vehicles;

#[derive(Debug, Clone, Serialize)]
pub struct Vehicle {
    pub id: i32,
    pub license_plate: String,
    pub vehicle_type: String,
    pub is_tracked: bool,
    pub owner_id: i32,
    pub created_at: String,
}

impl From<vehicles::Model> for Vehicle {
    fn from(model: vehicles::Model) -> Self {
        Self {
            id: model.id,
            license_plate: model.license_plate,
            vehicle_type: model.vehicle_type,
            is_tracked: model.is_tracked,
            owner_id: model.owner_id,
            created_at: model.created_at,
        }
    }
}
