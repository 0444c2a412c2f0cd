use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::entities::vehicles;
use crate::models::Vehicle;

pub struct VehicleRepository {
    conn: DatabaseConnection,
}

impl VehicleRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list_all(&self) -> Result<Vec<Vehicle>> {
        let rows = vehicles::Entity::find()
            .order_by_asc(vehicles::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list vehicles")?;

        Ok(rows.into_iter().map(Vehicle::from).collect())
    }

    pub async fn list_by_owner(&self, owner_id: i32) -> Result<Vec<Vehicle>> {
        let rows = vehicles::Entity::find()
            .filter(vehicles::Column::OwnerId.eq(owner_id))
            .order_by_asc(vehicles::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list vehicles by owner")?;

        Ok(rows.into_iter().map(Vehicle::from).collect())
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<Vehicle>> {
        let row = vehicles::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query vehicle by ID")?;

        Ok(row.map(Vehicle::from))
    }

    pub async fn insert(
        &self,
        owner_id: i32,
        license_plate: &str,
        vehicle_type: &str,
        is_tracked: bool,
    ) -> std::result::Result<Vehicle, DbErr> {
        let active = vehicles::ActiveModel {
            license_plate: Set(license_plate.to_string()),
            vehicle_type: Set(vehicle_type.to_string()),
            is_tracked: Set(is_tracked),
            owner_id: Set(owner_id),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };

        let model = active.insert(&self.conn).await?;
        Ok(Vehicle::from(model))
    }

    /// Hard delete; the vehicles table carries no lifecycle columns.
    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = vehicles::Entity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete vehicle")?;

        Ok(result.rows_affected > 0)
    }
}
