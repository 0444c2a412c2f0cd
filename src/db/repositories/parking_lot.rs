use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::entities::parking_lots;
use crate::models::{NewParkingLot, ParkingLot, ParkingLotUpdate};

/// Repository for parking lot lifecycle operations. Insert, rename, and
/// update return raw `DbErr` so the service layer can tell uniqueness
/// violations apart from other storage failures.
pub struct ParkingLotRepository {
    conn: DatabaseConnection,
}

impl ParkingLotRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list_active(&self) -> Result<Vec<ParkingLot>> {
        let rows = parking_lots::Entity::find()
            .filter(parking_lots::Column::IsActive.eq(true))
            .order_by_asc(parking_lots::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list parking lots")?;

        Ok(rows.into_iter().map(ParkingLot::from).collect())
    }

    pub async fn find_active_by_id(&self, id: i32) -> Result<Option<ParkingLot>> {
        let row = parking_lots::Entity::find_by_id(id)
            .filter(parking_lots::Column::IsActive.eq(true))
            .one(&self.conn)
            .await
            .context("Failed to query parking lot by ID")?;

        Ok(row.map(ParkingLot::from))
    }

    /// The soft-deleted record blocking a candidate name, if any.
    pub async fn find_inactive_by_name(&self, name: &str) -> Result<Option<parking_lots::Model>> {
        parking_lots::Entity::find()
            .filter(parking_lots::Column::Name.eq(name))
            .filter(parking_lots::Column::IsActive.eq(false))
            .one(&self.conn)
            .await
            .context("Failed to query parking lot by name")
    }

    /// Whether any record, active or not, holds the given name. The rename
    /// probe checks candidates against the whole table.
    pub async fn name_exists(&self, name: &str) -> Result<bool> {
        let row = parking_lots::Entity::find()
            .filter(parking_lots::Column::Name.eq(name))
            .one(&self.conn)
            .await
            .context("Failed to probe parking lot name")?;

        Ok(row.is_some())
    }

    pub async fn insert_active(
        &self,
        input: &NewParkingLot,
    ) -> std::result::Result<ParkingLot, DbErr> {
        let now = chrono::Utc::now().to_rfc3339();

        let active = parking_lots::ActiveModel {
            name: Set(input.name.clone()),
            longitude: Set(input.longitude),
            latitude: Set(input.latitude),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(None),
            deleted_at: Set(None),
            ..Default::default()
        };

        // insert() re-reads the row, giving back the generated id.
        let model = active.insert(&self.conn).await?;
        Ok(ParkingLot::from(model))
    }

    pub async fn rename(&self, id: i32, new_name: &str) -> std::result::Result<(), DbErr> {
        let Some(row) = parking_lots::Entity::find_by_id(id).one(&self.conn).await? else {
            return Ok(());
        };

        let mut active: parking_lots::ActiveModel = row.into();
        active.name = Set(new_name.to_string());
        active.updated_at = Set(Some(chrono::Utc::now().to_rfc3339()));
        active.update(&self.conn).await?;

        Ok(())
    }

    /// Overwrites the mutable fields of an active lot. `None` when the
    /// target is absent or soft-deleted.
    pub async fn update_fields(
        &self,
        id: i32,
        update: &ParkingLotUpdate,
    ) -> std::result::Result<Option<ParkingLot>, DbErr> {
        let row = parking_lots::Entity::find_by_id(id)
            .filter(parking_lots::Column::IsActive.eq(true))
            .one(&self.conn)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut active: parking_lots::ActiveModel = row.into();
        active.name = Set(update.name.clone());
        active.longitude = Set(update.longitude);
        active.latitude = Set(update.latitude);
        active.updated_at = Set(Some(chrono::Utc::now().to_rfc3339()));

        let model = active.update(&self.conn).await?;
        Ok(Some(ParkingLot::from(model)))
    }

    /// Soft delete. Returns false when the target is absent or already
    /// inactive; delete is not idempotent at the API level.
    pub async fn soft_delete(&self, id: i32) -> Result<bool> {
        let row = parking_lots::Entity::find_by_id(id)
            .filter(parking_lots::Column::IsActive.eq(true))
            .one(&self.conn)
            .await
            .context("Failed to query parking lot for deletion")?;

        let Some(row) = row else {
            return Ok(false);
        };

        let now = chrono::Utc::now().to_rfc3339();
        let mut active: parking_lots::ActiveModel = row.into();
        active.is_active = Set(false);
        active.deleted_at = Set(Some(now));
        active
            .update(&self.conn)
            .await
            .context("Failed to soft-delete parking lot")?;

        Ok(true)
    }
}
