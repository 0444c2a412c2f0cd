use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, SqlErr, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::config::SecurityConfig;
use crate::models::{NewParkingLot, ParkingLot, ParkingLotUpdate, User, Vehicle};

pub mod migrator;
pub mod repositories;

pub use repositories::user::hash_password;

use crate::entities::parking_lots;

/// Returns true when a storage error is a uniqueness-constraint violation.
/// The create path treats these as `Duplicate` instead of fatal.
#[must_use]
pub fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if db_url.starts_with("sqlite:") && !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn parking_lot_repo(&self) -> repositories::parking_lot::ParkingLotRepository {
        repositories::parking_lot::ParkingLotRepository::new(self.conn.clone())
    }

    fn vehicle_repo(&self) -> repositories::vehicle::VehicleRepository {
        repositories::vehicle::VehicleRepository::new(self.conn.clone())
    }

    // ========================================================================
    // Users
    // ========================================================================

    pub async fn create_user(
        &self,
        username: &str,
        password: &str,
        security: &SecurityConfig,
    ) -> std::result::Result<User, DbErr> {
        self.user_repo().create(username, password, security).await
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.user_repo().get_by_username(username).await
    }

    pub async fn get_user_by_id(&self, id: i32) -> Result<Option<User>> {
        self.user_repo().get_by_id(id).await
    }

    pub async fn verify_user_password(&self, username: &str, password: &str) -> Result<bool> {
        self.user_repo().verify_password(username, password).await
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.user_repo().list_active().await
    }

    pub async fn update_user_flags(
        &self,
        id: i32,
        is_superuser: Option<bool>,
        is_active: Option<bool>,
    ) -> Result<Option<User>> {
        self.user_repo().update_flags(id, is_superuser, is_active).await
    }

    pub async fn soft_delete_user(&self, id: i32) -> Result<bool> {
        self.user_repo().soft_delete(id).await
    }

    // ========================================================================
    // Parking lots
    // ========================================================================

    pub async fn list_active_lots(&self) -> Result<Vec<ParkingLot>> {
        self.parking_lot_repo().list_active().await
    }

    pub async fn find_active_lot(&self, id: i32) -> Result<Option<ParkingLot>> {
        self.parking_lot_repo().find_active_by_id(id).await
    }

    pub async fn find_inactive_lot_by_name(
        &self,
        name: &str,
    ) -> Result<Option<parking_lots::Model>> {
        self.parking_lot_repo().find_inactive_by_name(name).await
    }

    pub async fn lot_name_exists(&self, name: &str) -> Result<bool> {
        self.parking_lot_repo().name_exists(name).await
    }

    pub async fn insert_lot(
        &self,
        input: &NewParkingLot,
    ) -> std::result::Result<ParkingLot, DbErr> {
        self.parking_lot_repo().insert_active(input).await
    }

    pub async fn rename_lot(&self, id: i32, new_name: &str) -> std::result::Result<(), DbErr> {
        self.parking_lot_repo().rename(id, new_name).await
    }

    pub async fn update_lot(
        &self,
        id: i32,
        update: &ParkingLotUpdate,
    ) -> std::result::Result<Option<ParkingLot>, DbErr> {
        self.parking_lot_repo().update_fields(id, update).await
    }

    pub async fn soft_delete_lot(&self, id: i32) -> Result<bool> {
        self.parking_lot_repo().soft_delete(id).await
    }

    // ========================================================================
    // Vehicles
    // ========================================================================

    pub async fn list_vehicles(&self) -> Result<Vec<Vehicle>> {
        self.vehicle_repo().list_all().await
    }

    pub async fn list_vehicles_by_owner(&self, owner_id: i32) -> Result<Vec<Vehicle>> {
        self.vehicle_repo().list_by_owner(owner_id).await
    }

    pub async fn get_vehicle(&self, id: i32) -> Result<Option<Vehicle>> {
        self.vehicle_repo().get_by_id(id).await
    }

    pub async fn insert_vehicle(
        &self,
        owner_id: i32,
        license_plate: &str,
        vehicle_type: &str,
        is_tracked: bool,
    ) -> std::result::Result<Vehicle, DbErr> {
        self.vehicle_repo()
            .insert(owner_id, license_plate, vehicle_type, is_tracked)
            .await
    }

    pub async fn delete_vehicle(&self, id: i32) -> Result<bool> {
        self.vehicle_repo().delete(id).await
    }
}
