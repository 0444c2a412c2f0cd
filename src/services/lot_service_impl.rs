//! `SeaORM` implementation of the `ParkingLotService` trait.

use async_trait::async_trait;
use tracing::info;

use crate::db::{Store, is_unique_violation};
use crate::models::{NewParkingLot, ParkingLot, ParkingLotUpdate, User};
use crate::services::lot_service::{LotError, ParkingLotService};

pub struct SeaOrmParkingLotService {
    store: Store,
}

impl SeaOrmParkingLotService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    fn require_superuser(caller: &User) -> Result<(), LotError> {
        if caller.is_superuser {
            Ok(())
        } else {
            Err(LotError::Forbidden)
        }
    }

    /// If a soft-deleted lot holds `name`, rename it to the lowest unused
    /// `"{name} (N)"` so the name is free for the incoming active record.
    /// Candidates are probed against all records, active or not; each miss
    /// increments the suffix, so the probe terminates.
    async fn free_name_from_shadow(&self, name: &str) -> Result<(), LotError> {
        let Some(shadow) = self.store.find_inactive_lot_by_name(name).await? else {
            return Ok(());
        };

        let mut suffix = 1;
        let mut candidate = format!("{name} ({suffix})");
        while self.store.lot_name_exists(&candidate).await? {
            suffix += 1;
            candidate = format!("{name} ({suffix})");
        }

        match self.store.rename_lot(shadow.id, &candidate).await {
            Ok(()) => {
                info!(
                    "Renamed soft-deleted parking lot {} from '{}' to '{}'",
                    shadow.id, name, candidate
                );
                Ok(())
            }
            // A concurrent create grabbed the same suffix first; the insert
            // below will hit the constraint and report the conflict.
            Err(err) if is_unique_violation(&err) => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[async_trait]
impl ParkingLotService for SeaOrmParkingLotService {
    async fn list(&self) -> Result<Vec<ParkingLot>, LotError> {
        Ok(self.store.list_active_lots().await?)
    }

    async fn create(&self, caller: &User, input: NewParkingLot) -> Result<ParkingLot, LotError> {
        Self::require_superuser(caller)?;

        self.free_name_from_shadow(&input.name).await?;

        match self.store.insert_lot(&input).await {
            Ok(lot) => {
                info!("Created parking lot '{}' (id {})", lot.name, lot.id);
                Ok(lot)
            }
            Err(err) if is_unique_violation(&err) => Err(LotError::Duplicate),
            Err(err) => Err(err.into()),
        }
    }

    async fn get(&self, id: i32) -> Result<ParkingLot, LotError> {
        self.store
            .find_active_lot(id)
            .await?
            .ok_or(LotError::NotFound)
    }

    async fn update(
        &self,
        caller: &User,
        id: i32,
        update: ParkingLotUpdate,
    ) -> Result<ParkingLot, LotError> {
        Self::require_superuser(caller)?;

        match self.store.update_lot(id, &update).await {
            Ok(Some(lot)) => Ok(lot),
            Ok(None) => Err(LotError::NotFound),
            Err(err) if is_unique_violation(&err) => Err(LotError::Duplicate),
            Err(err) => Err(err.into()),
        }
    }

    async fn delete(&self, caller: &User, id: i32) -> Result<(), LotError> {
        Self::require_superuser(caller)?;

        if self.store.soft_delete_lot(id).await? {
            info!("Soft-deleted parking lot {}", id);
            Ok(())
        } else {
            Err(LotError::NotFound)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SecurityConfig;
    use crate::models::Lifecycle;

    async fn service() -> SeaOrmParkingLotService {
        let store = Store::with_pool_options("sqlite::memory:", 1, 1)
            .await
            .expect("failed to open in-memory store");
        SeaOrmParkingLotService::new(store)
    }

    async fn superuser(service: &SeaOrmParkingLotService) -> User {
        service
            .store
            .get_user_by_username("admin")
            .await
            .unwrap()
            .expect("bootstrap admin missing")
    }

    fn lot(name: &str) -> NewParkingLot {
        NewParkingLot {
            name: name.to_string(),
            longitude: 1.0,
            latitude: 2.0,
        }
    }

    #[tokio::test]
    async fn create_returns_an_active_lot_with_generated_id() {
        let service = service().await;
        let admin = superuser(&service).await;

        let created = service.create(&admin, lot("Downtown")).await.unwrap();

        assert_eq!(created.name, "Downtown");
        assert_eq!(created.lifecycle, Lifecycle::Active);
        assert!(created.id > 0);
        assert!(!created.created_at.is_empty());
    }

    #[tokio::test]
    async fn duplicate_active_name_is_a_conflict() {
        let service = service().await;
        let admin = superuser(&service).await;

        service.create(&admin, lot("Downtown")).await.unwrap();
        let second = service.create(&admin, lot("Downtown")).await;

        assert!(matches!(second, Err(LotError::Duplicate)));
        assert_eq!(service.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn soft_deleted_lot_is_invisible_and_delete_is_not_idempotent() {
        let service = service().await;
        let admin = superuser(&service).await;

        let created = service.create(&admin, lot("Downtown")).await.unwrap();
        service.delete(&admin, created.id).await.unwrap();

        assert!(matches!(
            service.get(created.id).await,
            Err(LotError::NotFound)
        ));
        assert!(matches!(
            service.delete(&admin, created.id).await,
            Err(LotError::NotFound)
        ));
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn recreating_over_a_deleted_namesake_renames_the_shadow() {
        let service = service().await;
        let admin = superuser(&service).await;

        let old = service.create(&admin, lot("Downtown")).await.unwrap();
        service.delete(&admin, old.id).await.unwrap();

        let new = service.create(&admin, lot("Downtown")).await.unwrap();

        assert_ne!(new.id, old.id);
        assert_eq!(new.name, "Downtown");
        assert!(matches!(service.get(old.id).await, Err(LotError::NotFound)));

        // The shadow keeps existing under the suffixed name.
        assert!(service.store.lot_name_exists("Downtown (1)").await.unwrap());
    }

    #[tokio::test]
    async fn rename_probe_skips_taken_suffixes() {
        let service = service().await;
        let admin = superuser(&service).await;

        let old = service.create(&admin, lot("X")).await.unwrap();
        service.create(&admin, lot("X (1)")).await.unwrap();
        service.create(&admin, lot("X (2)")).await.unwrap();
        service.delete(&admin, old.id).await.unwrap();

        let new = service.create(&admin, lot("X")).await.unwrap();

        assert_eq!(new.name, "X");
        assert!(service.store.lot_name_exists("X (3)").await.unwrap());
    }

    #[tokio::test]
    async fn non_superuser_mutations_are_forbidden_and_persist_nothing() {
        let service = service().await;
        let admin = superuser(&service).await;

        let driver = service
            .store
            .create_user("driver", "secret-pass", &SecurityConfig::default())
            .await
            .unwrap();

        let existing = service.create(&admin, lot("Downtown")).await.unwrap();

        assert!(matches!(
            service.create(&driver, lot("Uptown")).await,
            Err(LotError::Forbidden)
        ));
        assert!(matches!(
            service
                .update(
                    &driver,
                    existing.id,
                    ParkingLotUpdate {
                        name: "Renamed".to_string(),
                        longitude: 0.0,
                        latitude: 0.0,
                    },
                )
                .await,
            Err(LotError::Forbidden)
        ));
        assert!(matches!(
            service.delete(&driver, existing.id).await,
            Err(LotError::Forbidden)
        ));

        let lots = service.list().await.unwrap();
        assert_eq!(lots.len(), 1);
        assert_eq!(lots[0].name, "Downtown");
    }

    #[tokio::test]
    async fn update_overwrites_fields_and_stamps_updated_at() {
        let service = service().await;
        let admin = superuser(&service).await;

        let created = service.create(&admin, lot("Downtown")).await.unwrap();
        let updated = service
            .update(
                &admin,
                created.id,
                ParkingLotUpdate {
                    name: "Midtown".to_string(),
                    longitude: 3.0,
                    latitude: 4.0,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Midtown");
        assert!((updated.longitude - 3.0).abs() < f64::EPSILON);
        assert!(updated.updated_at.is_some());
    }

    #[tokio::test]
    async fn update_to_a_taken_name_is_a_conflict() {
        let service = service().await;
        let admin = superuser(&service).await;

        service.create(&admin, lot("Downtown")).await.unwrap();
        let other = service.create(&admin, lot("Uptown")).await.unwrap();

        let result = service
            .update(
                &admin,
                other.id,
                ParkingLotUpdate {
                    name: "Downtown".to_string(),
                    longitude: 0.0,
                    latitude: 0.0,
                },
            )
            .await;

        assert!(matches!(result, Err(LotError::Duplicate)));
    }
}
