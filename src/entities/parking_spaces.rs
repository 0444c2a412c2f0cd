use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "parking_spaces")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub longitude: f64,

    pub latitude: f64,

    pub vehicle_type: String,

    pub vehicle_id: Option<i32>,

    pub parking_lot_id: i32,

    pub is_active: bool,

    pub created_at: String,

    pub updated_at: Option<String>,

    /// Last time a sensor or camera referred to this space.
    pub referred_at: Option<String>,

    pub deleted_at: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::parking_lots::Entity",
        from = "Column::ParkingLotId",
        to = "super::parking_lots::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    ParkingLots,

    #[sea_orm(
        belongs_to = "super::vehicles::Entity",
        from = "Column::VehicleId",
        to = "super::vehicles::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Vehicles,

    #[sea_orm(has_one = "super::sensors::Entity")]
    Sensors,
}

impl Related<super::parking_lots::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ParkingLots.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
