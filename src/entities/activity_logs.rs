use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "activity_logs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// "entry" or "exit" as reported by the gate cameras.
    pub activity_type: String,

    pub license_plate: String,

    pub timestamp: String,

    pub user_id: i32,

    pub parking_lot_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Users,

    #[sea_orm(
        belongs_to = "super::parking_lots::Entity",
        from = "Column::ParkingLotId",
        to = "super::parking_lots::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    ParkingLots,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::parking_lots::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ParkingLots.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
