use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "cameras")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    #[sea_orm(unique)]
    pub api_key: String,

    pub parking_lot_id: i32,

    pub is_active: bool,

    pub created_at: String,

    pub updated_at: Option<String>,

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
}

impl Related<super::parking_lots::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ParkingLots.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
