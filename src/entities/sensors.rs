use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "sensors")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Random key presented by the device on ingest calls.
    #[sea_orm(unique)]
    pub api_key: String,

    pub parking_space_id: i32,

    pub is_active: bool,

    pub created_at: String,

    pub updated_at: Option<String>,

    pub deleted_at: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::parking_spaces::Entity",
        from = "Column::ParkingSpaceId",
        to = "super::parking_spaces::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    ParkingSpaces,
}

impl Related<super::parking_spaces::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ParkingSpaces.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
