use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "rating_feedbacks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub user_id: i32,

    pub parking_lot_id: i32,

    pub rating: i32,

    pub feedback: Option<String>,

    pub is_active: bool,

    pub created_at: String,

    pub updated_at: Option<String>,

    pub deleted_at: Option<String>,
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
