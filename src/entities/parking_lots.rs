use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "parking_lots")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Unique across all rows; the rename-on-conflict probe keeps the name
    /// free for the active lot.
    #[sea_orm(unique)]
    pub name: String,

    pub longitude: f64,

    pub latitude: f64,

    pub is_active: bool,

    pub created_at: String,

    pub updated_at: Option<String>,

    pub deleted_at: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::parking_spaces::Entity")]
    ParkingSpaces,

    #[sea_orm(has_many = "super::cameras::Entity")]
    Cameras,

    #[sea_orm(has_many = "super::rating_feedbacks::Entity")]
    RatingFeedbacks,

    #[sea_orm(has_many = "super::activity_logs::Entity")]
    ActivityLogs,
}

impl Related<super::parking_spaces::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ParkingSpaces.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
