use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::Serialize;

/// A student's permanent home group (e.g. "Sonnengruppe").
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "education_groups")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    /// Home room of the group.
    pub room_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::room::Entity",
        from = "Column::RoomId",
        to = "super::room::Column::Id",
        on_delete = "SetNull"
    )]
    Room,
    #[sea_orm(has_many = "super::group_teacher::Entity")]
    GroupTeachers,
    #[sea_orm(has_many = "super::student::Entity")]
    Students,
}

impl Related<super::room::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Room.def()
    }
}

impl Related<super::group_teacher::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GroupTeachers.def()
    }
}

impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Students.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(db: &DbConn, name: &str, room_id: Option<i64>) -> Result<Model, DbErr> {
        let now = Utc::now();

        ActiveModel {
            name: Set(name.to_owned()),
            room_id: Set(room_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
    }
}
