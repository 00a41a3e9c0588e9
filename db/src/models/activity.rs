use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::Serialize;

/// Definition of an activity that can be run as a session in a room.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "activities")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub category: Option<String>,
    pub max_participants: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::active_group::Entity")]
    ActiveGroups,
}

impl Related<super::active_group::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ActiveGroups.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(
        db: &DbConn,
        name: &str,
        category: Option<&str>,
        max_participants: Option<i32>,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();

        ActiveModel {
            name: Set(name.to_owned()),
            category: Set(category.map(str::to_owned)),
            max_participants: Set(max_participants),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
    }
}
