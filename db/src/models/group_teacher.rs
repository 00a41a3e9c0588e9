use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{PaginatorTrait, QueryFilter, Set};
use serde::Serialize;

/// Join row: a teacher assigned to an education group.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "group_teachers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub group_id: i64,
    pub teacher_id: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::education_group::Entity",
        from = "Column::GroupId",
        to = "super::education_group::Column::Id",
        on_delete = "Cascade"
    )]
    Group,
    #[sea_orm(
        belongs_to = "super::teacher::Entity",
        from = "Column::TeacherId",
        to = "super::teacher::Column::Id",
        on_delete = "Cascade"
    )]
    Teacher,
}

impl Related<super::education_group::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Group.def()
    }
}

impl Related<super::teacher::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teacher.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn assign(db: &DbConn, group_id: i64, teacher_id: i64) -> Result<Model, DbErr> {
        ActiveModel {
            group_id: Set(group_id),
            teacher_id: Set(teacher_id),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    pub async fn teaches_group<C: ConnectionTrait>(
        db: &C,
        teacher_id: i64,
        group_id: i64,
    ) -> Result<bool, DbErr> {
        let count = Entity::find()
            .filter(Column::TeacherId.eq(teacher_id))
            .filter(Column::GroupId.eq(group_id))
            .count(db)
            .await?;
        Ok(count > 0)
    }
}
