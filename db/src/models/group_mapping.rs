use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{QueryFilter, Set};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "group_mappings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub combined_group_id: i64,
    pub active_group_id: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::combined_group::Entity",
        from = "Column::CombinedGroupId",
        to = "super::combined_group::Column::Id",
        on_delete = "Cascade"
    )]
    CombinedGroup,
    #[sea_orm(
        belongs_to = "super::active_group::Entity",
        from = "Column::ActiveGroupId",
        to = "super::active_group::Column::Id",
        on_delete = "Cascade"
    )]
    ActiveGroup,
}

impl Related<super::combined_group::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CombinedGroup.def()
    }
}

impl Related<super::active_group::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ActiveGroup.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn add(
        db: &DbConn,
        combined_group_id: i64,
        active_group_id: i64,
    ) -> Result<Model, DbErr> {
        ActiveModel {
            combined_group_id: Set(combined_group_id),
            active_group_id: Set(active_group_id),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    pub async fn remove(
        db: &DbConn,
        combined_group_id: i64,
        active_group_id: i64,
    ) -> Result<bool, DbErr> {
        let res = Entity::delete_many()
            .filter(Column::CombinedGroupId.eq(combined_group_id))
            .filter(Column::ActiveGroupId.eq(active_group_id))
            .exec(db)
            .await?;
        Ok(res.rows_affected > 0)
    }

    pub async fn active_group_ids(db: &DbConn, combined_group_id: i64) -> Result<Vec<i64>, DbErr> {
        let rows = Entity::find()
            .filter(Column::CombinedGroupId.eq(combined_group_id))
            .all(db)
            .await?;
        Ok(rows.into_iter().map(|m| m.active_group_id).collect())
    }
}
