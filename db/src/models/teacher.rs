use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{QueryFilter, Set};
use serde::Serialize;

/// A staff member who teaches one or more education groups.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "teachers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub staff_id: i64,
    pub specialization: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::staff::Entity",
        from = "Column::StaffId",
        to = "super::staff::Column::Id",
        on_delete = "Cascade"
    )]
    Staff,
    #[sea_orm(has_many = "super::group_teacher::Entity")]
    GroupTeachers,
}

impl Related<super::staff::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Staff.def()
    }
}

impl Related<super::group_teacher::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GroupTeachers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(
        db: &DbConn,
        staff_id: i64,
        specialization: Option<&str>,
    ) -> Result<Model, DbErr> {
        ActiveModel {
            staff_id: Set(staff_id),
            specialization: Set(specialization.map(str::to_owned)),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    pub async fn find_by_staff<C: ConnectionTrait>(
        db: &C,
        staff_id: i64,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::StaffId.eq(staff_id))
            .one(db)
            .await
    }
}
