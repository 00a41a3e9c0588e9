use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::{Condition, Expr};
use sea_orm::{PaginatorTrait, QueryFilter, QueryOrder, Set};
use serde::Serialize;

/// Assignment of a staff member to supervise an active group.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "group_supervisors")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub staff_id: i64,
    pub active_group_id: i64,
    pub role: String,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::staff::Entity",
        from = "Column::StaffId",
        to = "super::staff::Column::Id"
    )]
    Staff,
    #[sea_orm(
        belongs_to = "super::active_group::Entity",
        from = "Column::ActiveGroupId",
        to = "super::active_group::Column::Id",
        on_delete = "Cascade"
    )]
    ActiveGroup,
}

impl Related<super::staff::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Staff.def()
    }
}

impl Related<super::active_group::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ActiveGroup.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub const DEFAULT_ROLE: &str = "supervisor";

fn active_at(now: DateTime<Utc>) -> Condition {
    Condition::any()
        .add(Column::EndDate.is_null())
        .add(Column::EndDate.gt(now))
}

impl Model {
    /// Active while no end date is set or the end date lies in the future.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.end_date.is_none_or(|end| end > now)
    }

    pub async fn assign<C: ConnectionTrait>(
        db: &C,
        staff_id: i64,
        active_group_id: i64,
        role: &str,
        now: DateTime<Utc>,
    ) -> Result<Model, DbErr> {
        ActiveModel {
            staff_id: Set(staff_id),
            active_group_id: Set(active_group_id),
            role: Set(role.to_owned()),
            start_date: Set(now),
            end_date: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    /// Supervisors of a group whose assignment has no end date at all.
    pub async fn find_open_for_group<C: ConnectionTrait>(
        db: &C,
        active_group_id: i64,
    ) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::ActiveGroupId.eq(active_group_id))
            .filter(Column::EndDate.is_null())
            .all(db)
            .await
    }

    pub async fn active_for_group(
        db: &DbConn,
        active_group_id: i64,
        now: DateTime<Utc>,
    ) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::ActiveGroupId.eq(active_group_id))
            .filter(active_at(now))
            .order_by_asc(Column::StartDate)
            .all(db)
            .await
    }

    pub async fn active_for_staff(
        db: &DbConn,
        staff_id: i64,
        now: DateTime<Utc>,
    ) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::StaffId.eq(staff_id))
            .filter(active_at(now))
            .order_by_asc(Column::StartDate)
            .all(db)
            .await
    }

    pub async fn is_active_supervisor<C: ConnectionTrait>(
        db: &C,
        staff_id: i64,
        active_group_id: i64,
        now: DateTime<Utc>,
    ) -> Result<bool, DbErr> {
        let count = Entity::find()
            .filter(Column::StaffId.eq(staff_id))
            .filter(Column::ActiveGroupId.eq(active_group_id))
            .filter(active_at(now))
            .count(db)
            .await?;
        Ok(count > 0)
    }

    /// Closes one assignment. Returns `false` if it was already closed.
    pub async fn end<C: ConnectionTrait>(
        db: &C,
        id: i64,
        now: DateTime<Utc>,
    ) -> Result<bool, DbErr> {
        let res = Entity::update_many()
            .col_expr(Column::EndDate, Expr::value(now))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::Id.eq(id))
            .filter(active_at(now))
            .exec(db)
            .await?;
        Ok(res.rows_affected > 0)
    }

    pub async fn end_all_for_group<C: ConnectionTrait>(
        db: &C,
        active_group_id: i64,
        now: DateTime<Utc>,
    ) -> Result<u64, DbErr> {
        let res = Entity::update_many()
            .col_expr(Column::EndDate, Expr::value(now))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::ActiveGroupId.eq(active_group_id))
            .filter(Column::EndDate.is_null())
            .exec(db)
            .await?;
        Ok(res.rows_affected)
    }
}
