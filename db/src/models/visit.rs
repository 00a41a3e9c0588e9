use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::Expr;
use sea_orm::{QueryFilter, QueryOrder, Set};
use serde::Serialize;

/// A student's stay in one active group.
///
/// At most one visit per student may be open (`exit_time` null); the
/// `uq_visits_open_per_student` partial index enforces this in the store.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "visits")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub active_group_id: i64,
    pub entry_time: DateTime<Utc>,
    pub exit_time: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::student::Entity",
        from = "Column::StudentId",
        to = "super::student::Column::Id",
        on_delete = "Cascade"
    )]
    Student,
    #[sea_orm(
        belongs_to = "super::active_group::Entity",
        from = "Column::ActiveGroupId",
        to = "super::active_group::Column::Id",
        on_delete = "Cascade"
    )]
    ActiveGroup,
}

impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::active_group::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ActiveGroup.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn is_active(&self) -> bool {
        self.exit_time.is_none()
    }

    pub async fn create<C: ConnectionTrait>(
        db: &C,
        student_id: i64,
        active_group_id: i64,
        now: DateTime<Utc>,
    ) -> Result<Model, DbErr> {
        ActiveModel {
            student_id: Set(student_id),
            active_group_id: Set(active_group_id),
            entry_time: Set(now),
            exit_time: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    /// The student's open visit, wherever it is.
    pub async fn current_for_student<C: ConnectionTrait>(
        db: &C,
        student_id: i64,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::ExitTime.is_null())
            .order_by_desc(Column::EntryTime)
            .one(db)
            .await
    }

    pub async fn active_for_group(db: &DbConn, active_group_id: i64) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::ActiveGroupId.eq(active_group_id))
            .filter(Column::ExitTime.is_null())
            .order_by_asc(Column::EntryTime)
            .all(db)
            .await
    }

    pub async fn list(
        db: &DbConn,
        active: Option<bool>,
        student_id: Option<i64>,
        active_group_id: Option<i64>,
    ) -> Result<Vec<Model>, DbErr> {
        let mut query = Entity::find();

        match active {
            Some(true) => query = query.filter(Column::ExitTime.is_null()),
            Some(false) => query = query.filter(Column::ExitTime.is_not_null()),
            None => {}
        }
        if let Some(student_id) = student_id {
            query = query.filter(Column::StudentId.eq(student_id));
        }
        if let Some(group_id) = active_group_id {
            query = query.filter(Column::ActiveGroupId.eq(group_id));
        }

        query.order_by_desc(Column::EntryTime).all(db).await
    }

    /// Sets `exit_time` on an open visit. Returns `false` if it was closed.
    pub async fn end<C: ConnectionTrait>(
        db: &C,
        id: i64,
        now: DateTime<Utc>,
    ) -> Result<bool, DbErr> {
        let res = Entity::update_many()
            .col_expr(Column::ExitTime, Expr::value(now))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::Id.eq(id))
            .filter(Column::ExitTime.is_null())
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
            .col_expr(Column::ExitTime, Expr::value(now))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::ActiveGroupId.eq(active_group_id))
            .filter(Column::ExitTime.is_null())
            .exec(db)
            .await?;
        Ok(res.rows_affected)
    }
}
