use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::{Expr, SimpleExpr};
use sea_orm::{DeriveActiveEnum, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// A checkout requested ahead of time and executed by the processor.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "scheduled_checkouts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    /// Staff member who scheduled it; the processor acts as this staff.
    pub scheduled_by: i64,
    pub scheduled_for: DateTime<Utc>,
    pub reason: Option<String>,
    pub status: ScheduledCheckoutStatus,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub cancelled_by: Option<i64>,
    pub executed_at: Option<DateTime<Utc>>,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "scheduled_checkout_status")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ScheduledCheckoutStatus {
    #[sea_orm(string_value = "pending")]
    Pending,

    /// Claimed by a processor run.
    #[sea_orm(string_value = "processing")]
    Processing,

    #[sea_orm(string_value = "executed")]
    Executed,

    #[sea_orm(string_value = "cancelled")]
    Cancelled,

    #[sea_orm(string_value = "failed")]
    Failed,
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
        belongs_to = "super::staff::Entity",
        from = "Column::ScheduledBy",
        to = "super::staff::Column::Id"
    )]
    ScheduledBy,
}

impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::staff::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ScheduledBy.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(
        db: &DbConn,
        student_id: i64,
        scheduled_by: i64,
        scheduled_for: DateTime<Utc>,
        reason: Option<String>,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();

        ActiveModel {
            student_id: Set(student_id),
            scheduled_by: Set(scheduled_by),
            scheduled_for: Set(scheduled_for),
            reason: Set(reason),
            status: Set(ScheduledCheckoutStatus::Pending),
            cancelled_at: Set(None),
            cancelled_by: Set(None),
            executed_at: Set(None),
            error_message: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    pub async fn pending_for_student<C: ConnectionTrait>(
        db: &C,
        student_id: i64,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::Status.eq(ScheduledCheckoutStatus::Pending))
            .order_by_asc(Column::ScheduledFor)
            .one(db)
            .await
    }

    pub async fn list(
        db: &DbConn,
        status: Option<ScheduledCheckoutStatus>,
    ) -> Result<Vec<Model>, DbErr> {
        let mut query = Entity::find();
        if let Some(status) = status {
            query = query.filter(Column::Status.eq(status));
        }
        query.order_by_asc(Column::ScheduledFor).all(db).await
    }

    /// Pending rows whose time has come, oldest first.
    pub async fn due(db: &DbConn, now: DateTime<Utc>) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::Status.eq(ScheduledCheckoutStatus::Pending))
            .filter(Column::ScheduledFor.lte(now))
            .order_by_asc(Column::ScheduledFor)
            .all(db)
            .await
    }

    /// Moves `from` to `to` only if the row is still in `from`.
    async fn transition<C: ConnectionTrait>(
        db: &C,
        id: i64,
        from: ScheduledCheckoutStatus,
        to: ScheduledCheckoutStatus,
        extra: Vec<(Column, SimpleExpr)>,
        now: DateTime<Utc>,
    ) -> Result<bool, DbErr> {
        let mut update = Entity::update_many()
            .col_expr(Column::Status, Expr::value(to))
            .col_expr(Column::UpdatedAt, Expr::value(now));
        for (col, expr) in extra {
            update = update.col_expr(col, expr);
        }
        let res = update
            .filter(Column::Id.eq(id))
            .filter(Column::Status.eq(from))
            .exec(db)
            .await?;
        Ok(res.rows_affected > 0)
    }

    /// Claims a pending row for execution. `false` means someone else got it.
    pub async fn claim<C: ConnectionTrait>(
        db: &C,
        id: i64,
        now: DateTime<Utc>,
    ) -> Result<bool, DbErr> {
        Self::transition(
            db,
            id,
            ScheduledCheckoutStatus::Pending,
            ScheduledCheckoutStatus::Processing,
            vec![],
            now,
        )
        .await
    }

    pub async fn mark_executed<C: ConnectionTrait>(
        db: &C,
        id: i64,
        now: DateTime<Utc>,
    ) -> Result<bool, DbErr> {
        Self::transition(
            db,
            id,
            ScheduledCheckoutStatus::Processing,
            ScheduledCheckoutStatus::Executed,
            vec![(Column::ExecutedAt, Expr::value(now))],
            now,
        )
        .await
    }

    pub async fn mark_failed<C: ConnectionTrait>(
        db: &C,
        id: i64,
        error: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, DbErr> {
        Self::transition(
            db,
            id,
            ScheduledCheckoutStatus::Processing,
            ScheduledCheckoutStatus::Failed,
            vec![(Column::ErrorMessage, Expr::value(error.to_owned()))],
            now,
        )
        .await
    }

    /// Cancels a pending row. Returns `false` if it was no longer pending.
    pub async fn cancel<C: ConnectionTrait>(
        db: &C,
        id: i64,
        cancelled_by: i64,
        now: DateTime<Utc>,
    ) -> Result<bool, DbErr> {
        Self::transition(
            db,
            id,
            ScheduledCheckoutStatus::Pending,
            ScheduledCheckoutStatus::Cancelled,
            vec![
                (Column::CancelledAt, Expr::value(now)),
                (Column::CancelledBy, Expr::value(cancelled_by)),
            ],
            now,
        )
        .await
    }
}
