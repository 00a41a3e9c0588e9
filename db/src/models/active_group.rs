use chrono::{DateTime, Duration, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::Expr;
use sea_orm::{QueryFilter, QueryOrder, Set};
use serde::Serialize;

/// A live (or finished) run of an activity in a room.
///
/// A group is active while `end_time` is null. Once ended it is never
/// reopened.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "active_groups")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub activity_id: i64,
    pub room_id: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    /// Refreshed by checkins; drives the idle timeout.
    pub last_activity: DateTime<Utc>,
    pub timeout_minutes: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::activity::Entity",
        from = "Column::ActivityId",
        to = "super::activity::Column::Id"
    )]
    Activity,
    #[sea_orm(
        belongs_to = "super::room::Entity",
        from = "Column::RoomId",
        to = "super::room::Column::Id"
    )]
    Room,
    #[sea_orm(has_many = "super::visit::Entity")]
    Visits,
    #[sea_orm(has_many = "super::group_supervisor::Entity")]
    Supervisors,
}

impl Related<super::activity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Activity.def()
    }
}

impl Related<super::room::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Room.def()
    }
}

impl Related<super::visit::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Visits.def()
    }
}

impl Related<super::group_supervisor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Supervisors.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn is_active(&self) -> bool {
        self.end_time.is_none()
    }

    /// True when the group is live and has been idle for its full timeout.
    pub fn is_timed_out(&self, now: DateTime<Utc>) -> bool {
        self.is_active()
            && now - self.last_activity >= Duration::minutes(i64::from(self.timeout_minutes))
    }

    pub async fn start<C: ConnectionTrait>(
        db: &C,
        activity_id: i64,
        room_id: i64,
        timeout_minutes: i32,
        now: DateTime<Utc>,
    ) -> Result<Model, DbErr> {
        ActiveModel {
            activity_id: Set(activity_id),
            room_id: Set(room_id),
            start_time: Set(now),
            end_time: Set(None),
            last_activity: Set(now),
            timeout_minutes: Set(timeout_minutes),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    pub async fn find_live_in_room<C: ConnectionTrait>(
        db: &C,
        room_id: i64,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::RoomId.eq(room_id))
            .filter(Column::EndTime.is_null())
            .one(db)
            .await
    }

    pub async fn find_live(db: &DbConn) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::EndTime.is_null())
            .order_by_asc(Column::Id)
            .all(db)
            .await
    }

    pub async fn list(
        db: &DbConn,
        active: Option<bool>,
        room_id: Option<i64>,
    ) -> Result<Vec<Model>, DbErr> {
        let mut query = Entity::find();

        match active {
            Some(true) => query = query.filter(Column::EndTime.is_null()),
            Some(false) => query = query.filter(Column::EndTime.is_not_null()),
            None => {}
        }
        if let Some(room_id) = room_id {
            query = query.filter(Column::RoomId.eq(room_id));
        }

        query.order_by_desc(Column::StartTime).all(db).await
    }

    /// Refreshes `last_activity` of a live group.
    pub async fn touch<C: ConnectionTrait>(
        db: &C,
        id: i64,
        now: DateTime<Utc>,
    ) -> Result<(), DbErr> {
        Entity::update_many()
            .col_expr(Column::LastActivity, Expr::value(now))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::Id.eq(id))
            .filter(Column::EndTime.is_null())
            .exec(db)
            .await?;
        Ok(())
    }

    /// Sets `end_time` if the group is still live.
    ///
    /// Returns `false` when the group was already ended (or does not exist).
    pub async fn mark_ended<C: ConnectionTrait>(
        db: &C,
        id: i64,
        now: DateTime<Utc>,
    ) -> Result<bool, DbErr> {
        let res = Entity::update_many()
            .col_expr(Column::EndTime, Expr::value(now))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::Id.eq(id))
            .filter(Column::EndTime.is_null())
            .exec(db)
            .await?;
        Ok(res.rows_affected > 0)
    }
}
