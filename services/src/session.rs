use chrono::{DateTime, Utc};
use db::models::{active_group, activity, group_supervisor, room, visit};
use sea_orm::{DatabaseConnection, EntityTrait, TransactionTrait};
use serde::Serialize;

use crate::error::{ServiceError, ServiceResult};
use crate::staff::resolve_staff;

#[derive(Debug, Clone, Serialize)]
pub struct EndedSession {
    pub active_group: active_group::Model,
    pub visits_closed: u64,
    pub supervisors_closed: u64,
}

pub struct SessionService;

impl SessionService {
    /// Starts a session of `activity_id` in `room_id` and makes the acting
    /// staff member its first supervisor.
    pub async fn start_session(
        db: &DatabaseConnection,
        account_id: i64,
        activity_id: i64,
        room_id: i64,
        timeout_minutes: Option<i32>,
        now: DateTime<Utc>,
    ) -> ServiceResult<active_group::Model> {
        let staff = resolve_staff(db, account_id).await?;

        activity::Entity::find_by_id(activity_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Activity"))?;
        room::Entity::find_by_id(room_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Room"))?;

        if active_group::Model::find_live_in_room(db, room_id).await?.is_some() {
            return Err(ServiceError::Conflict("Room already hosts an active session".into()));
        }

        let timeout = match timeout_minutes {
            Some(t) if t <= 0 => {
                return Err(ServiceError::Validation("timeout_minutes must be positive".into()));
            }
            Some(t) => t,
            None => util::config::session_timeout_minutes(),
        };

        let txn = db.begin().await?;
        let group = active_group::Model::start(&txn, activity_id, room_id, timeout, now).await?;
        group_supervisor::Model::assign(&txn, staff.staff_id, group.id, group_supervisor::DEFAULT_ROLE, now)
            .await?;
        txn.commit().await?;

        tracing::info!(
            active_group_id = group.id,
            room_id,
            activity_id,
            staff_id = staff.staff_id,
            "session started"
        );
        Ok(group)
    }

    /// Ends a live session and closes its open visits and supervisions.
    pub async fn end_session(
        db: &DatabaseConnection,
        active_group_id: i64,
        now: DateTime<Utc>,
    ) -> ServiceResult<EndedSession> {
        let group = active_group::Entity::find_by_id(active_group_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Active group"))?;

        if !group.is_active() {
            return Err(ServiceError::Conflict("Active group has already ended".into()));
        }

        let txn = db.begin().await?;
        if !active_group::Model::mark_ended(&txn, group.id, now).await? {
            return Err(ServiceError::Conflict("Active group has already ended".into()));
        }
        let visits_closed = visit::Model::end_all_for_group(&txn, group.id, now).await?;
        let supervisors_closed = group_supervisor::Model::end_all_for_group(&txn, group.id, now).await?;
        txn.commit().await?;

        let active_group = active_group::Entity::find_by_id(group.id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Active group"))?;

        tracing::info!(
            active_group_id = group.id,
            visits_closed,
            supervisors_closed,
            "session ended"
        );
        Ok(EndedSession {
            active_group,
            visits_closed,
            supervisors_closed,
        })
    }

    /// Ends every live session that has been idle past its timeout.
    ///
    /// A session ended concurrently by someone else is skipped; other errors
    /// are logged and the sweep continues.
    pub async fn process_session_timeouts(
        db: &DatabaseConnection,
        now: DateTime<Utc>,
    ) -> ServiceResult<Vec<EndedSession>> {
        let expired: Vec<_> = active_group::Model::find_live(db)
            .await?
            .into_iter()
            .filter(|g| g.is_timed_out(now))
            .collect();

        let mut ended = Vec::with_capacity(expired.len());
        for group in expired {
            match Self::end_session(db, group.id, now).await {
                Ok(e) => ended.push(e),
                Err(ServiceError::Conflict(_)) => {}
                Err(e) => {
                    tracing::error!(active_group_id = group.id, error = %e, "failed to end idle session")
                }
            }
        }

        if !ended.is_empty() {
            tracing::info!(count = ended.len(), "idle sessions ended");
        }
        Ok(ended)
    }
}
