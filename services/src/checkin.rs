use chrono::{DateTime, Utc};
use db::models::{active_group, attendance, student, visit};
use sea_orm::{ConnectionTrait, DatabaseConnection, EntityTrait, TransactionTrait};
use serde::Serialize;

use crate::attendance_state::{self, AttendanceSnapshot, AttendanceStatus};
use crate::authorization::{self, AuthorizationRequest, Capability};
use crate::error::{ServiceError, ServiceResult};
use crate::staff::resolve_staff;

#[derive(Debug, Clone, Serialize)]
pub struct CheckinOutcome {
    pub student_id: i64,
    pub visit_id: i64,
    pub active_group_id: i64,
    pub room_id: i64,
    pub attendance_id: i64,
    pub granted_by: Capability,
    /// Re-read after commit; `None` if that read failed.
    pub attendance: Option<AttendanceSnapshot>,
}

pub struct CheckinService;

impl CheckinService {
    /// Checks `student_id` into `active_group_id` on behalf of the staff
    /// member behind `account_id`.
    ///
    /// Precondition failures return before anything is written. The visit
    /// insert, the opening of today's attendance and the group's
    /// `last_activity` refresh commit together.
    pub async fn checkin(
        db: &DatabaseConnection,
        account_id: i64,
        student_id: i64,
        active_group_id: i64,
        now: DateTime<Utc>,
    ) -> ServiceResult<CheckinOutcome> {
        let staff = resolve_staff(db, account_id).await?;

        let student = student::Entity::find_by_id(student_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Student"))?;

        let group = active_group::Entity::find_by_id(active_group_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Active group"))?;

        if !group.is_active() {
            return Err(ServiceError::Conflict("Active group has already ended".into()));
        }

        let granted_by = authorization::authorize(
            db,
            &AuthorizationRequest {
                staff: &staff,
                student: &student,
                room_group: Some(&group),
            },
        )
        .await?;

        if let Some(current) = attendance_state::current_visit(db, student.id).await? {
            return Err(ServiceError::Conflict(format!(
                "Student already has an active visit in group {}",
                current.active_group_id
            )));
        }

        let today = attendance_state::status_today(db, student.id, now).await?;
        if today.status == AttendanceStatus::CheckedIn {
            return Err(ServiceError::Conflict("Student is already checked in".into()));
        }

        let txn = db.begin().await?;
        let (visit, record) = write_checkin(&txn, student.id, staff.staff_id, group.id, now).await?;
        txn.commit().await?;

        tracing::info!(
            student_id = student.id,
            visit_id = visit.id,
            active_group_id = group.id,
            staff_id = staff.staff_id,
            "student checked in"
        );

        Ok(CheckinOutcome {
            student_id: student.id,
            visit_id: visit.id,
            active_group_id: group.id,
            room_id: group.room_id,
            attendance_id: record.id,
            granted_by,
            attendance: attendance_state::snapshot_best_effort(db, student.id, now).await,
        })
    }
}

/// Inserts the visit, opens today's attendance and refreshes the group's
/// `last_activity`. A concurrent checkin that won the race surfaces here as
/// a unique violation and is reported as `Conflict`.
async fn write_checkin<C: ConnectionTrait>(
    db: &C,
    student_id: i64,
    staff_id: i64,
    active_group_id: i64,
    now: DateTime<Utc>,
) -> ServiceResult<(visit::Model, attendance::Model)> {
    let visit = visit::Model::create(db, student_id, active_group_id, now)
        .await
        .map_err(|e| ServiceError::conflict_on_unique(e, "Student already has an active visit"))?;

    let record = attendance::Model::check_in_or_reopen(db, student_id, staff_id, None, now)
        .await
        .map_err(|e| ServiceError::conflict_on_unique(e, "Student is already checked in"))?;

    active_group::Model::touch(db, active_group_id, now).await?;

    Ok((visit, record))
}
