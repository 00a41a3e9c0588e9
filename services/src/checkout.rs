use chrono::{DateTime, Utc};
use db::models::{active_group, attendance, scheduled_checkout, student, visit};
use sea_orm::{DatabaseConnection, EntityTrait};
use serde::Serialize;

use crate::attendance_state::{self, AttendanceSnapshot};
use crate::authorization::{self, AuthorizationRequest};
use crate::error::{ServiceError, ServiceResult};
use crate::staff::resolve_staff;

#[derive(Debug, Clone, Serialize)]
pub struct CheckoutOutcome {
    pub student_id: i64,
    pub attendance_id: i64,
    /// The visit that was open at checkout time, if any.
    pub visit_id: Option<i64>,
    pub active_group_id: Option<i64>,
    /// False when closing the open visit failed; the daily checkout still
    /// went through.
    pub visit_ended: bool,
    pub cancelled_scheduled_checkout_id: Option<i64>,
    pub attendance: Option<AttendanceSnapshot>,
}

pub struct CheckoutService;

impl CheckoutService {
    /// Checks a student out on behalf of the staff member behind `account_id`.
    ///
    /// Authorization looks at the group of the student's current visit; a
    /// student without a visit can still be checked out by a home-group
    /// teacher.
    pub async fn checkout(
        db: &DatabaseConnection,
        account_id: i64,
        student_id: i64,
        now: DateTime<Utc>,
    ) -> ServiceResult<CheckoutOutcome> {
        let staff = resolve_staff(db, account_id).await?;

        let student = student::Entity::find_by_id(student_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Student"))?;

        let current = attendance_state::current_visit(db, student.id).await?;
        let room_group = match &current {
            Some(v) => active_group::Entity::find_by_id(v.active_group_id).one(db).await?,
            None => None,
        };

        authorization::authorize(
            db,
            &AuthorizationRequest {
                staff: &staff,
                student: &student,
                room_group: room_group.as_ref(),
            },
        )
        .await?;

        Self::perform(db, staff.staff_id, student.id, current, now).await
    }

    /// The transition itself, without any authorization.
    ///
    /// Ending the open visit and cancelling a pending scheduled checkout are
    /// best-effort: failures are logged and do not fail the checkout. Only
    /// the attendance update decides the result.
    pub async fn perform(
        db: &DatabaseConnection,
        staff_id: i64,
        student_id: i64,
        current: Option<visit::Model>,
        now: DateTime<Utc>,
    ) -> ServiceResult<CheckoutOutcome> {
        let record = attendance::Model::for_day(db, student_id, now.date_naive())
            .await?
            .filter(|r| !r.is_checked_out())
            .ok_or_else(|| ServiceError::NotFound("Student is not currently checked in".into()))?;

        let mut visit_ended = false;
        if let Some(v) = &current {
            match visit::Model::end(db, v.id, now).await {
                Ok(ended) => visit_ended = ended,
                Err(e) => tracing::warn!(
                    student_id,
                    visit_id = v.id,
                    error = %e,
                    "failed to end visit during checkout; continuing with attendance"
                ),
            }
        }

        if !attendance::Model::check_out(db, record.id, staff_id, now).await? {
            return Err(ServiceError::NotFound("Student is not currently checked in".into()));
        }

        let cancelled_scheduled_checkout_id = cancel_pending(db, student_id, staff_id, now).await;

        tracing::info!(
            student_id,
            attendance_id = record.id,
            visit_id = ?current.as_ref().map(|v| v.id),
            staff_id,
            "student checked out"
        );

        Ok(CheckoutOutcome {
            student_id,
            attendance_id: record.id,
            visit_id: current.as_ref().map(|v| v.id),
            active_group_id: current.as_ref().map(|v| v.active_group_id),
            visit_ended,
            cancelled_scheduled_checkout_id,
            attendance: attendance_state::snapshot_best_effort(db, student_id, now).await,
        })
    }
}

async fn cancel_pending(
    db: &DatabaseConnection,
    student_id: i64,
    staff_id: i64,
    now: DateTime<Utc>,
) -> Option<i64> {
    let pending = match scheduled_checkout::Model::pending_for_student(db, student_id).await {
        Ok(Some(p)) => p,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!(student_id, error = %e, "could not look up pending scheduled checkout");
            return None;
        }
    };

    match scheduled_checkout::Model::cancel(db, pending.id, staff_id, now).await {
        Ok(true) => Some(pending.id),
        Ok(false) => None,
        Err(e) => {
            tracing::warn!(
                student_id,
                scheduled_checkout_id = pending.id,
                error = %e,
                "failed to cancel scheduled checkout after manual checkout"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attendance_state::AttendanceStatus;
    use crate::checkin::CheckinService;
    use chrono::Duration;
    use db::models::{group_supervisor, scheduled_checkout::ScheduledCheckoutStatus};
    use db::test_utils::{
        seed_education_group, seed_live_group, seed_staff_with_account, seed_student,
        seed_teacher_of, setup_test_db,
    };

    #[tokio::test]
    async fn supervisor_checkout_closes_everything() {
        let db = setup_test_db().await;
        let group = seed_live_group(&db, "Raum 1").await;
        let (acc, staff) = seed_staff_with_account(&db, "s@ogs.test", false).await;
        group_supervisor::Model::assign(&db, staff.id, group.id, "supervisor", Utc::now())
            .await
            .unwrap();
        let student = seed_student(&db, "Sara", None).await;
        let now = Utc::now();

        let checked_in = CheckinService::checkin(&db, acc.id, student.id, group.id, now)
            .await
            .unwrap();
        let pending = scheduled_checkout::Model::create(
            &db,
            student.id,
            staff.id,
            now + Duration::hours(1),
            None,
        )
        .await
        .unwrap();

        let out = CheckoutService::checkout(&db, acc.id, student.id, now).await.unwrap();

        assert_eq!(out.visit_id, Some(checked_in.visit_id));
        assert!(out.visit_ended);
        assert_eq!(out.cancelled_scheduled_checkout_id, Some(pending.id));
        assert_eq!(out.attendance.unwrap().status, AttendanceStatus::CheckedOut);

        let v = visit::Entity::find_by_id(checked_in.visit_id).one(&db).await.unwrap().unwrap();
        assert!(v.exit_time.is_some());
        let p = scheduled_checkout::Entity::find_by_id(pending.id).one(&db).await.unwrap().unwrap();
        assert_eq!(p.status, ScheduledCheckoutStatus::Cancelled);
        assert_eq!(p.cancelled_by, Some(staff.id));
    }

    #[tokio::test]
    async fn checkout_without_visit_still_succeeds() {
        let db = setup_test_db().await;
        let home = seed_education_group(&db, "Igel").await;
        let (acc, staff) = seed_teacher_of(&db, "t@ogs.test", home.id).await;
        let student = seed_student(&db, "Luca", Some(home.id)).await;
        let now = Utc::now();
        attendance::Model::check_in_or_reopen(&db, student.id, staff.id, None, now)
            .await
            .unwrap();

        let out = CheckoutService::checkout(&db, acc.id, student.id, now).await.unwrap();
        assert_eq!(out.visit_id, None);
        assert!(!out.visit_ended);
        assert_eq!(out.attendance.unwrap().status, AttendanceStatus::CheckedOut);
    }

    #[tokio::test]
    async fn not_checked_in_is_not_found() {
        let db = setup_test_db().await;
        let home = seed_education_group(&db, "Raben").await;
        let (acc, _) = seed_teacher_of(&db, "t@ogs.test", home.id).await;
        let student = seed_student(&db, "Nora", Some(home.id)).await;

        let err = CheckoutService::checkout(&db, acc.id, student.id, Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn second_checkout_is_not_found() {
        let db = setup_test_db().await;
        let home = seed_education_group(&db, "Otter").await;
        let (acc, staff) = seed_teacher_of(&db, "t@ogs.test", home.id).await;
        let student = seed_student(&db, "Jan", Some(home.id)).await;
        let now = Utc::now();
        attendance::Model::check_in_or_reopen(&db, student.id, staff.id, None, now)
            .await
            .unwrap();

        CheckoutService::checkout(&db, acc.id, student.id, now).await.unwrap();
        let err = CheckoutService::checkout(&db, acc.id, student.id, now)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn supervisor_of_other_room_is_forbidden() {
        let db = setup_test_db().await;
        let room_a = seed_live_group(&db, "Raum A").await;
        let room_b = seed_live_group(&db, "Raum B").await;
        let (acc_a, staff_a) = seed_staff_with_account(&db, "a@ogs.test", false).await;
        let (acc_b, staff_b) = seed_staff_with_account(&db, "b@ogs.test", false).await;
        let now = Utc::now();
        group_supervisor::Model::assign(&db, staff_a.id, room_a.id, "supervisor", now)
            .await
            .unwrap();
        group_supervisor::Model::assign(&db, staff_b.id, room_b.id, "supervisor", now)
            .await
            .unwrap();
        let student = seed_student(&db, "Kai", None).await;
        CheckinService::checkin(&db, acc_b.id, student.id, room_b.id, now)
            .await
            .unwrap();

        let err = CheckoutService::checkout(&db, acc_a.id, student.id, now)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));

        let still_open = visit::Model::current_for_student(&db, student.id).await.unwrap();
        assert!(still_open.is_some());
    }
}
