//! Derives a student's daily attendance status.
//!
//! The daily [`attendance`](db::models::attendance) record is the source of
//! truth for the tri-state status. The room-level visit is exposed
//! separately because a student can be checked in for the day without
//! being in any room right now.

use chrono::{DateTime, NaiveDate, Utc};
use db::models::{attendance, visit};
use sea_orm::{ConnectionTrait, DbErr};
use serde::Serialize;

use crate::error::ServiceResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    NotCheckedIn,
    CheckedIn,
    CheckedOut,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::NotCheckedIn => "not_checked_in",
            AttendanceStatus::CheckedIn => "checked_in",
            AttendanceStatus::CheckedOut => "checked_out",
        }
    }

    pub fn of(record: Option<&attendance::Model>) -> Self {
        match record {
            None => AttendanceStatus::NotCheckedIn,
            Some(r) if r.is_checked_out() => AttendanceStatus::CheckedOut,
            Some(_) => AttendanceStatus::CheckedIn,
        }
    }
}

/// Point-in-time view of a student's attendance for one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttendanceSnapshot {
    pub student_id: i64,
    pub status: AttendanceStatus,
    pub attendance_id: Option<i64>,
    pub date: Option<NaiveDate>,
    pub check_in_time: Option<DateTime<Utc>>,
    pub check_out_time: Option<DateTime<Utc>>,
    pub checked_in_by: Option<i64>,
    pub checked_out_by: Option<i64>,
}

impl AttendanceSnapshot {
    pub fn not_checked_in(student_id: i64) -> Self {
        Self {
            student_id,
            status: AttendanceStatus::NotCheckedIn,
            attendance_id: None,
            date: None,
            check_in_time: None,
            check_out_time: None,
            checked_in_by: None,
            checked_out_by: None,
        }
    }

    pub fn from_record(record: &attendance::Model) -> Self {
        Self {
            student_id: record.student_id,
            status: AttendanceStatus::of(Some(record)),
            attendance_id: Some(record.id),
            date: Some(record.date),
            check_in_time: Some(record.check_in_time),
            check_out_time: record.check_out_time,
            checked_in_by: Some(record.checked_in_by),
            checked_out_by: record.checked_out_by,
        }
    }
}

/// Reading today's record either finds nothing or fails; callers must not
/// mix the two up.
#[derive(Debug, thiserror::Error)]
pub enum AttendanceLookupError {
    #[error("no attendance record for student {student_id} on {date}")]
    NoRecord { student_id: i64, date: NaiveDate },

    #[error(transparent)]
    Database(#[from] DbErr),
}

/// Snapshot for `date`, or `NoRecord` when the student never checked in.
pub async fn read_for_day<C: ConnectionTrait>(
    db: &C,
    student_id: i64,
    date: NaiveDate,
) -> Result<AttendanceSnapshot, AttendanceLookupError> {
    match attendance::Model::for_day(db, student_id, date).await? {
        Some(record) => Ok(AttendanceSnapshot::from_record(&record)),
        None => Err(AttendanceLookupError::NoRecord { student_id, date }),
    }
}

/// Today's snapshot with "no record" folded into `not_checked_in`.
pub async fn status_today<C: ConnectionTrait>(
    db: &C,
    student_id: i64,
    now: DateTime<Utc>,
) -> ServiceResult<AttendanceSnapshot> {
    match read_for_day(db, student_id, now.date_naive()).await {
        Ok(snapshot) => Ok(snapshot),
        Err(AttendanceLookupError::NoRecord { .. }) => {
            Ok(AttendanceSnapshot::not_checked_in(student_id))
        }
        Err(AttendanceLookupError::Database(e)) => Err(e.into()),
    }
}

/// Re-reads today's snapshot after a committed transition. Failures are
/// logged and yield `None`.
pub async fn snapshot_best_effort<C: ConnectionTrait>(
    db: &C,
    student_id: i64,
    now: DateTime<Utc>,
) -> Option<AttendanceSnapshot> {
    match read_for_day(db, student_id, now.date_naive()).await {
        Ok(snapshot) => Some(snapshot),
        Err(e) => {
            tracing::warn!(student_id, error = %e, "could not re-read attendance");
            None
        }
    }
}

pub async fn current_visit<C: ConnectionTrait>(
    db: &C,
    student_id: i64,
) -> ServiceResult<Option<visit::Model>> {
    Ok(visit::Model::current_for_student(db, student_id).await?)
}
