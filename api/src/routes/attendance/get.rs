use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use db::models::student;
use sea_orm::EntityTrait;
use serde::Serialize;
use services::attendance_state::{self, AttendanceSnapshot};
use util::state::AppState;

use crate::{
    response::{ApiResponse, service_error},
    routes::common::{db_error, not_found, require_id},
};

#[derive(Debug, Serialize, Default)]
pub struct AttendanceStatusResponse {
    pub student_id: i64,
    pub status: String,
    pub attendance_id: Option<i64>,
    pub date: Option<String>,
    pub check_in_time: Option<String>,
    pub check_out_time: Option<String>,
    pub checked_in_by: Option<i64>,
    pub checked_out_by: Option<i64>,
}

impl From<AttendanceSnapshot> for AttendanceStatusResponse {
    fn from(s: AttendanceSnapshot) -> Self {
        Self {
            student_id: s.student_id,
            status: s.status.as_str().to_string(),
            attendance_id: s.attendance_id,
            date: s.date.map(|d| d.to_string()),
            check_in_time: s.check_in_time.map(|t| t.to_rfc3339()),
            check_out_time: s.check_out_time.map(|t| t.to_rfc3339()),
            checked_in_by: s.checked_in_by,
            checked_out_by: s.checked_out_by,
        }
    }
}

/// GET /attendance/student/{student_id}/status
///
/// Today's attendance state of a student. A student without a record today
/// is reported as `not_checked_in`, not as `404`.
///
/// ### Response
/// ```json
/// {
///   "success": true,
///   "data": {
///     "student_id": 12,
///     "status": "checked_in",
///     "attendance_id": 88,
///     "date": "2025-10-06",
///     "check_in_time": "2025-10-06T07:45:00+00:00",
///     "check_out_time": null,
///     "checked_in_by": 5,
///     "checked_out_by": null
///   },
///   "message": "Attendance status retrieved successfully"
/// }
/// ```
pub async fn get_attendance_status(
    State(app_state): State<AppState>,
    Path(student_id): Path<i64>,
) -> (StatusCode, Json<ApiResponse<AttendanceStatusResponse>>) {
    if let Err(e) = require_id(student_id, "student") {
        return e;
    }
    let db = app_state.db();

    match student::Entity::find_by_id(student_id).one(db).await {
        Ok(Some(_)) => {}
        Ok(None) => return not_found("Student"),
        Err(e) => return db_error(e),
    }

    match attendance_state::status_today(db, student_id, Utc::now()).await {
        Ok(snapshot) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                snapshot.into(),
                "Attendance status retrieved successfully",
            )),
        ),
        Err(e) => service_error(e),
    }
}
