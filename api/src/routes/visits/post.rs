use axum::{
    Extension, Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use chrono::Utc;
use services::{
    checkin::CheckinService, checkout::CheckoutService, supervision::SupervisionService,
};
use util::state::AppState;

use super::common::{CheckinRequest, CheckinResponse, CheckoutResponse, VisitResponse};
use crate::{
    auth::AuthUser,
    response::{ApiResponse, service_error},
    routes::common::{parse_body, require_id, require_staff},
    ws::active_groups::{emit, payload},
};

/// POST /visits/student/{student_id}/checkin
///
/// Checks a student into a live active group. The caller must be staff and
/// either supervise the target group or teach the student's home group.
///
/// ### Request Body
/// ```json
/// { "active_group_id": 7 }
/// ```
///
/// ### Responses
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": {
///     "student_id": 12,
///     "action": "checked_in",
///     "visit_id": 40,
///     "active_group_id": 7,
///     "room_id": 3,
///     "attendance_status": "checked_in",
///     "check_in_time": "2025-10-06T07:45:00+00:00",
///     "checked_in_by": 5
///   },
///   "message": "Student checked in successfully"
/// }
/// ```
/// - `400 Bad Request` (missing body or invalid ids)
/// - `401 Unauthorized`
/// - `403 Forbidden` (not staff, or no authority over the student)
/// - `404 Not Found` (student or active group)
/// - `409 Conflict` (group ended, student already in a room or already checked in today)
pub async fn checkin_student(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Path(student_id): Path<i64>,
    body: Result<Json<CheckinRequest>, JsonRejection>,
) -> (StatusCode, Json<ApiResponse<CheckinResponse>>) {
    if let Err(e) = require_id(student_id, "student") {
        return e;
    }
    let req: CheckinRequest = match parse_body(body) {
        Ok(req) => req,
        Err(e) => return e,
    };

    let now = Utc::now();
    match CheckinService::checkin(app_state.db(), claims.sub, student_id, req.active_group_id, now)
        .await
    {
        Ok(outcome) => {
            emit::visit_checked_in(
                app_state.ws(),
                payload::VisitCheckedIn {
                    active_group_id: outcome.active_group_id,
                    student_id: outcome.student_id,
                    visit_id: outcome.visit_id,
                    entry_time: now.to_rfc3339(),
                },
            )
            .await;
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    CheckinResponse::from(outcome),
                    "Student checked in successfully",
                )),
            )
        }
        Err(e) => service_error(e),
    }
}

/// POST /visits/student/{student_id}/checkout
///
/// Ends the student's day: closes the open visit if there is one, marks
/// today's attendance as checked out and cancels a pending scheduled
/// checkout. Students without an open visit can still be checked out by
/// their home-group teacher.
///
/// ### Responses
/// - `200 OK` with `{ student_id, action: "checked_out", attendance_id, attendance_status, check_in_time, check_out_time, checked_in_by, checked_out_by }`
/// - `400 Bad Request` (invalid id)
/// - `401 Unauthorized`
/// - `403 Forbidden` (must be room supervisor or home-group teacher)
/// - `404 Not Found` (student unknown or not currently checked in)
/// - `500 Internal Server Error`
pub async fn checkout_student(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Path(student_id): Path<i64>,
) -> (StatusCode, Json<ApiResponse<CheckoutResponse>>) {
    if let Err(e) = require_id(student_id, "student") {
        return e;
    }

    let now = Utc::now();
    match CheckoutService::checkout(app_state.db(), claims.sub, student_id, now).await {
        Ok(outcome) => {
            emit::checkout_outcome(app_state.ws(), &outcome, now, false).await;
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    CheckoutResponse::from(&outcome),
                    "Student checked out successfully",
                )),
            )
        }
        Err(e) => service_error(e),
    }
}

/// POST /visits/{visit_id}/end
///
/// Closes a single visit without touching the student's daily attendance.
/// The student stays checked in for the day and cannot be checked into
/// another group until checked out. Staff only; `409` if already closed.
pub async fn end_visit(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Path(visit_id): Path<i64>,
) -> (StatusCode, Json<ApiResponse<VisitResponse>>) {
    if let Err(e) = require_id(visit_id, "visit") {
        return e;
    }
    if let Err(e) = require_staff(app_state.db(), claims.sub).await {
        return e;
    }
    match SupervisionService::end_visit(app_state.db(), visit_id, Utc::now()).await {
        Ok(v) => (
            StatusCode::OK,
            Json(ApiResponse::success(v.into(), "Visit ended successfully")),
        ),
        Err(e) => service_error(e),
    }
}
