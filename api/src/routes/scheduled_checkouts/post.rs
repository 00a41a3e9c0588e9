use axum::{
    Extension, Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use chrono::Utc;
use services::scheduled_checkout::{ProcessStatus, ScheduledCheckoutService};
use util::state::AppState;

use super::common::{CreateScheduledCheckoutRequest, ProcessResponse, ScheduledCheckoutResponse};
use crate::{
    auth::AuthUser,
    response::{ApiResponse, service_error},
    routes::common::{parse_body, require_staff},
    ws::active_groups::emit,
};

/// POST /scheduled-checkouts
///
/// Schedules a checkout for later. The caller needs the same authority over
/// the student as for an immediate checkout.
///
/// ### Request Body
/// ```json
/// { "student_id": 12, "scheduled_for": "2025-10-06T14:30:00Z", "reason": "Abholung durch Oma" }
/// ```
///
/// ### Responses
/// - `201 Created`
/// - `400 Bad Request` (invalid body, or `scheduled_for` in the past)
/// - `403 Forbidden`
/// - `404 Not Found` (student)
/// - `409 Conflict` (a pending checkout already exists for the student)
pub async fn create_scheduled_checkout(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    body: Result<Json<CreateScheduledCheckoutRequest>, JsonRejection>,
) -> (StatusCode, Json<ApiResponse<ScheduledCheckoutResponse>>) {
    let req: CreateScheduledCheckoutRequest = match parse_body(body) {
        Ok(req) => req,
        Err(e) => return e,
    };

    match ScheduledCheckoutService::schedule(
        app_state.db(),
        claims.sub,
        req.student_id,
        req.scheduled_for,
        req.reason,
        Utc::now(),
    )
    .await
    {
        Ok(row) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                row.into(),
                "Checkout scheduled successfully",
            )),
        ),
        Err(e) => service_error(e),
    }
}

/// POST /scheduled-checkouts/process
///
/// Executes every due scheduled checkout now. Staff only.
///
/// ### Responses
/// - `200 OK` when nothing failed (including when nothing was due)
/// - `206 Partial Content` when some checkouts failed
/// - `403 Forbidden` when the caller is not staff
/// - `500 Internal Server Error` when every attempted checkout failed
///
/// ```json
/// {
///   "success": true,
///   "data": {
///     "checkouts_executed": 3,
///     "attempted": 4,
///     "failed": 1,
///     "skipped": 0,
///     "errors": [{ "scheduled_checkout_id": 9, "student_id": 21, "error": "Student is not currently checked in" }]
///   },
///   "message": "Scheduled checkouts partially processed"
/// }
/// ```
pub async fn process_scheduled_checkouts(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> (StatusCode, Json<ApiResponse<ProcessResponse>>) {
    if let Err(e) = require_staff(app_state.db(), claims.sub).await {
        return e;
    }

    let now = Utc::now();
    let result = match ScheduledCheckoutService::process_due(app_state.db(), now).await {
        Ok(result) => result,
        Err(e) => return service_error(e),
    };

    for outcome in &result.executed {
        emit::checkout_outcome(app_state.ws(), outcome, now, true).await;
    }

    let data = ProcessResponse::from(&result);
    let (status, success, message) = match result.status() {
        ProcessStatus::Complete => (StatusCode::OK, true, "Scheduled checkouts processed"),
        ProcessStatus::Partial => (
            StatusCode::PARTIAL_CONTENT,
            true,
            "Scheduled checkouts partially processed",
        ),
        ProcessStatus::Failed => (
            StatusCode::INTERNAL_SERVER_ERROR,
            false,
            "All scheduled checkouts failed",
        ),
    };

    (
        status,
        Json(ApiResponse {
            success,
            data,
            message: message.to_string(),
        }),
    )
}
