use axum::{
    Extension, Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use chrono::Utc;
use services::{session::SessionService, supervision::SupervisionService};
use util::state::AppState;

use super::common::{
    ActiveGroupResponse, AddSupervisorRequest, EndActiveGroupResponse, ProcessTimeoutsResponse,
    StartActiveGroupRequest, SupervisorResponse,
};
use crate::{
    auth::AuthUser,
    response::{ApiResponse, service_error},
    routes::common::{parse_body, require_id, require_staff},
    ws::active_groups::emit,
};

/// POST /active-groups
///
/// Starts a session of an activity in a room; the caller becomes its first
/// supervisor.
///
/// ### Request Body
/// ```json
/// { "activity_id": 2, "room_id": 3, "timeout_minutes": 45 }
/// ```
/// `timeout_minutes` falls back to `SESSION_TIMEOUT_MINUTES`.
///
/// ### Responses
/// - `201 Created`
/// - `400 Bad Request`
/// - `403 Forbidden` (caller is not staff)
/// - `404 Not Found` (activity or room)
/// - `409 Conflict` (room already hosts a live session)
pub async fn start_active_group(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    body: Result<Json<StartActiveGroupRequest>, JsonRejection>,
) -> (StatusCode, Json<ApiResponse<ActiveGroupResponse>>) {
    let req: StartActiveGroupRequest = match parse_body(body) {
        Ok(req) => req,
        Err(e) => return e,
    };

    match SessionService::start_session(
        app_state.db(),
        claims.sub,
        req.activity_id,
        req.room_id,
        req.timeout_minutes,
        Utc::now(),
    )
    .await
    {
        Ok(group) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(group.into(), "Active group started successfully")),
        ),
        Err(e) => service_error(e),
    }
}

/// POST /active-groups/{active_group_id}/end
///
/// Ends a live session, closing its open visits and supervisions.
/// `409` when the session already ended.
pub async fn end_active_group(
    State(app_state): State<AppState>,
    Path(active_group_id): Path<i64>,
) -> (StatusCode, Json<ApiResponse<EndActiveGroupResponse>>) {
    if let Err(e) = require_id(active_group_id, "active group") {
        return e;
    }

    match SessionService::end_session(app_state.db(), active_group_id, Utc::now()).await {
        Ok(ended) => {
            emit::session_ended(app_state.ws(), &ended, false).await;
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    EndActiveGroupResponse {
                        visits_closed: ended.visits_closed,
                        supervisors_closed: ended.supervisors_closed,
                        active_group: ended.active_group.into(),
                    },
                    "Active group ended successfully",
                )),
            )
        }
        Err(e) => service_error(e),
    }
}

/// POST /active-groups/process-timeouts
///
/// Runs the idle-session sweep once, the same way the background task does.
pub async fn process_timeouts(
    State(app_state): State<AppState>,
) -> (StatusCode, Json<ApiResponse<ProcessTimeoutsResponse>>) {
    match SessionService::process_session_timeouts(app_state.db(), Utc::now()).await {
        Ok(ended) => {
            for session in &ended {
                emit::session_ended(app_state.ws(), session, true).await;
            }
            let active_group_ids: Vec<i64> = ended.iter().map(|s| s.active_group.id).collect();
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    ProcessTimeoutsResponse {
                        sessions_ended: active_group_ids.len(),
                        active_group_ids,
                    },
                    "Session timeouts processed",
                )),
            )
        }
        Err(e) => service_error(e),
    }
}

/// POST /active-groups/{active_group_id}/supervisors
///
/// ### Request Body
/// ```json
/// { "staff_id": 4, "role": "assistant" }
/// ```
///
/// ### Responses
/// - `201 Created`
/// - `403 Forbidden` (caller is not staff)
/// - `404 Not Found` (group or staff)
/// - `409 Conflict` (group ended, or staff already supervises it)
pub async fn add_supervisor(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Path(active_group_id): Path<i64>,
    body: Result<Json<AddSupervisorRequest>, JsonRejection>,
) -> (StatusCode, Json<ApiResponse<SupervisorResponse>>) {
    if let Err(e) = require_id(active_group_id, "active group") {
        return e;
    }
    if let Err(e) = require_staff(app_state.db(), claims.sub).await {
        return e;
    }
    let req: AddSupervisorRequest = match parse_body(body) {
        Ok(req) => req,
        Err(e) => return e,
    };

    match SupervisionService::add_supervisor(
        app_state.db(),
        active_group_id,
        req.staff_id,
        req.role.as_deref(),
        Utc::now(),
    )
    .await
    {
        Ok(sup) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(sup.into(), "Supervisor added successfully")),
        ),
        Err(e) => service_error(e),
    }
}
