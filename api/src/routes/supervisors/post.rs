use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use services::supervision::SupervisionService;
use util::state::AppState;

use crate::{
    auth::AuthUser,
    response::{ApiResponse, service_error},
    routes::{
        active_groups::common::SupervisorResponse,
        common::{require_id, require_staff},
    },
};

/// POST /supervisors/{supervisor_id}/end
///
/// Ends a supervision now. Staff only; `409` when it already ended.
pub async fn end_supervision(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Path(supervisor_id): Path<i64>,
) -> (StatusCode, Json<ApiResponse<SupervisorResponse>>) {
    if let Err(e) = require_id(supervisor_id, "supervisor") {
        return e;
    }
    if let Err(e) = require_staff(app_state.db(), claims.sub).await {
        return e;
    }
    match SupervisionService::end_supervision(app_state.db(), supervisor_id, Utc::now()).await {
        Ok(sup) => (
            StatusCode::OK,
            Json(ApiResponse::success(sup.into(), "Supervision ended successfully")),
        ),
        Err(e) => service_error(e),
    }
}
