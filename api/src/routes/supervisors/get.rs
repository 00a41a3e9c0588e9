use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use db::models::group_supervisor;
use util::state::AppState;

use crate::{
    response::ApiResponse,
    routes::{
        active_groups::common::SupervisorResponse,
        common::{db_error, require_id},
    },
};

/// GET /supervisors/staff/{staff_id}
///
/// Supervisions of a staff member that are active right now.
pub async fn list_staff_supervisions(
    State(app_state): State<AppState>,
    Path(staff_id): Path<i64>,
) -> (StatusCode, Json<ApiResponse<Vec<SupervisorResponse>>>) {
    if let Err(e) = require_id(staff_id, "staff") {
        return e;
    }
    match group_supervisor::Model::active_for_staff(app_state.db(), staff_id, Utc::now()).await {
        Ok(rows) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                rows.into_iter().map(SupervisorResponse::from).collect(),
                "Supervisions retrieved successfully",
            )),
        ),
        Err(e) => db_error(e),
    }
}
