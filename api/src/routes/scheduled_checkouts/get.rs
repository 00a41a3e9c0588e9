use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use db::models::scheduled_checkout::{self, ScheduledCheckoutStatus};
use sea_orm::EntityTrait;
use std::str::FromStr;
use util::state::AppState;

use super::common::{ScheduledCheckoutListQuery, ScheduledCheckoutResponse};
use crate::{
    response::ApiResponse,
    routes::common::{bad_request, db_error, not_found, require_id},
};

/// GET /scheduled-checkouts
///
/// Optional filter `status` (`pending`, `processing`, `executed`,
/// `cancelled`, `failed`). Unknown values are `400`.
pub async fn list_scheduled_checkouts(
    State(app_state): State<AppState>,
    Query(query): Query<ScheduledCheckoutListQuery>,
) -> (StatusCode, Json<ApiResponse<Vec<ScheduledCheckoutResponse>>>) {
    let status = match query.status.as_deref().map(ScheduledCheckoutStatus::from_str) {
        None => None,
        Some(Ok(status)) => Some(status),
        Some(Err(_)) => return bad_request("Invalid status filter"),
    };

    match scheduled_checkout::Model::list(app_state.db(), status).await {
        Ok(rows) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                rows.into_iter().map(ScheduledCheckoutResponse::from).collect(),
                "Scheduled checkouts retrieved successfully",
            )),
        ),
        Err(e) => db_error(e),
    }
}

/// GET /scheduled-checkouts/{id}
pub async fn get_scheduled_checkout(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> (StatusCode, Json<ApiResponse<ScheduledCheckoutResponse>>) {
    if let Err(e) = require_id(id, "scheduled checkout") {
        return e;
    }
    match scheduled_checkout::Entity::find_by_id(id).one(app_state.db()).await {
        Ok(Some(row)) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                row.into(),
                "Scheduled checkout retrieved successfully",
            )),
        ),
        Ok(None) => not_found("Scheduled checkout"),
        Err(e) => db_error(e),
    }
}

/// GET /scheduled-checkouts/student/{student_id}
///
/// The student's pending scheduled checkout, `404` when there is none.
pub async fn get_pending_for_student(
    State(app_state): State<AppState>,
    Path(student_id): Path<i64>,
) -> (StatusCode, Json<ApiResponse<ScheduledCheckoutResponse>>) {
    if let Err(e) = require_id(student_id, "student") {
        return e;
    }
    match scheduled_checkout::Model::pending_for_student(app_state.db(), student_id).await {
        Ok(Some(row)) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                row.into(),
                "Scheduled checkout retrieved successfully",
            )),
        ),
        Ok(None) => not_found("Pending scheduled checkout"),
        Err(e) => db_error(e),
    }
}
