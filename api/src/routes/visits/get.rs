use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use db::models::visit;
use sea_orm::EntityTrait;
use util::state::AppState;

use super::common::{VisitListQuery, VisitResponse};
use crate::{
    response::ApiResponse,
    routes::common::{db_error, not_found, require_id},
};

/// GET /visits
///
/// Lists visits, newest first. All filters are optional:
/// `active` (open visits only / closed only), `student_id`, `active_group_id`.
pub async fn list_visits(
    State(app_state): State<AppState>,
    Query(query): Query<VisitListQuery>,
) -> (StatusCode, Json<ApiResponse<Vec<VisitResponse>>>) {
    match visit::Model::list(
        app_state.db(),
        query.active,
        query.student_id,
        query.active_group_id,
    )
    .await
    {
        Ok(rows) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                rows.into_iter().map(VisitResponse::from).collect(),
                "Visits retrieved successfully",
            )),
        ),
        Err(e) => db_error(e),
    }
}

/// GET /visits/{visit_id}
pub async fn get_visit(
    State(app_state): State<AppState>,
    Path(visit_id): Path<i64>,
) -> (StatusCode, Json<ApiResponse<VisitResponse>>) {
    if let Err(e) = require_id(visit_id, "visit") {
        return e;
    }
    match visit::Entity::find_by_id(visit_id).one(app_state.db()).await {
        Ok(Some(v)) => (
            StatusCode::OK,
            Json(ApiResponse::success(v.into(), "Visit retrieved successfully")),
        ),
        Ok(None) => not_found("Visit"),
        Err(e) => db_error(e),
    }
}

/// GET /visits/student/{student_id}/current
///
/// The student's open visit, or `404` when they are not in any room.
pub async fn get_current_visit(
    State(app_state): State<AppState>,
    Path(student_id): Path<i64>,
) -> (StatusCode, Json<ApiResponse<VisitResponse>>) {
    if let Err(e) = require_id(student_id, "student") {
        return e;
    }
    match visit::Model::current_for_student(app_state.db(), student_id).await {
        Ok(Some(v)) => (
            StatusCode::OK,
            Json(ApiResponse::success(v.into(), "Current visit retrieved successfully")),
        ),
        Ok(None) => not_found("Current visit"),
        Err(e) => db_error(e),
    }
}
