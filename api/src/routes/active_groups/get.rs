use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::Utc;
use db::models::{active_group, group_supervisor, visit};
use sea_orm::EntityTrait;
use util::state::AppState;

use super::common::{ActiveGroupListQuery, ActiveGroupResponse, SupervisorResponse};
use crate::{
    response::ApiResponse,
    routes::{
        common::{db_error, not_found, require_id},
        visits::common::VisitResponse,
    },
};

/// GET /active-groups
///
/// Optional filters: `active=true|false`, `room_id`.
pub async fn list_active_groups(
    State(app_state): State<AppState>,
    Query(query): Query<ActiveGroupListQuery>,
) -> (StatusCode, Json<ApiResponse<Vec<ActiveGroupResponse>>>) {
    match active_group::Model::list(app_state.db(), query.active, query.room_id).await {
        Ok(groups) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                groups.into_iter().map(ActiveGroupResponse::from).collect(),
                "Active groups retrieved successfully",
            )),
        ),
        Err(e) => db_error(e),
    }
}

/// GET /active-groups/{active_group_id}
pub async fn get_active_group(
    State(app_state): State<AppState>,
    Path(active_group_id): Path<i64>,
) -> (StatusCode, Json<ApiResponse<ActiveGroupResponse>>) {
    if let Err(e) = require_id(active_group_id, "active group") {
        return e;
    }
    match active_group::Entity::find_by_id(active_group_id)
        .one(app_state.db())
        .await
    {
        Ok(Some(g)) => (
            StatusCode::OK,
            Json(ApiResponse::success(g.into(), "Active group retrieved successfully")),
        ),
        Ok(None) => not_found("Active group"),
        Err(e) => db_error(e),
    }
}

/// GET /active-groups/{active_group_id}/visits
///
/// Open visits of the group, i.e. the children currently in the room.
pub async fn list_group_visits(
    State(app_state): State<AppState>,
    Path(active_group_id): Path<i64>,
) -> (StatusCode, Json<ApiResponse<Vec<VisitResponse>>>) {
    if let Err(e) = require_id(active_group_id, "active group") {
        return e;
    }
    match active_group::Entity::find_by_id(active_group_id)
        .one(app_state.db())
        .await
    {
        Ok(Some(_)) => {}
        Ok(None) => return not_found("Active group"),
        Err(e) => return db_error(e),
    }
    match visit::Model::active_for_group(app_state.db(), active_group_id).await {
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

/// GET /active-groups/{active_group_id}/supervisors
pub async fn list_group_supervisors(
    State(app_state): State<AppState>,
    Path(active_group_id): Path<i64>,
) -> (StatusCode, Json<ApiResponse<Vec<SupervisorResponse>>>) {
    if let Err(e) = require_id(active_group_id, "active group") {
        return e;
    }
    match group_supervisor::Model::active_for_group(app_state.db(), active_group_id, Utc::now())
        .await
    {
        Ok(rows) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                rows.into_iter().map(SupervisorResponse::from).collect(),
                "Supervisors retrieved successfully",
            )),
        ),
        Err(e) => db_error(e),
    }
}
