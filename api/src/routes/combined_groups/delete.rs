use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use db::models::{combined_group, group_mapping};
use sea_orm::EntityTrait;
use util::state::AppState;

use crate::{
    auth::guards::Empty,
    response::ApiResponse,
    routes::common::{db_error, not_found, require_id},
};

/// DELETE /combined-groups/{id}
///
/// Deletes the combined group and its mappings. The active groups stay.
pub async fn delete_combined_group(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> (StatusCode, Json<ApiResponse<Empty>>) {
    if let Err(e) = require_id(id, "combined group") {
        return e;
    }
    match combined_group::Entity::delete_by_id(id).exec(app_state.db()).await {
        Ok(res) if res.rows_affected == 0 => not_found("Combined group"),
        Ok(_) => (
            StatusCode::OK,
            Json(ApiResponse::success(Empty, "Combined group deleted successfully")),
        ),
        Err(e) => db_error(e),
    }
}

/// DELETE /combined-groups/{id}/groups/{active_group_id}
///
/// `404` when the active group is not part of the combined group.
pub async fn remove_group(
    State(app_state): State<AppState>,
    Path((id, active_group_id)): Path<(i64, i64)>,
) -> (StatusCode, Json<ApiResponse<Empty>>) {
    if let Err(e) = require_id(id, "combined group") {
        return e;
    }
    match group_mapping::Model::remove(app_state.db(), id, active_group_id).await {
        Ok(true) => (
            StatusCode::OK,
            Json(ApiResponse::success(Empty, "Active group removed successfully")),
        ),
        Ok(false) => not_found("Group mapping"),
        Err(e) => db_error(e),
    }
}
