use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use db::models::{combined_group, group_mapping};
use sea_orm::EntityTrait;
use util::state::AppState;

use super::common::{CombinedGroupListQuery, CombinedGroupResponse};
use crate::{
    response::ApiResponse,
    routes::common::{db_error, not_found, require_id},
};

/// GET /combined-groups
pub async fn list_combined_groups(
    State(app_state): State<AppState>,
    Query(query): Query<CombinedGroupListQuery>,
) -> (StatusCode, Json<ApiResponse<Vec<CombinedGroupResponse>>>) {
    let db = app_state.db();
    let groups = match combined_group::Model::list(db, query.active).await {
        Ok(groups) => groups,
        Err(e) => return db_error(e),
    };

    let mut out = Vec::with_capacity(groups.len());
    for group in groups {
        match group_mapping::Model::active_group_ids(db, group.id).await {
            Ok(ids) => out.push(CombinedGroupResponse::new(group, ids)),
            Err(e) => return db_error(e),
        }
    }

    (
        StatusCode::OK,
        Json(ApiResponse::success(out, "Combined groups retrieved successfully")),
    )
}

/// GET /combined-groups/{id}
pub async fn get_combined_group(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> (StatusCode, Json<ApiResponse<CombinedGroupResponse>>) {
    if let Err(e) = require_id(id, "combined group") {
        return e;
    }
    let db = app_state.db();
    let group = match combined_group::Entity::find_by_id(id).one(db).await {
        Ok(Some(group)) => group,
        Ok(None) => return not_found("Combined group"),
        Err(e) => return db_error(e),
    };
    match group_mapping::Model::active_group_ids(db, id).await {
        Ok(ids) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                CombinedGroupResponse::new(group, ids),
                "Combined group retrieved successfully",
            )),
        ),
        Err(e) => db_error(e),
    }
}
