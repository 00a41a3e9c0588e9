use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use db::models::{combined_group, group_mapping};
use sea_orm::DbErr;
use services::ServiceError;
use util::state::AppState;

use super::common::{CombinedGroupResponse, EditCombinedGroupRequest};
use crate::{
    response::{ApiResponse, service_error},
    routes::common::{bad_request, db_error, not_found, parse_body, require_id},
};

/// PUT /combined-groups/{id}
///
/// Partial update; omitted fields keep their value. At least one field is
/// required.
pub async fn edit_combined_group(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    body: Result<Json<EditCombinedGroupRequest>, JsonRejection>,
) -> (StatusCode, Json<ApiResponse<CombinedGroupResponse>>) {
    if let Err(e) = require_id(id, "combined group") {
        return e;
    }
    let req: EditCombinedGroupRequest = match parse_body(body) {
        Ok(req) => req,
        Err(e) => return e,
    };
    if req.name.is_none() && req.description.is_none() && req.is_active.is_none() {
        return bad_request("Nothing to update");
    }
    let db = app_state.db();

    let group = match combined_group::Model::edit(db, id, req.name, req.description, req.is_active)
        .await
    {
        Ok(group) => group,
        Err(DbErr::RecordNotFound(_)) => return not_found("Combined group"),
        Err(e) => {
            return service_error(ServiceError::conflict_on_unique(
                e,
                "A combined group with this name already exists",
            ));
        }
    };

    match group_mapping::Model::active_group_ids(db, id).await {
        Ok(ids) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                CombinedGroupResponse::new(group, ids),
                "Combined group updated successfully",
            )),
        ),
        Err(e) => db_error(e),
    }
}
