use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use db::models::{active_group, combined_group, group_mapping};
use sea_orm::EntityTrait;
use services::ServiceError;
use util::state::AppState;

use super::common::{AddGroupRequest, CombinedGroupResponse, CreateCombinedGroupRequest};
use crate::{
    response::{ApiResponse, service_error},
    routes::common::{db_error, not_found, parse_body, require_id},
};

/// POST /combined-groups
///
/// ### Request Body
/// ```json
/// { "name": "Spätgruppe", "description": "Rooms 1 and 2 after 15:00" }
/// ```
///
/// ### Responses
/// - `201 Created`
/// - `400 Bad Request`
/// - `409 Conflict` (name taken)
pub async fn create_combined_group(
    State(app_state): State<AppState>,
    body: Result<Json<CreateCombinedGroupRequest>, JsonRejection>,
) -> (StatusCode, Json<ApiResponse<CombinedGroupResponse>>) {
    let req: CreateCombinedGroupRequest = match parse_body(body) {
        Ok(req) => req,
        Err(e) => return e,
    };

    match combined_group::Model::create(app_state.db(), &req.name, req.description).await {
        Ok(group) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                CombinedGroupResponse::new(group, Vec::new()),
                "Combined group created successfully",
            )),
        ),
        Err(e) => service_error(ServiceError::conflict_on_unique(
            e,
            "A combined group with this name already exists",
        )),
    }
}

/// POST /combined-groups/{id}/groups
///
/// ### Request Body
/// ```json
/// { "active_group_id": 7 }
/// ```
///
/// ### Responses
/// - `201 Created` with the updated combined group
/// - `404 Not Found` (combined group or active group)
/// - `409 Conflict` (already part of the combined group)
pub async fn add_group(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    body: Result<Json<AddGroupRequest>, JsonRejection>,
) -> (StatusCode, Json<ApiResponse<CombinedGroupResponse>>) {
    if let Err(e) = require_id(id, "combined group") {
        return e;
    }
    let req: AddGroupRequest = match parse_body(body) {
        Ok(req) => req,
        Err(e) => return e,
    };
    let db = app_state.db();

    let group = match combined_group::Entity::find_by_id(id).one(db).await {
        Ok(Some(group)) => group,
        Ok(None) => return not_found("Combined group"),
        Err(e) => return db_error(e),
    };
    match active_group::Entity::find_by_id(req.active_group_id).one(db).await {
        Ok(Some(_)) => {}
        Ok(None) => return not_found("Active group"),
        Err(e) => return db_error(e),
    }

    if let Err(e) = group_mapping::Model::add(db, id, req.active_group_id).await {
        return service_error(ServiceError::conflict_on_unique(
            e,
            "Active group is already part of this combined group",
        ));
    }

    match group_mapping::Model::active_group_ids(db, id).await {
        Ok(ids) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                CombinedGroupResponse::new(group, ids),
                "Active group added successfully",
            )),
        ),
        Err(e) => db_error(e),
    }
}
