use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use db::models::active_group;
use sea_orm::EntityTrait;
use util::state::AppState;

use crate::{
    auth::guards::Empty,
    response::ApiResponse,
    routes::common::{db_error, not_found, require_id},
};

/// DELETE /active-groups/{active_group_id}
///
/// Hard-deletes a session together with its visits, supervisions and
/// combined-group mappings. Admin only.
pub async fn delete_active_group(
    State(app_state): State<AppState>,
    Path(active_group_id): Path<i64>,
) -> (StatusCode, Json<ApiResponse<Empty>>) {
    if let Err(e) = require_id(active_group_id, "active group") {
        return e;
    }
    match active_group::Entity::delete_by_id(active_group_id)
        .exec(app_state.db())
        .await
    {
        Ok(res) if res.rows_affected == 0 => not_found("Active group"),
        Ok(_) => {
            tracing::info!(active_group_id, "active group deleted");
            (
                StatusCode::OK,
                Json(ApiResponse::success(Empty, "Active group deleted successfully")),
            )
        }
        Err(e) => db_error(e),
    }
}
