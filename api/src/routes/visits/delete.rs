use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use db::models::visit;
use sea_orm::EntityTrait;
use util::state::AppState;

use crate::{
    auth::guards::Empty,
    response::ApiResponse,
    routes::common::{db_error, not_found, require_id},
};

/// DELETE /visits/{visit_id}
///
/// Removes a visit row outright. Admin only; daily attendance is untouched.
pub async fn delete_visit(
    State(app_state): State<AppState>,
    Path(visit_id): Path<i64>,
) -> (StatusCode, Json<ApiResponse<Empty>>) {
    if let Err(e) = require_id(visit_id, "visit") {
        return e;
    }
    match visit::Entity::delete_by_id(visit_id).exec(app_state.db()).await {
        Ok(res) if res.rows_affected == 0 => not_found("Visit"),
        Ok(_) => {
            tracing::info!(visit_id, "visit deleted");
            (
                StatusCode::OK,
                Json(ApiResponse::success(Empty, "Visit deleted successfully")),
            )
        }
        Err(e) => db_error(e),
    }
}
