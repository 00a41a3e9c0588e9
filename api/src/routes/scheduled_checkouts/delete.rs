use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use services::scheduled_checkout::ScheduledCheckoutService;
use util::state::AppState;

use super::common::ScheduledCheckoutResponse;
use crate::{
    auth::AuthUser,
    response::{ApiResponse, service_error},
    routes::common::require_id,
};

/// DELETE /scheduled-checkouts/{id}
///
/// Cancels a pending scheduled checkout. Cancelling one that is already
/// cancelled succeeds and changes nothing. Executed, failed or running ones
/// are `409`.
pub async fn cancel_scheduled_checkout(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> (StatusCode, Json<ApiResponse<ScheduledCheckoutResponse>>) {
    if let Err(e) = require_id(id, "scheduled checkout") {
        return e;
    }
    match ScheduledCheckoutService::cancel(app_state.db(), claims.sub, id, Utc::now()).await {
        Ok(outcome) => {
            let message = if outcome.changed {
                "Scheduled checkout cancelled successfully"
            } else {
                "Scheduled checkout was already cancelled"
            };
            (
                StatusCode::OK,
                Json(ApiResponse::success(outcome.scheduled_checkout.into(), message)),
            )
        }
        Err(e) => service_error(e),
    }
}
