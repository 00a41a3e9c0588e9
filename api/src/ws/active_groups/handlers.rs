use axum::{
    Extension,
    extract::{Path, State, WebSocketUpgrade},
    response::IntoResponse,
};
use std::sync::Arc;
use util::state::AppState;
use util::ws::axum_adapter::ws_route;
use util::ws::serve::WsServerOptions;

use super::topics::active_group_topic;
use super::ws_handlers::ActiveGroupWsHandler;
use crate::auth::AuthUser;

/// GET /ws/active-groups/{active_group_id}
///
/// Subscribes the socket to `active_group:{id}` and counts the caller as a
/// watcher of that group.
pub async fn active_group_ws_handler(
    ws: WebSocketUpgrade,
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Path(active_group_id): Path<i64>,
) -> impl IntoResponse {
    let topic = move || active_group_topic(active_group_id);

    ws_route(
        ws,
        app_state,
        Some(claims.sub),
        topic,
        Arc::new(ActiveGroupWsHandler),
        WsServerOptions::default(),
    )
}
