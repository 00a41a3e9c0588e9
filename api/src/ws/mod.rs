//! WebSocket entry point for `/ws/...`.
//!
//! Every socket route requires a valid bearer token.

use axum::{Router, middleware::from_fn};
use util::state::AppState;

use crate::{auth::guards::allow_authenticated, ws::active_groups::ws_active_group_routes};

pub mod active_groups;
pub mod core;

pub fn ws_routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/active-groups", ws_active_group_routes())
        .route_layer(from_fn(allow_authenticated))
        .with_state(app_state)
}
