use axum::{Router, routing::get};
use util::state::AppState;

pub mod emit;
pub mod handlers;
pub mod payload;
pub mod topics;
pub mod ws_handlers;

use handlers::active_group_ws_handler;

pub fn ws_active_group_routes() -> Router<AppState> {
    Router::new().route("/{active_group_id}", get(active_group_ws_handler))
}
