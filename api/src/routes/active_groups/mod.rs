//! `/active-groups` route group: live supervised sessions in a room.
//!
//! - `GET    /active-groups?active=&room_id=` → `list_active_groups`
//! - `POST   /active-groups` → `start_active_group`
//! - `POST   /active-groups/process-timeouts` → `process_timeouts` (admin)
//! - `GET    /active-groups/{active_group_id}` → `get_active_group`
//! - `DELETE /active-groups/{active_group_id}` → `delete_active_group` (admin)
//! - `POST   /active-groups/{active_group_id}/end` → `end_active_group`
//! - `GET    /active-groups/{active_group_id}/visits` → `list_group_visits`
//! - `GET    /active-groups/{active_group_id}/supervisors` → `list_group_supervisors`
//! - `POST   /active-groups/{active_group_id}/supervisors` → `add_supervisor`

pub mod common;
pub mod delete;
pub mod get;
pub mod post;

use axum::{
    Router,
    middleware::from_fn,
    routing::{delete, get, post},
};
use util::state::AppState;

use crate::auth::guards::allow_admin;
use delete::delete_active_group;
use get::{get_active_group, list_active_groups, list_group_supervisors, list_group_visits};
use post::{add_supervisor, end_active_group, process_timeouts, start_active_group};

pub fn active_group_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_active_groups))
        .route("/", post(start_active_group))
        .route(
            "/process-timeouts",
            post(process_timeouts).route_layer(from_fn(allow_admin)),
        )
        .route("/{active_group_id}", get(get_active_group))
        .route(
            "/{active_group_id}",
            delete(delete_active_group).route_layer(from_fn(allow_admin)),
        )
        .route("/{active_group_id}/end", post(end_active_group))
        .route("/{active_group_id}/visits", get(list_group_visits))
        .route("/{active_group_id}/supervisors", get(list_group_supervisors))
        .route("/{active_group_id}/supervisors", post(add_supervisor))
}
