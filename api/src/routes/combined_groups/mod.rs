//! `/combined-groups` route group: named bundles of active groups that are
//! supervised together (e.g. two rooms merged for the late afternoon).
//!
//! - `GET    /combined-groups?active=` → `list_combined_groups`
//! - `POST   /combined-groups` → `create_combined_group`
//! - `GET    /combined-groups/{id}` → `get_combined_group`
//! - `PUT    /combined-groups/{id}` → `edit_combined_group`
//! - `DELETE /combined-groups/{id}` → `delete_combined_group`
//! - `POST   /combined-groups/{id}/groups` → `add_group`
//! - `DELETE /combined-groups/{id}/groups/{active_group_id}` → `remove_group`

pub mod common;
pub mod delete;
pub mod get;
pub mod post;
pub mod put;

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use util::state::AppState;

use delete::{delete_combined_group, remove_group};
use get::{get_combined_group, list_combined_groups};
use post::{add_group, create_combined_group};
use put::edit_combined_group;

pub fn combined_group_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_combined_groups))
        .route("/", post(create_combined_group))
        .route("/{id}", get(get_combined_group))
        .route("/{id}", put(edit_combined_group))
        .route("/{id}", delete(delete_combined_group))
        .route("/{id}/groups", post(add_group))
        .route("/{id}/groups/{active_group_id}", delete(remove_group))
}
