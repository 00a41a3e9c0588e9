//! `/supervisors` route group.
//!
//! - `POST /supervisors/{supervisor_id}/end` → `end_supervision`
//! - `GET  /supervisors/staff/{staff_id}` → `list_staff_supervisions`
//!
//! Supervisors are added through `/active-groups/{id}/supervisors`.

pub mod get;
pub mod post;

use axum::{
    Router,
    routing::{get, post},
};
use util::state::AppState;

use get::list_staff_supervisions;
use post::end_supervision;

pub fn supervisor_routes() -> Router<AppState> {
    Router::new()
        .route("/{supervisor_id}/end", post(end_supervision))
        .route("/staff/{staff_id}", get(list_staff_supervisions))
}
