//! `/visits` route group: room visits plus the checkin/checkout workflow.
//!
//! - `GET    /visits?active=&student_id=&active_group_id=` → `list_visits`
//! - `GET    /visits/{visit_id}` → `get_visit`
//! - `POST   /visits/{visit_id}/end` → `end_visit`
//! - `DELETE /visits/{visit_id}` → `delete_visit` (admin)
//! - `GET    /visits/student/{student_id}/current` → `get_current_visit`
//! - `POST   /visits/student/{student_id}/checkin` → `checkin_student`
//! - `POST   /visits/student/{student_id}/checkout` → `checkout_student`

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
use delete::delete_visit;
use get::{get_current_visit, get_visit, list_visits};
use post::{checkin_student, checkout_student, end_visit};

pub fn visit_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_visits))
        .route("/{visit_id}", get(get_visit))
        .route("/{visit_id}", delete(delete_visit).route_layer(from_fn(allow_admin)))
        .route("/{visit_id}/end", post(end_visit))
        .route("/student/{student_id}/current", get(get_current_visit))
        .route("/student/{student_id}/checkin", post(checkin_student))
        .route("/student/{student_id}/checkout", post(checkout_student))
}
