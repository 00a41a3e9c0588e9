//! `/scheduled-checkouts` route group.
//!
//! - `GET    /scheduled-checkouts?status=` → `list_scheduled_checkouts`
//! - `POST   /scheduled-checkouts` → `create_scheduled_checkout`
//! - `POST   /scheduled-checkouts/process` → `process_scheduled_checkouts`
//! - `GET    /scheduled-checkouts/student/{student_id}` → `get_pending_for_student`
//! - `GET    /scheduled-checkouts/{id}` → `get_scheduled_checkout`
//! - `DELETE /scheduled-checkouts/{id}` → `cancel_scheduled_checkout`

pub mod common;
pub mod delete;
pub mod get;
pub mod post;

use axum::{
    Router,
    routing::{delete, get, post},
};
use util::state::AppState;

use delete::cancel_scheduled_checkout;
use get::{get_pending_for_student, get_scheduled_checkout, list_scheduled_checkouts};
use post::{create_scheduled_checkout, process_scheduled_checkouts};

pub fn scheduled_checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_scheduled_checkouts))
        .route("/", post(create_scheduled_checkout))
        .route("/process", post(process_scheduled_checkouts))
        .route("/student/{student_id}", get(get_pending_for_student))
        .route("/{id}", get(get_scheduled_checkout))
        .route("/{id}", delete(cancel_scheduled_checkout))
}
