//! `/attendance` route group.
//!
//! - `GET /attendance/student/{student_id}/status` → `get_attendance_status`

pub mod get;

use axum::{Router, routing::get};
use util::state::AppState;

use get::get_attendance_status;

pub fn attendance_routes() -> Router<AppState> {
    Router::new().route("/student/{student_id}/status", get(get_attendance_status))
}
