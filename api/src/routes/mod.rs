//! HTTP route entry point for `/api/...`.
//!
//! Route groups:
//! - `/health` → health check (public)
//! - `/auth` → login (public)
//! - `/active-groups` → live sessions, their visits and supervisors
//! - `/supervisors` → ending and listing supervisions
//! - `/visits` → visits and the checkin/checkout workflow
//! - `/attendance` → daily attendance status
//! - `/scheduled-checkouts` → scheduled checkouts and their processor
//! - `/combined-groups` → combined groups and their member groups
//!
//! Everything except `/health` and `/auth` requires a bearer token. Whether
//! the caller is staff, and what they may do to a given student, is decided
//! per request by the workflow services.

use axum::{Router, middleware::from_fn};
use util::state::AppState;

use crate::auth::guards::allow_authenticated;
use crate::routes::{
    active_groups::active_group_routes, attendance::attendance_routes, auth::auth_routes,
    combined_groups::combined_group_routes, health::health_routes,
    scheduled_checkouts::scheduled_checkout_routes, supervisors::supervisor_routes,
    visits::visit_routes,
};

pub mod active_groups;
pub mod attendance;
pub mod auth;
pub mod combined_groups;
pub mod common;
pub mod health;
pub mod scheduled_checkouts;
pub mod supervisors;
pub mod visits;

/// Builds the application router for all HTTP endpoints with `app_state` applied.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .nest("/auth", auth_routes())
        .nest(
            "/active-groups",
            active_group_routes().route_layer(from_fn(allow_authenticated)),
        )
        .nest(
            "/supervisors",
            supervisor_routes().route_layer(from_fn(allow_authenticated)),
        )
        .nest(
            "/visits",
            visit_routes().route_layer(from_fn(allow_authenticated)),
        )
        .nest(
            "/attendance",
            attendance_routes().route_layer(from_fn(allow_authenticated)),
        )
        .nest(
            "/scheduled-checkouts",
            scheduled_checkout_routes().route_layer(from_fn(allow_authenticated)),
        )
        .nest(
            "/combined-groups",
            combined_group_routes().route_layer(from_fn(allow_authenticated)),
        )
        .with_state(app_state)
}
