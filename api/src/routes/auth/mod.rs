//! `/auth` route group. Only login lives here; accounts are provisioned
//! out of band.

pub mod post;

use axum::{Router, routing::post};
use util::state::AppState;

use post::login;

/// - `POST /auth/login` → `login`
pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/login", post(login))
}
