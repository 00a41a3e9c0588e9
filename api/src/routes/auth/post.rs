use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use db::models::account;
use serde::{Deserialize, Serialize};
use util::state::AppState;
use validator::Validate;

use crate::{
    auth::generate_jwt,
    response::ApiResponse,
    routes::common::{db_error, parse_body},
};

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize, Default)]
pub struct LoginResponse {
    pub id: i64,
    pub email: String,
    pub admin: bool,
    pub token: String,
    pub expires_at: String,
}

/// POST /auth/login
///
/// Exchanges email and password for a bearer token.
///
/// ### Request Body
/// ```json
/// { "email": "erzieher@ogs.example", "password": "secret" }
/// ```
///
/// ### Responses
/// - `200 OK` with `{ id, email, admin, token, expires_at }`
/// - `400 Bad Request` (missing or invalid fields)
/// - `401 Unauthorized` (unknown email, wrong password or inactive account)
/// - `500 Internal Server Error`
pub async fn login(
    State(app_state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> (StatusCode, Json<ApiResponse<LoginResponse>>) {
    let req: LoginRequest = match parse_body(body) {
        Ok(req) => req,
        Err(e) => return e,
    };

    let account = match account::Model::find_by_email(app_state.db(), &req.email).await {
        Ok(Some(account)) => account,
        Ok(None) => return unauthorized("Invalid email or password"),
        Err(e) => return db_error(e),
    };

    if !account.verify_password(&req.password) {
        return unauthorized("Invalid email or password");
    }
    if !account.active {
        return unauthorized("Account is inactive");
    }

    let (token, expires_at) = match generate_jwt(account.id, account.admin) {
        Ok(pair) => pair,
        Err(e) => {
            tracing::error!(account_id = account.id, error = %e, "token encoding failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Could not issue token")),
            );
        }
    };

    tracing::info!(account_id = account.id, "login");
    (
        StatusCode::OK,
        Json(ApiResponse::success(
            LoginResponse {
                id: account.id,
                email: account.email,
                admin: account.admin,
                token,
                expires_at,
            },
            "Login successful",
        )),
    )
}

fn unauthorized(message: &str) -> (StatusCode, Json<ApiResponse<LoginResponse>>) {
    (StatusCode::UNAUTHORIZED, Json(ApiResponse::error(message)))
}
