//! Helpers shared by the route handlers.

use axum::{Json, extract::rejection::JsonRejection, http::StatusCode};
use common::format_validation_errors;
use sea_orm::{DatabaseConnection, DbErr};
use serde::Serialize;
use services::{
    ServiceError,
    staff::{StaffIdentity, resolve_staff},
};
use validator::Validate;

use crate::response::{ApiResponse, service_error};

pub type HandlerError<T> = (StatusCode, Json<ApiResponse<T>>);

/// Unwraps and validates a JSON body. A missing or malformed body and a
/// body that fails validation are all `400`.
pub fn parse_body<B, T>(body: Result<Json<B>, JsonRejection>) -> Result<B, HandlerError<T>>
where
    B: Validate,
    T: Serialize + Default,
{
    let Json(body) = body.map_err(|rejection| {
        bad_request(format!("Invalid request body: {}", rejection.body_text()))
    })?;

    body.validate()
        .map_err(|errors| bad_request(format_validation_errors(&errors)))?;

    Ok(body)
}

/// Rejects non-positive path ids.
pub fn require_id<T>(id: i64, what: &str) -> Result<i64, HandlerError<T>>
where
    T: Serialize + Default,
{
    if id <= 0 {
        return Err(bad_request(format!("Invalid {what} id")));
    }
    Ok(id)
}

/// Resolves the caller's staff record. Accounts that are not staff get `403`.
pub async fn require_staff<T>(
    db: &DatabaseConnection,
    account_id: i64,
) -> Result<StaffIdentity, HandlerError<T>>
where
    T: Serialize + Default,
{
    resolve_staff(db, account_id).await.map_err(service_error)
}

pub fn bad_request<T>(message: impl Into<String>) -> HandlerError<T>
where
    T: Serialize + Default,
{
    (StatusCode::BAD_REQUEST, Json(ApiResponse::error(message)))
}

pub fn not_found<T>(what: &str) -> HandlerError<T>
where
    T: Serialize + Default,
{
    service_error(ServiceError::not_found(what))
}

pub fn db_error<T>(err: DbErr) -> HandlerError<T>
where
    T: Serialize + Default,
{
    service_error(ServiceError::Database(err))
}
