use axum::{Json, http::StatusCode};
use serde::Serialize;
use services::ServiceError;

/// Standardized API response wrapper for all outgoing JSON responses.
///
/// ```json
/// {
///   "success": true,
///   "data": { ... },
///   "message": "Student checked in successfully"
/// }
/// ```
///
/// Failures carry `success: false` and the default value of `T` as `data`.
#[derive(Serialize)]
pub struct ApiResponse<T>
where
    T: Serialize,
{
    pub success: bool,
    pub data: T,
    pub message: String,
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    /// Constructs a success response with the given data and message.
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: message.into(),
        }
    }

    /// Constructs an error response with a message and default `data`.
    pub fn error(message: impl Into<String>) -> Self
    where
        T: Default,
    {
        Self {
            success: false,
            data: T::default(),
            message: message.into(),
        }
    }
}

/// HTTP status of a workflow error. One status per variant.
pub fn status_of(err: &ServiceError) -> StatusCode {
    match err {
        ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
        ServiceError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
        ServiceError::Forbidden(_) => StatusCode::FORBIDDEN,
        ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        ServiceError::Conflict(_) => StatusCode::CONFLICT,
        ServiceError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Converts a workflow error into the standard error envelope.
pub fn service_error<T>(err: ServiceError) -> (StatusCode, Json<ApiResponse<T>>)
where
    T: Serialize + Default,
{
    let status = status_of(&err);
    if status.is_server_error() {
        tracing::error!(error = %err, "request failed");
    }
    (status, Json(ApiResponse::error(err.to_string())))
}
