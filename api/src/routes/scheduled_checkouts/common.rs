use chrono::{DateTime, Utc};
use db::models::scheduled_checkout;
use serde::{Deserialize, Serialize};
use services::scheduled_checkout::{ProcessFailure, ProcessResult};
use validator::Validate;

#[derive(Debug, Deserialize)]
pub struct ScheduledCheckoutListQuery {
    pub status: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateScheduledCheckoutRequest {
    #[validate(range(min = 1, message = "student_id must be a positive id"))]
    pub student_id: i64,
    pub scheduled_for: DateTime<Utc>,
    #[validate(length(max = 500, message = "reason must be at most 500 characters"))]
    pub reason: Option<String>,
}

#[derive(Debug, Serialize, Default)]
pub struct ScheduledCheckoutResponse {
    pub id: i64,
    pub student_id: i64,
    pub scheduled_by: i64,
    pub scheduled_for: String,
    pub reason: Option<String>,
    pub status: String,
    pub cancelled_at: Option<String>,
    pub cancelled_by: Option<i64>,
    pub executed_at: Option<String>,
    pub error_message: Option<String>,
    pub created_at: String,
}

impl From<scheduled_checkout::Model> for ScheduledCheckoutResponse {
    fn from(m: scheduled_checkout::Model) -> Self {
        Self {
            id: m.id,
            student_id: m.student_id,
            scheduled_by: m.scheduled_by,
            scheduled_for: m.scheduled_for.to_rfc3339(),
            reason: m.reason,
            status: m.status.to_string(),
            cancelled_at: m.cancelled_at.map(|t| t.to_rfc3339()),
            cancelled_by: m.cancelled_by,
            executed_at: m.executed_at.map(|t| t.to_rfc3339()),
            error_message: m.error_message,
            created_at: m.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize, Default)]
pub struct ProcessResponse {
    pub checkouts_executed: usize,
    pub attempted: usize,
    pub failed: usize,
    pub skipped: usize,
    pub errors: Vec<ProcessFailure>,
}

impl From<&ProcessResult> for ProcessResponse {
    fn from(r: &ProcessResult) -> Self {
        Self {
            checkouts_executed: r.succeeded,
            attempted: r.attempted,
            failed: r.failed,
            skipped: r.skipped,
            errors: r.errors.clone(),
        }
    }
}
