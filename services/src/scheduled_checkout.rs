//! Deferred checkouts: scheduling, cancelling and the batch processor.
//!
//! The processor claims each due row by moving it from `pending` to
//! `processing` with a conditional update. Rows another run has already
//! claimed are skipped, so overlapping runs never execute the same
//! checkout twice.

use chrono::{DateTime, Utc};
use db::models::{
    active_group,
    scheduled_checkout::{self, ScheduledCheckoutStatus},
    student, visit,
};
use sea_orm::{DatabaseConnection, EntityTrait};
use serde::Serialize;

use crate::authorization::{self, AuthorizationRequest};
use crate::checkout::{CheckoutOutcome, CheckoutService};
use crate::error::{ServiceError, ServiceResult};
use crate::staff::resolve_staff;

#[derive(Debug, Clone, Serialize)]
pub struct ProcessFailure {
    pub scheduled_checkout_id: i64,
    pub student_id: i64,
    pub error: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessStatus {
    /// Nothing failed (this includes "nothing was due").
    Complete,
    /// Some checkouts ran, some failed.
    Partial,
    /// Every attempted checkout failed.
    Failed,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ProcessResult {
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Due rows that another run claimed first.
    pub skipped: usize,
    pub errors: Vec<ProcessFailure>,
    #[serde(skip)]
    pub executed: Vec<CheckoutOutcome>,
}

impl ProcessResult {
    pub fn status(&self) -> ProcessStatus {
        if self.failed == 0 {
            ProcessStatus::Complete
        } else if self.succeeded == 0 {
            ProcessStatus::Failed
        } else {
            ProcessStatus::Partial
        }
    }
}

#[derive(Debug, Clone)]
pub struct CancelOutcome {
    pub scheduled_checkout: scheduled_checkout::Model,
    /// False when the row was already cancelled.
    pub changed: bool,
}

pub struct ScheduledCheckoutService;

impl ScheduledCheckoutService {
    /// Schedules a checkout. The acting staff needs the same authority as
    /// for an immediate checkout.
    pub async fn schedule(
        db: &DatabaseConnection,
        account_id: i64,
        student_id: i64,
        scheduled_for: DateTime<Utc>,
        reason: Option<String>,
        now: DateTime<Utc>,
    ) -> ServiceResult<scheduled_checkout::Model> {
        let staff = resolve_staff(db, account_id).await?;

        let student = student::Entity::find_by_id(student_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Student"))?;

        let room_group = match visit::Model::current_for_student(db, student.id).await? {
            Some(v) => active_group::Entity::find_by_id(v.active_group_id).one(db).await?,
            None => None,
        };

        authorization::authorize(
            db,
            &AuthorizationRequest {
                staff: &staff,
                student: &student,
                room_group: room_group.as_ref(),
            },
        )
        .await?;

        if scheduled_for <= now {
            return Err(ServiceError::Validation(
                "scheduled_for must be in the future".into(),
            ));
        }

        if scheduled_checkout::Model::pending_for_student(db, student.id)
            .await?
            .is_some()
        {
            return Err(ServiceError::Conflict(
                "Student already has a pending scheduled checkout".into(),
            ));
        }

        let created = scheduled_checkout::Model::create(
            db,
            student.id,
            staff.staff_id,
            scheduled_for,
            reason,
        )
        .await?;

        tracing::info!(
            scheduled_checkout_id = created.id,
            student_id = student.id,
            staff_id = staff.staff_id,
            scheduled_for = %scheduled_for,
            "scheduled checkout created"
        );
        Ok(created)
    }

    /// Cancels a pending row. Cancelling a cancelled row changes nothing and
    /// succeeds; rows that ran or are running cannot be cancelled.
    pub async fn cancel(
        db: &DatabaseConnection,
        account_id: i64,
        id: i64,
        now: DateTime<Utc>,
    ) -> ServiceResult<CancelOutcome> {
        let staff = resolve_staff(db, account_id).await?;

        let row = scheduled_checkout::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Scheduled checkout"))?;

        match row.status {
            ScheduledCheckoutStatus::Cancelled => Ok(CancelOutcome {
                scheduled_checkout: row,
                changed: false,
            }),
            ScheduledCheckoutStatus::Pending => {
                let changed = scheduled_checkout::Model::cancel(db, id, staff.staff_id, now).await?;
                let reloaded = scheduled_checkout::Entity::find_by_id(id)
                    .one(db)
                    .await?
                    .ok_or_else(|| ServiceError::not_found("Scheduled checkout"))?;

                if !changed && reloaded.status != ScheduledCheckoutStatus::Cancelled {
                    return Err(ServiceError::Conflict(format!(
                        "Scheduled checkout is already {}",
                        reloaded.status
                    )));
                }

                tracing::info!(scheduled_checkout_id = id, staff_id = staff.staff_id, "scheduled checkout cancelled");
                Ok(CancelOutcome {
                    scheduled_checkout: reloaded,
                    changed,
                })
            }
            other => Err(ServiceError::Conflict(format!(
                "Scheduled checkout is already {}",
                other
            ))),
        }
    }

    /// Executes every due checkout. Each one runs as the staff member who
    /// scheduled it and without an authorization check.
    pub async fn process_due(
        db: &DatabaseConnection,
        now: DateTime<Utc>,
    ) -> ServiceResult<ProcessResult> {
        let due = scheduled_checkout::Model::due(db, now).await?;
        let mut result = ProcessResult::default();

        for row in due {
            if !scheduled_checkout::Model::claim(db, row.id, now).await? {
                result.skipped += 1;
                continue;
            }
            result.attempted += 1;

            match execute(db, &row, now).await {
                Ok(outcome) => {
                    if let Err(e) = scheduled_checkout::Model::mark_executed(db, row.id, now).await {
                        tracing::error!(scheduled_checkout_id = row.id, error = %e, "failed to mark scheduled checkout executed");
                    }
                    result.succeeded += 1;
                    result.executed.push(outcome);
                }
                Err(e) => {
                    let message = e.to_string();
                    tracing::warn!(
                        scheduled_checkout_id = row.id,
                        student_id = row.student_id,
                        error = %message,
                        "scheduled checkout failed"
                    );
                    if let Err(e) =
                        scheduled_checkout::Model::mark_failed(db, row.id, &message, now).await
                    {
                        tracing::error!(scheduled_checkout_id = row.id, error = %e, "failed to mark scheduled checkout failed");
                    }
                    result.failed += 1;
                    result.errors.push(ProcessFailure {
                        scheduled_checkout_id: row.id,
                        student_id: row.student_id,
                        error: message,
                    });
                }
            }
        }

        if result.attempted > 0 || result.skipped > 0 {
            tracing::info!(
                attempted = result.attempted,
                succeeded = result.succeeded,
                failed = result.failed,
                skipped = result.skipped,
                "scheduled checkout run finished"
            );
        }
        Ok(result)
    }
}

async fn execute(
    db: &DatabaseConnection,
    row: &scheduled_checkout::Model,
    now: DateTime<Utc>,
) -> ServiceResult<CheckoutOutcome> {
    let current = visit::Model::current_for_student(db, row.student_id).await?;
    CheckoutService::perform(db, row.scheduled_by, row.student_id, current, now).await
}
