use db::models::{person, staff, teacher};
use sea_orm::ConnectionTrait;

use crate::error::{ServiceError, ServiceResult};

/// The acting staff member behind an authenticated account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffIdentity {
    pub account_id: i64,
    pub person_id: i64,
    pub staff_id: i64,
    /// Set when the staff member is also a teacher.
    pub teacher_id: Option<i64>,
}

/// Follows account → person → staff. Any missing link is `Forbidden`.
pub async fn resolve_staff<C: ConnectionTrait>(
    db: &C,
    account_id: i64,
) -> ServiceResult<StaffIdentity> {
    let person = person::Model::find_by_account(db, account_id)
        .await?
        .ok_or_else(|| not_staff(account_id, "no person"))?;

    let staff = staff::Model::find_by_person(db, person.id)
        .await?
        .ok_or_else(|| not_staff(account_id, "no staff record"))?;

    let teacher_id = teacher::Model::find_by_staff(db, staff.id)
        .await?
        .map(|t| t.id);

    Ok(StaffIdentity {
        account_id,
        person_id: person.id,
        staff_id: staff.id,
        teacher_id,
    })
}

fn not_staff(account_id: i64, reason: &str) -> ServiceError {
    tracing::debug!(account_id, reason, "staff resolution failed");
    ServiceError::Forbidden("Account is not a staff member".into())
}
