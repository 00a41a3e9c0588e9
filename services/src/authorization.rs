//! Decides whether a staff member may check a student in or out.
//!
//! Rules run in a fixed order and each answers `Allow`, `Deny` or
//! `Inconclusive`. The first conclusive answer wins; if every rule is
//! inconclusive the action is denied.

use db::models::{active_group, group_supervisor, group_teacher, student};
use sea_orm::{ConnectionTrait, DbErr};
use serde::Serialize;

use crate::error::{ServiceError, ServiceResult};
use crate::staff::StaffIdentity;

/// The ways a staff member can gain authority over a student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Supervises the live group the student is (or will be) in.
    RoomSupervisor,
    /// Teaches the student's home education group.
    HomeGroupTeacher,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow(Capability),
    Deny,
    Inconclusive,
}

pub const RULE_ORDER: [Capability; 2] = [Capability::RoomSupervisor, Capability::HomeGroupTeacher];

/// What a decision is about.
///
/// `room_group` is the group the room-supervisor rule inspects: the target
/// group for a checkin, the group of the current visit otherwise.
pub struct AuthorizationRequest<'a> {
    pub staff: &'a StaffIdentity,
    pub student: &'a student::Model,
    pub room_group: Option<&'a active_group::Model>,
}

/// First conclusive decision in order, `Deny` if there is none.
pub fn first_conclusive<I>(decisions: I) -> Decision
where
    I: IntoIterator<Item = Decision>,
{
    decisions
        .into_iter()
        .find(|d| *d != Decision::Inconclusive)
        .unwrap_or(Decision::Deny)
}

async fn evaluate<C: ConnectionTrait>(
    db: &C,
    rule: Capability,
    req: &AuthorizationRequest<'_>,
) -> Result<Decision, DbErr> {
    match rule {
        Capability::RoomSupervisor => {
            let Some(group) = req.room_group.filter(|g| g.is_active()) else {
                return Ok(Decision::Inconclusive);
            };
            let supervisors = group_supervisor::Model::find_open_for_group(db, group.id).await?;
            if supervisors.iter().any(|s| s.staff_id == req.staff.staff_id) {
                Ok(Decision::Allow(Capability::RoomSupervisor))
            } else {
                Ok(Decision::Inconclusive)
            }
        }
        Capability::HomeGroupTeacher => {
            let (Some(teacher_id), Some(group_id)) = (req.staff.teacher_id, req.student.group_id)
            else {
                return Ok(Decision::Inconclusive);
            };
            if group_teacher::Model::teaches_group(db, teacher_id, group_id).await? {
                Ok(Decision::Allow(Capability::HomeGroupTeacher))
            } else {
                Ok(Decision::Inconclusive)
            }
        }
    }
}

/// Runs the rule chain. Later rules are not evaluated once one is conclusive.
pub async fn decide<C: ConnectionTrait>(
    db: &C,
    req: &AuthorizationRequest<'_>,
) -> Result<Decision, DbErr> {
    let mut decisions = Vec::with_capacity(RULE_ORDER.len());
    for rule in RULE_ORDER {
        let decision = evaluate(db, rule, req).await?;
        decisions.push(decision);
        if decision != Decision::Inconclusive {
            break;
        }
    }
    Ok(first_conclusive(decisions))
}

/// `Forbidden` unless the chain allows the action.
pub async fn authorize<C: ConnectionTrait>(
    db: &C,
    req: &AuthorizationRequest<'_>,
) -> ServiceResult<Capability> {
    match decide(db, req).await? {
        Decision::Allow(cap) => {
            tracing::debug!(
                staff_id = req.staff.staff_id,
                student_id = req.student.id,
                capability = ?cap,
                "authorized"
            );
            Ok(cap)
        }
        Decision::Deny | Decision::Inconclusive => {
            tracing::info!(
                staff_id = req.staff.staff_id,
                student_id = req.student.id,
                "denied: neither room supervisor nor home-group teacher"
            );
            Err(ServiceError::Forbidden(
                "Not authorized: must supervise the student's room or teach the student's group"
                    .into(),
            ))
        }
    }
}
