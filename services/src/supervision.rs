use chrono::{DateTime, Utc};
use db::models::{active_group, group_supervisor, staff, visit};
use sea_orm::{DatabaseConnection, EntityTrait};

use crate::error::{ServiceError, ServiceResult};

pub struct SupervisionService;

impl SupervisionService {
    pub async fn add_supervisor(
        db: &DatabaseConnection,
        active_group_id: i64,
        staff_id: i64,
        role: Option<&str>,
        now: DateTime<Utc>,
    ) -> ServiceResult<group_supervisor::Model> {
        let group = active_group::Entity::find_by_id(active_group_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Active group"))?;
        staff::Entity::find_by_id(staff_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Staff"))?;

        if !group.is_active() {
            return Err(ServiceError::Conflict("Active group has already ended".into()));
        }
        if group_supervisor::Model::is_active_supervisor(db, staff_id, group.id, now).await? {
            return Err(ServiceError::Conflict("Staff already supervises this group".into()));
        }

        let role = role.unwrap_or(group_supervisor::DEFAULT_ROLE);
        let sup = group_supervisor::Model::assign(db, staff_id, group.id, role, now).await?;
        tracing::info!(active_group_id = group.id, staff_id, role, "supervisor added");
        Ok(sup)
    }

    pub async fn end_supervision(
        db: &DatabaseConnection,
        supervisor_id: i64,
        now: DateTime<Utc>,
    ) -> ServiceResult<group_supervisor::Model> {
        group_supervisor::Entity::find_by_id(supervisor_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Supervisor"))?;

        if !group_supervisor::Model::end(db, supervisor_id, now).await? {
            return Err(ServiceError::Conflict("Supervision has already ended".into()));
        }

        group_supervisor::Entity::find_by_id(supervisor_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Supervisor"))
    }

    /// Supervisor-initiated close of a visit. Daily attendance is untouched.
    pub async fn end_visit(
        db: &DatabaseConnection,
        visit_id: i64,
        now: DateTime<Utc>,
    ) -> ServiceResult<visit::Model> {
        visit::Entity::find_by_id(visit_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Visit"))?;

        if !visit::Model::end(db, visit_id, now).await? {
            return Err(ServiceError::Conflict("Visit has already ended".into()));
        }
        tracing::info!(visit_id, "visit ended");

        visit::Entity::find_by_id(visit_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Visit"))
    }
}
