use db::models::{active_group, group_supervisor};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize)]
pub struct ActiveGroupListQuery {
    pub active: Option<bool>,
    pub room_id: Option<i64>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct StartActiveGroupRequest {
    #[validate(range(min = 1, message = "activity_id must be a positive id"))]
    pub activity_id: i64,
    #[validate(range(min = 1, message = "room_id must be a positive id"))]
    pub room_id: i64,
    #[validate(range(min = 1, message = "timeout_minutes must be at least 1"))]
    pub timeout_minutes: Option<i32>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AddSupervisorRequest {
    #[validate(range(min = 1, message = "staff_id must be a positive id"))]
    pub staff_id: i64,
    #[validate(length(min = 1, max = 50, message = "role must be 1-50 characters"))]
    pub role: Option<String>,
}

#[derive(Debug, Serialize, Default)]
pub struct ActiveGroupResponse {
    pub id: i64,
    pub activity_id: i64,
    pub room_id: i64,
    pub start_time: String,
    pub end_time: Option<String>,
    pub last_activity: String,
    pub timeout_minutes: i32,
    pub active: bool,
}

impl From<active_group::Model> for ActiveGroupResponse {
    fn from(g: active_group::Model) -> Self {
        Self {
            active: g.is_active(),
            id: g.id,
            activity_id: g.activity_id,
            room_id: g.room_id,
            start_time: g.start_time.to_rfc3339(),
            end_time: g.end_time.map(|t| t.to_rfc3339()),
            last_activity: g.last_activity.to_rfc3339(),
            timeout_minutes: g.timeout_minutes,
        }
    }
}

#[derive(Debug, Serialize, Default)]
pub struct EndActiveGroupResponse {
    #[serde(flatten)]
    pub active_group: ActiveGroupResponse,
    pub visits_closed: u64,
    pub supervisors_closed: u64,
}

#[derive(Debug, Serialize, Default)]
pub struct ProcessTimeoutsResponse {
    pub sessions_ended: usize,
    pub active_group_ids: Vec<i64>,
}

#[derive(Debug, Serialize, Default)]
pub struct SupervisorResponse {
    pub id: i64,
    pub staff_id: i64,
    pub active_group_id: i64,
    pub role: String,
    pub start_date: String,
    pub end_date: Option<String>,
}

impl From<group_supervisor::Model> for SupervisorResponse {
    fn from(s: group_supervisor::Model) -> Self {
        Self {
            id: s.id,
            staff_id: s.staff_id,
            active_group_id: s.active_group_id,
            role: s.role,
            start_date: s.start_date.to_rfc3339(),
            end_date: s.end_date.map(|t| t.to_rfc3339()),
        }
    }
}
