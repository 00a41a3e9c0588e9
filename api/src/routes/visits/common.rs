use db::models::visit;
use serde::{Deserialize, Serialize};
use services::{checkin::CheckinOutcome, checkout::CheckoutOutcome};
use validator::Validate;

#[derive(Debug, Deserialize)]
pub struct VisitListQuery {
    pub active: Option<bool>,
    pub student_id: Option<i64>,
    pub active_group_id: Option<i64>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CheckinRequest {
    #[validate(range(min = 1, message = "active_group_id must be a positive id"))]
    pub active_group_id: i64,
}

#[derive(Debug, Serialize, Default)]
pub struct VisitResponse {
    pub id: i64,
    pub student_id: i64,
    pub active_group_id: i64,
    pub entry_time: String,
    pub exit_time: Option<String>,
    pub active: bool,
}

impl From<visit::Model> for VisitResponse {
    fn from(v: visit::Model) -> Self {
        Self {
            active: v.is_active(),
            id: v.id,
            student_id: v.student_id,
            active_group_id: v.active_group_id,
            entry_time: v.entry_time.to_rfc3339(),
            exit_time: v.exit_time.map(|t| t.to_rfc3339()),
        }
    }
}

#[derive(Debug, Serialize, Default)]
pub struct CheckinResponse {
    pub student_id: i64,
    pub action: String,
    pub visit_id: i64,
    pub active_group_id: i64,
    pub room_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attendance_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_in_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checked_in_by: Option<i64>,
}

impl From<CheckinOutcome> for CheckinResponse {
    fn from(o: CheckinOutcome) -> Self {
        let attendance = o.attendance.as_ref();
        Self {
            student_id: o.student_id,
            action: "checked_in".into(),
            visit_id: o.visit_id,
            active_group_id: o.active_group_id,
            room_id: o.room_id,
            attendance_status: attendance.map(|a| a.status.as_str().to_string()),
            check_in_time: attendance.and_then(|a| a.check_in_time).map(|t| t.to_rfc3339()),
            checked_in_by: attendance.and_then(|a| a.checked_in_by),
        }
    }
}

#[derive(Debug, Serialize, Default)]
pub struct CheckoutResponse {
    pub student_id: i64,
    pub action: String,
    pub attendance_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attendance_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_in_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_out_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checked_in_by: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checked_out_by: Option<i64>,
}

impl From<&CheckoutOutcome> for CheckoutResponse {
    fn from(o: &CheckoutOutcome) -> Self {
        let attendance = o.attendance.as_ref();
        Self {
            student_id: o.student_id,
            action: "checked_out".into(),
            attendance_id: o.attendance_id,
            attendance_status: attendance.map(|a| a.status.as_str().to_string()),
            check_in_time: attendance.and_then(|a| a.check_in_time).map(|t| t.to_rfc3339()),
            check_out_time: attendance.and_then(|a| a.check_out_time).map(|t| t.to_rfc3339()),
            checked_in_by: attendance.and_then(|a| a.checked_in_by),
            checked_out_by: attendance.and_then(|a| a.checked_out_by),
        }
    }
}
