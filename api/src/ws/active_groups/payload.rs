use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct VisitCheckedIn {
    pub active_group_id: i64,
    pub student_id: i64,
    pub visit_id: i64,
    pub entry_time: String, // RFC3339
}

#[derive(Debug, Clone, Serialize)]
pub struct VisitCheckedOut {
    pub active_group_id: i64,
    pub student_id: i64,
    pub visit_id: i64,
    pub attendance_id: i64,
    pub exit_time: String, // RFC3339
    /// `true` when the checkout was run by the scheduled-checkout processor.
    pub scheduled: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActiveGroupEnded {
    pub active_group_id: i64,
    pub room_id: i64,
    pub end_time: String, // RFC3339
    pub visits_closed: u64,
    pub timed_out: bool,
}
