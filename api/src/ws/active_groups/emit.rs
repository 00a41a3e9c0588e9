use chrono::{DateTime, Utc};
use serde::Serialize;
use services::{checkout::CheckoutOutcome, session::EndedSession};
use util::ws::WebSocketManager;

use super::{payload, topics::active_group_topic};
use crate::ws::core::{envelope, event::Event};

#[derive(Debug, Serialize)]
pub struct VisitCheckedInEvent {
    #[serde(flatten)]
    pub payload: payload::VisitCheckedIn,
}
impl Event for VisitCheckedInEvent {
    const NAME: &'static str = "visit.checked_in";
    fn topic_path(&self) -> String {
        active_group_topic(self.payload.active_group_id)
    }
}

#[derive(Debug, Serialize)]
pub struct VisitCheckedOutEvent {
    #[serde(flatten)]
    pub payload: payload::VisitCheckedOut,
}
impl Event for VisitCheckedOutEvent {
    const NAME: &'static str = "visit.checked_out";
    fn topic_path(&self) -> String {
        active_group_topic(self.payload.active_group_id)
    }
}

#[derive(Debug, Serialize)]
pub struct ActiveGroupEndedEvent {
    #[serde(flatten)]
    pub payload: payload::ActiveGroupEnded,
}
impl Event for ActiveGroupEndedEvent {
    const NAME: &'static str = "active_group.ended";
    fn topic_path(&self) -> String {
        active_group_topic(self.payload.active_group_id)
    }
}

/* ---------- one-liner helpers ---------- */

pub async fn visit_checked_in(ws: &WebSocketManager, p: payload::VisitCheckedIn) {
    envelope::emit(ws, &VisitCheckedInEvent { payload: p }).await;
}

pub async fn visit_checked_out(ws: &WebSocketManager, p: payload::VisitCheckedOut) {
    envelope::emit(ws, &VisitCheckedOutEvent { payload: p }).await;
}

pub async fn active_group_ended(ws: &WebSocketManager, p: payload::ActiveGroupEnded) {
    envelope::emit(ws, &ActiveGroupEndedEvent { payload: p }).await;
}

/* ---------- workflow outcomes ---------- */

/// Announces a checkout on the topic of the visit it closed. Checkouts
/// without a closed visit have no room to announce to.
pub async fn checkout_outcome(
    ws: &WebSocketManager,
    outcome: &CheckoutOutcome,
    now: DateTime<Utc>,
    scheduled: bool,
) {
    let (Some(visit_id), Some(active_group_id), true) =
        (outcome.visit_id, outcome.active_group_id, outcome.visit_ended)
    else {
        return;
    };
    visit_checked_out(
        ws,
        payload::VisitCheckedOut {
            active_group_id,
            student_id: outcome.student_id,
            visit_id,
            attendance_id: outcome.attendance_id,
            exit_time: now.to_rfc3339(),
            scheduled,
        },
    )
    .await;
}

pub async fn session_ended(ws: &WebSocketManager, ended: &EndedSession, timed_out: bool) {
    let group = &ended.active_group;
    active_group_ended(
        ws,
        payload::ActiveGroupEnded {
            active_group_id: group.id,
            room_id: group.room_id,
            end_time: group.end_time.unwrap_or(group.last_activity).to_rfc3339(),
            visits_closed: ended.visits_closed,
            timed_out,
        },
    )
    .await;
}
