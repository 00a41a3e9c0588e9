#[cfg(test)]
mod tests {
    use crate::helpers::{app::token_for, make_test_app};
    use api::ws::active_groups::topics::active_group_topic;
    use chrono::Utc;
    use db::models::group_supervisor;
    use db::test_utils::{seed_live_group, seed_staff_with_account, seed_student};
    use serde_json::{Value, json};
    use tokio::time::{Duration, timeout};

    /// Test Case: checkin, checkout and ending the session are broadcast on the
    /// group's topic in that order
    #[tokio::test]
    async fn test_workflow_events_reach_group_topic() {
        let t = make_test_app().await;
        let db = t.db();
        let group = seed_live_group(db, "Bauraum").await;
        let (account, staff) = seed_staff_with_account(db, "sup@ogs.test", false).await;
        group_supervisor::Model::assign(db, staff.id, group.id, "supervisor", Utc::now())
            .await
            .unwrap();
        let student = seed_student(db, "Mia", None).await;
        let token = token_for(&account);

        let mut rx = t.state.ws().subscribe(&active_group_topic(group.id)).await;

        t.send(
            "POST",
            &format!("/api/visits/student/{}/checkin", student.id),
            Some(&token),
            Some(json!({ "active_group_id": group.id })),
        )
        .await;
        t.send("POST", &format!("/api/visits/student/{}/checkout", student.id), Some(&token), None)
            .await;
        t.send("POST", &format!("/api/active-groups/{}/end", group.id), Some(&token), None)
            .await;

        let mut events = Vec::new();
        for _ in 0..3 {
            let raw = timeout(Duration::from_millis(200), rx.recv()).await.unwrap().unwrap();
            events.push(serde_json::from_str::<Value>(&raw).unwrap());
        }

        assert_eq!(events[0]["event"], "visit.checked_in");
        assert_eq!(events[0]["payload"]["student_id"], student.id);
        assert_eq!(events[1]["event"], "visit.checked_out");
        assert_eq!(events[1]["payload"]["scheduled"], false);
        assert_eq!(events[2]["event"], "active_group.ended");
        assert_eq!(events[2]["payload"]["timed_out"], false);
        for e in &events {
            assert_eq!(e["type"], "event");
            assert_eq!(e["topic"], format!("active_group:{}", group.id));
        }
    }

    #[tokio::test]
    async fn test_ws_route_requires_token() {
        let t = make_test_app().await;
        let (status, _) = t.send("GET", "/ws/active-groups/1", None, None).await;
        assert_eq!(status, 401);
    }
}
