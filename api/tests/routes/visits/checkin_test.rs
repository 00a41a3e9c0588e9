#[cfg(test)]
mod tests {
    use crate::helpers::{app::token_for, make_test_app};
    use chrono::Utc;
    use db::models::{active_group, group_supervisor, visit};
    use db::test_utils::{seed_live_group, seed_staff_with_account, seed_student};
    use serde_json::json;

    /// Test Case: student without attendance today is checked in by the room supervisor
    #[tokio::test]
    async fn test_checkin_success_as_supervisor() {
        let t = make_test_app().await;
        let db = t.db();
        let group = seed_live_group(db, "Bauraum").await;
        let (account, staff) = seed_staff_with_account(db, "sup@ogs.test", false).await;
        group_supervisor::Model::assign(db, staff.id, group.id, "supervisor", Utc::now())
            .await
            .unwrap();
        let student = seed_student(db, "Mia", None).await;

        let uri = format!("/api/visits/student/{}/checkin", student.id);
        let (status, body) = t
            .send("POST", &uri, Some(&token_for(&account)), Some(json!({ "active_group_id": group.id })))
            .await;

        assert_eq!(status, 200);
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Student checked in successfully");
        let data = &body["data"];
        assert_eq!(data["student_id"], student.id);
        assert_eq!(data["action"], "checked_in");
        assert_eq!(data["active_group_id"], group.id);
        assert_eq!(data["room_id"], group.room_id);
        assert_eq!(data["attendance_status"], "checked_in");
        assert_eq!(data["checked_in_by"], staff.id);
        assert!(data["check_in_time"].is_string());

        let open = visit::Model::current_for_student(db, student.id).await.unwrap().unwrap();
        assert_eq!(data["visit_id"], open.id);
        assert!(open.exit_time.is_none());
    }

    /// Test Case: checkin into an ended group is a conflict
    #[tokio::test]
    async fn test_checkin_into_ended_group_conflicts() {
        let t = make_test_app().await;
        let db = t.db();
        let group = seed_live_group(db, "Turnhalle").await;
        let (account, staff) = seed_staff_with_account(db, "sup@ogs.test", false).await;
        group_supervisor::Model::assign(db, staff.id, group.id, "supervisor", Utc::now())
            .await
            .unwrap();
        active_group::Model::mark_ended(db, group.id, Utc::now()).await.unwrap();
        let student = seed_student(db, "Ben", None).await;

        let uri = format!("/api/visits/student/{}/checkin", student.id);
        let (status, body) = t
            .send("POST", &uri, Some(&token_for(&account)), Some(json!({ "active_group_id": group.id })))
            .await;

        assert_eq!(status, 409);
        assert_eq!(body["success"], false);
        assert!(visit::Model::current_for_student(db, student.id).await.unwrap().is_none());
    }

    /// Test Case: missing body, bad ids and missing token
    #[tokio::test]
    async fn test_checkin_rejects_bad_requests() {
        let t = make_test_app().await;
        let db = t.db();
        let (account, _) = seed_staff_with_account(db, "sup@ogs.test", false).await;
        let token = token_for(&account);

        let (status, _) = t.send("POST", "/api/visits/student/1/checkin", Some(&token), None).await;
        assert_eq!(status, 400);

        let (status, body) = t
            .send("POST", "/api/visits/student/1/checkin", Some(&token), Some(json!({ "active_group_id": 0 })))
            .await;
        assert_eq!(status, 400);
        assert_eq!(body["message"], "active_group_id must be a positive id");

        let (status, _) = t
            .send("POST", "/api/visits/student/0/checkin", Some(&token), Some(json!({ "active_group_id": 1 })))
            .await;
        assert_eq!(status, 400);

        let (status, _) = t
            .send("POST", "/api/visits/student/1/checkin", None, Some(json!({ "active_group_id": 1 })))
            .await;
        assert_eq!(status, 401);
    }

    /// Test Case: unknown student and unknown group are 404
    #[tokio::test]
    async fn test_checkin_unknown_targets_not_found() {
        let t = make_test_app().await;
        let db = t.db();
        let group = seed_live_group(db, "Leseecke").await;
        let (account, _) = seed_staff_with_account(db, "sup@ogs.test", false).await;
        let student = seed_student(db, "Lea", None).await;
        let token = token_for(&account);

        let (status, _) = t
            .send("POST", "/api/visits/student/9999/checkin", Some(&token), Some(json!({ "active_group_id": group.id })))
            .await;
        assert_eq!(status, 404);

        let uri = format!("/api/visits/student/{}/checkin", student.id);
        let (status, _) = t
            .send("POST", &uri, Some(&token), Some(json!({ "active_group_id": 9999 })))
            .await;
        assert_eq!(status, 404);
    }

    /// Test Case: an account without a staff record is forbidden
    #[tokio::test]
    async fn test_checkin_by_non_staff_forbidden() {
        let t = make_test_app().await;
        let db = t.db();
        let group = seed_live_group(db, "Werkraum").await;
        let account = db::models::account::Model::create(db, "parent@ogs.test", "pw", false)
            .await
            .unwrap();
        let student = seed_student(db, "Tom", None).await;

        let uri = format!("/api/visits/student/{}/checkin", student.id);
        let (status, body) = t
            .send("POST", &uri, Some(&token_for(&account)), Some(json!({ "active_group_id": group.id })))
            .await;

        assert_eq!(status, 403);
        assert_eq!(body["message"], "Account is not a staff member");
    }

    /// Test Case: staff who neither supervises the group nor teaches the student
    #[tokio::test]
    async fn test_checkin_without_authority_forbidden() {
        let t = make_test_app().await;
        let db = t.db();
        let group = seed_live_group(db, "Musikraum").await;
        let (account, _) = seed_staff_with_account(db, "other@ogs.test", false).await;
        let student = seed_student(db, "Ida", None).await;

        let uri = format!("/api/visits/student/{}/checkin", student.id);
        let (status, _) = t
            .send("POST", &uri, Some(&token_for(&account)), Some(json!({ "active_group_id": group.id })))
            .await;

        assert_eq!(status, 403);
    }

    /// Test Case: a student with an open visit elsewhere cannot be checked in again
    #[tokio::test]
    async fn test_checkin_with_open_visit_conflicts() {
        let t = make_test_app().await;
        let db = t.db();
        let first = seed_live_group(db, "Raum A").await;
        let second = seed_live_group(db, "Raum B").await;
        let (account, staff) = seed_staff_with_account(db, "sup@ogs.test", false).await;
        for g in [&first, &second] {
            group_supervisor::Model::assign(db, staff.id, g.id, "supervisor", Utc::now())
                .await
                .unwrap();
        }
        let student = seed_student(db, "Ole", None).await;
        let token = token_for(&account);
        let uri = format!("/api/visits/student/{}/checkin", student.id);

        let (status, _) = t.send("POST", &uri, Some(&token), Some(json!({ "active_group_id": first.id }))).await;
        assert_eq!(status, 200);

        let (status, _) = t.send("POST", &uri, Some(&token), Some(json!({ "active_group_id": second.id }))).await;
        assert_eq!(status, 409);
    }
}
