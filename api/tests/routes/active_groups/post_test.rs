#[cfg(test)]
mod tests {
    use crate::helpers::{app::token_for, make_test_app};
    use chrono::{Duration, Utc};
    use db::models::{account, active_group, group_supervisor, visit};
    use db::test_utils::{
        TEST_PASSWORD, seed_activity, seed_live_group, seed_room, seed_staff,
        seed_staff_with_account, seed_student,
    };
    use sea_orm::{ActiveModelTrait, EntityTrait, IntoActiveModel, Set};
    use serde_json::json;

    #[tokio::test]
    async fn test_start_session_makes_caller_supervisor() {
        let t = make_test_app().await;
        let db = t.db();
        let room = seed_room(db, "Bauraum").await;
        let activity = seed_activity(db, "Lego").await;
        let (account, staff) = seed_staff_with_account(db, "sup@ogs.test", false).await;
        let token = token_for(&account);

        let body = json!({ "activity_id": activity.id, "room_id": room.id, "timeout_minutes": 45 });
        let (status, resp) = t.send("POST", "/api/active-groups", Some(&token), Some(body.clone())).await;

        assert_eq!(status, 201);
        assert_eq!(resp["data"]["room_id"], room.id);
        assert_eq!(resp["data"]["timeout_minutes"], 45);
        assert_eq!(resp["data"]["active"], true);
        let id = resp["data"]["id"].as_i64().unwrap();

        let (status, resp) = t
            .send("GET", &format!("/api/active-groups/{id}/supervisors"), Some(&token), None)
            .await;
        assert_eq!(status, 200);
        assert_eq!(resp["data"][0]["staff_id"], staff.id);

        let (status, _) = t.send("POST", "/api/active-groups", Some(&token), Some(body)).await;
        assert_eq!(status, 409);
    }

    #[tokio::test]
    async fn test_end_session_closes_visits_and_rejects_second_end() {
        let t = make_test_app().await;
        let db = t.db();
        let group = seed_live_group(db, "Turnhalle").await;
        let (account, staff) = seed_staff_with_account(db, "sup@ogs.test", false).await;
        group_supervisor::Model::assign(db, staff.id, group.id, "supervisor", Utc::now())
            .await
            .unwrap();
        let student = seed_student(db, "Ben", None).await;
        visit::Model::create(db, student.id, group.id, Utc::now()).await.unwrap();
        let token = token_for(&account);
        let uri = format!("/api/active-groups/{}/end", group.id);

        let (status, resp) = t.send("POST", &uri, Some(&token), None).await;
        assert_eq!(status, 200);
        assert_eq!(resp["data"]["active"], false);
        assert_eq!(resp["data"]["visits_closed"], 1);
        assert_eq!(resp["data"]["supervisors_closed"], 1);
        assert!(visit::Model::current_for_student(db, student.id).await.unwrap().is_none());

        let (status, _) = t.send("POST", &uri, Some(&token), None).await;
        assert_eq!(status, 409);
    }

    #[tokio::test]
    async fn test_add_supervisor_twice_conflicts() {
        let t = make_test_app().await;
        let db = t.db();
        let group = seed_live_group(db, "Musikraum").await;
        let (account, _) = seed_staff_with_account(db, "sup@ogs.test", false).await;
        let helper = seed_staff(db, "helfer@ogs.test").await;
        let token = token_for(&account);
        let uri = format!("/api/active-groups/{}/supervisors", group.id);

        let (status, resp) = t
            .send("POST", &uri, Some(&token), Some(json!({ "staff_id": helper.id, "role": "assistant" })))
            .await;
        assert_eq!(status, 201);
        assert_eq!(resp["data"]["role"], "assistant");
        let supervisor_id = resp["data"]["id"].as_i64().unwrap();

        let (status, _) = t
            .send("POST", &uri, Some(&token), Some(json!({ "staff_id": helper.id })))
            .await;
        assert_eq!(status, 409);

        let (status, resp) = t
            .send("GET", &format!("/api/supervisors/staff/{}", helper.id), Some(&token), None)
            .await;
        assert_eq!(status, 200);
        assert_eq!(resp["data"].as_array().unwrap().len(), 1);

        let (status, _) = t
            .send("POST", &format!("/api/supervisors/{supervisor_id}/end"), Some(&token), None)
            .await;
        assert_eq!(status, 200);
        let (status, _) = t
            .send("POST", &format!("/api/supervisors/{supervisor_id}/end"), Some(&token), None)
            .await;
        assert_eq!(status, 409);
    }

    #[tokio::test]
    async fn test_process_timeouts_is_admin_only_and_ends_idle_groups() {
        let t = make_test_app().await;
        let db = t.db();
        let idle = seed_live_group(db, "Leseecke").await;
        let busy = seed_live_group(db, "Garten").await;
        let mut am = idle.clone().into_active_model();
        am.last_activity = Set(Utc::now() - Duration::minutes(idle.timeout_minutes as i64 + 1));
        am.update(db).await.unwrap();

        let (staff_account, _) = seed_staff_with_account(db, "sup@ogs.test", false).await;
        let (admin_account, _) = seed_staff_with_account(db, "admin@ogs.test", true).await;

        let (status, _) = t
            .send("POST", "/api/active-groups/process-timeouts", Some(&token_for(&staff_account)), None)
            .await;
        assert_eq!(status, 403);

        let (status, resp) = t
            .send("POST", "/api/active-groups/process-timeouts", Some(&token_for(&admin_account)), None)
            .await;
        assert_eq!(status, 200);
        assert_eq!(resp["data"]["sessions_ended"], 1);
        assert_eq!(resp["data"]["active_group_ids"][0], idle.id);

        let idle = active_group::Entity::find_by_id(idle.id).one(db).await.unwrap().unwrap();
        let busy = active_group::Entity::find_by_id(busy.id).one(db).await.unwrap().unwrap();
        assert!(idle.end_time.is_some());
        assert!(busy.end_time.is_none());
    }

    #[tokio::test]
    async fn test_supervisor_changes_require_staff() {
        let t = make_test_app().await;
        let db = t.db();
        let group = seed_live_group(db, "Werkraum").await;
        let helper = seed_staff(db, "helfer@ogs.test").await;
        let sup = group_supervisor::Model::assign(db, helper.id, group.id, "supervisor", Utc::now())
            .await
            .unwrap();
        let outsider = account::Model::create(db, "eltern@ogs.test", TEST_PASSWORD, false)
            .await
            .unwrap();
        let token = token_for(&outsider);

        let uri = format!("/api/active-groups/{}/supervisors", group.id);
        let (status, _) = t
            .send("POST", &uri, Some(&token), Some(json!({ "staff_id": helper.id, "role": "assistant" })))
            .await;
        assert_eq!(status, 403);

        let (status, _) = t
            .send("POST", &format!("/api/supervisors/{}/end", sup.id), Some(&token), None)
            .await;
        assert_eq!(status, 403);

        let open = group_supervisor::Model::find_open_for_group(db, group.id).await.unwrap();
        assert_eq!(open.len(), 1);
    }
}
