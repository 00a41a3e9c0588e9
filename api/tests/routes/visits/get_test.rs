#[cfg(test)]
mod tests {
    use crate::helpers::{app::token_for, make_test_app};
    use chrono::Utc;
    use db::models::{account, visit};
    use db::test_utils::{TEST_PASSWORD, seed_live_group, seed_staff_with_account, seed_student};

    #[tokio::test]
    async fn test_current_visit_and_listing() {
        let t = make_test_app().await;
        let db = t.db();
        let group = seed_live_group(db, "Garten").await;
        let (account, _) = seed_staff_with_account(db, "sup@ogs.test", false).await;
        let token = token_for(&account);
        let student = seed_student(db, "Noah", None).await;

        let uri = format!("/api/visits/student/{}/current", student.id);
        let (status, _) = t.send("GET", &uri, Some(&token), None).await;
        assert_eq!(status, 404);

        let v = visit::Model::create(db, student.id, group.id, Utc::now()).await.unwrap();

        let (status, body) = t.send("GET", &uri, Some(&token), None).await;
        assert_eq!(status, 200);
        assert_eq!(body["data"]["id"], v.id);
        assert_eq!(body["data"]["active"], true);

        let (status, body) = t
            .send("GET", &format!("/api/visits?active=true&active_group_id={}", group.id), Some(&token), None)
            .await;
        assert_eq!(status, 200);
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_end_visit_twice_conflicts() {
        let t = make_test_app().await;
        let db = t.db();
        let group = seed_live_group(db, "Garten").await;
        let (account, _) = seed_staff_with_account(db, "sup@ogs.test", false).await;
        let token = token_for(&account);
        let student = seed_student(db, "Noah", None).await;
        let v = visit::Model::create(db, student.id, group.id, Utc::now()).await.unwrap();

        let uri = format!("/api/visits/{}/end", v.id);
        let (status, body) = t.send("POST", &uri, Some(&token), None).await;
        assert_eq!(status, 200);
        assert_eq!(body["data"]["active"], false);

        let (status, _) = t.send("POST", &uri, Some(&token), None).await;
        assert_eq!(status, 409);
    }

    #[tokio::test]
    async fn test_delete_visit_requires_admin() {
        let t = make_test_app().await;
        let db = t.db();
        let group = seed_live_group(db, "Garten").await;
        let (staff_account, _) = seed_staff_with_account(db, "sup@ogs.test", false).await;
        let (admin_account, _) = seed_staff_with_account(db, "admin@ogs.test", true).await;
        let student = seed_student(db, "Noah", None).await;
        let v = visit::Model::create(db, student.id, group.id, Utc::now()).await.unwrap();
        let uri = format!("/api/visits/{}", v.id);

        let (status, _) = t.send("DELETE", &uri, Some(&token_for(&staff_account)), None).await;
        assert_eq!(status, 403);

        let (status, _) = t.send("DELETE", &uri, Some(&token_for(&admin_account)), None).await;
        assert_eq!(status, 200);

        let (status, _) = t.send("GET", &uri, Some(&token_for(&staff_account)), None).await;
        assert_eq!(status, 404);
    }

    #[tokio::test]
    async fn test_end_visit_requires_staff() {
        let t = make_test_app().await;
        let db = t.db();
        let group = seed_live_group(db, "Garten").await;
        let student = seed_student(db, "Lotta", None).await;
        let v = visit::Model::create(db, student.id, group.id, Utc::now()).await.unwrap();
        let outsider = account::Model::create(db, "eltern@ogs.test", TEST_PASSWORD, false)
            .await
            .unwrap();

        let uri = format!("/api/visits/{}/end", v.id);
        let (status, _) = t.send("POST", &uri, Some(&token_for(&outsider)), None).await;

        assert_eq!(status, 403);
        assert!(visit::Model::current_for_student(db, student.id).await.unwrap().is_some());
    }
}
