#[cfg(test)]
mod tests {
    use crate::helpers::{app::token_for, make_test_app};
    use db::test_utils::{seed_live_group, seed_staff_with_account};
    use serde_json::json;

    #[tokio::test]
    async fn test_combined_group_lifecycle() {
        let t = make_test_app().await;
        let db = t.db();
        let (account, _) = seed_staff_with_account(db, "sup@ogs.test", false).await;
        let room_a = seed_live_group(db, "Raum 1").await;
        let room_b = seed_live_group(db, "Raum 2").await;
        let token = token_for(&account);

        let (status, resp) = t
            .send("POST", "/api/combined-groups", Some(&token), Some(json!({ "name": "Spätgruppe" })))
            .await;
        assert_eq!(status, 201);
        let id = resp["data"]["id"].as_i64().unwrap();

        let (status, _) = t
            .send("POST", "/api/combined-groups", Some(&token), Some(json!({ "name": "Spätgruppe" })))
            .await;
        assert_eq!(status, 409);

        let groups_uri = format!("/api/combined-groups/{id}/groups");
        for g in [&room_a, &room_b] {
            let (status, _) = t
                .send("POST", &groups_uri, Some(&token), Some(json!({ "active_group_id": g.id })))
                .await;
            assert_eq!(status, 201);
        }
        let (status, _) = t
            .send("POST", &groups_uri, Some(&token), Some(json!({ "active_group_id": room_a.id })))
            .await;
        assert_eq!(status, 409);

        let (status, resp) = t
            .send("GET", &format!("/api/combined-groups/{id}"), Some(&token), None)
            .await;
        assert_eq!(status, 200);
        assert_eq!(resp["data"]["active_group_ids"].as_array().unwrap().len(), 2);

        let (status, resp) = t
            .send("PUT", &format!("/api/combined-groups/{id}"), Some(&token), Some(json!({ "is_active": false })))
            .await;
        assert_eq!(status, 200);
        assert_eq!(resp["data"]["is_active"], false);

        let (status, _) = t
            .send("DELETE", &format!("{groups_uri}/{}", room_b.id), Some(&token), None)
            .await;
        assert_eq!(status, 200);
        let (status, _) = t
            .send("DELETE", &format!("{groups_uri}/{}", room_b.id), Some(&token), None)
            .await;
        assert_eq!(status, 404);

        let (status, _) = t
            .send("DELETE", &format!("/api/combined-groups/{id}"), Some(&token), None)
            .await;
        assert_eq!(status, 200);
        let (status, _) = t
            .send("GET", &format!("/api/combined-groups/{id}"), Some(&token), None)
            .await;
        assert_eq!(status, 404);
    }

    #[tokio::test]
    async fn test_edit_requires_a_field_and_existing_group() {
        let t = make_test_app().await;
        let (account, _) = seed_staff_with_account(t.db(), "sup@ogs.test", false).await;
        let token = token_for(&account);

        let (status, _) = t
            .send("PUT", "/api/combined-groups/1", Some(&token), Some(json!({})))
            .await;
        assert_eq!(status, 400);

        let (status, _) = t
            .send("PUT", "/api/combined-groups/4242", Some(&token), Some(json!({ "name": "Neu" })))
            .await;
        assert_eq!(status, 404);
    }
}
