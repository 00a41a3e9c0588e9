#[cfg(test)]
mod tests {
    use crate::helpers::{app::token_for, make_test_app};
    use db::test_utils::{seed_live_group, seed_staff_with_account};

    #[tokio::test]
    async fn test_active_group_socket_requires_token() {
        let t = make_test_app().await;
        let group = seed_live_group(t.db(), "Bauraum").await;

        let (status, _) = t
            .send("GET", &format!("/ws/active-groups/{}", group.id), None, None)
            .await;
        assert_eq!(status, 401);
    }

    /// Test Case: an authenticated plain GET reaches the upgrade extractor,
    /// which rejects it for lacking the handshake headers
    #[tokio::test]
    async fn test_active_group_socket_rejects_plain_get() {
        let t = make_test_app().await;
        let db = t.db();
        let group = seed_live_group(db, "Bauraum").await;
        let (account, _) = seed_staff_with_account(db, "sup@ogs.test", false).await;

        let (status, _) = t
            .send("GET", &format!("/ws/active-groups/{}", group.id), Some(&token_for(&account)), None)
            .await;
        assert_ne!(status, 401);
        assert!((400..500).contains(&status), "got {status}");
    }
}
