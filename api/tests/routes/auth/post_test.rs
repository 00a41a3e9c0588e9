#[cfg(test)]
mod tests {
    use crate::helpers::{app::TEST_JWT_SECRET, make_test_app};
    use api::auth::Claims;
    use db::models::account;
    use db::test_utils::{TEST_PASSWORD, seed_staff_with_account};
    use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
    use serde_json::json;

    #[tokio::test]
    async fn test_login_success_returns_valid_token() {
        let t = make_test_app().await;
        let (acc, _) = seed_staff_with_account(t.db(), "erzieher@ogs.test", true).await;

        let (status, body) = t
            .send(
                "POST",
                "/api/auth/login",
                None,
                Some(json!({ "email": "erzieher@ogs.test", "password": TEST_PASSWORD })),
            )
            .await;

        assert_eq!(status, 200);
        assert_eq!(body["message"], "Login successful");
        assert_eq!(body["data"]["id"], acc.id);
        assert_eq!(body["data"]["admin"], true);

        let token = body["data"]["token"].as_str().unwrap();
        let claims = decode::<Claims>(
            token,
            &DecodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .unwrap()
        .claims;
        assert_eq!(claims.sub, acc.id);
        assert!(claims.admin);
    }

    #[tokio::test]
    async fn test_login_wrong_password_unauthorized() {
        let t = make_test_app().await;
        seed_staff_with_account(t.db(), "erzieher@ogs.test", false).await;

        let (status, body) = t
            .send(
                "POST",
                "/api/auth/login",
                None,
                Some(json!({ "email": "erzieher@ogs.test", "password": "nope" })),
            )
            .await;

        assert_eq!(status, 401);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_login_inactive_account_unauthorized() {
        let t = make_test_app().await;
        let (acc, _) = seed_staff_with_account(t.db(), "alt@ogs.test", false).await;
        account::Model::set_active(t.db(), acc.id, false).await.unwrap();

        let (status, body) = t
            .send(
                "POST",
                "/api/auth/login",
                None,
                Some(json!({ "email": "alt@ogs.test", "password": TEST_PASSWORD })),
            )
            .await;

        assert_eq!(status, 401);
        assert_eq!(body["message"], "Account is inactive");
    }

    #[tokio::test]
    async fn test_login_invalid_email_is_bad_request() {
        let t = make_test_app().await;

        let (status, body) = t
            .send(
                "POST",
                "/api/auth/login",
                None,
                Some(json!({ "email": "not-an-email", "password": "x" })),
            )
            .await;

        assert_eq!(status, 400);
        assert_eq!(body["message"], "Invalid email format");
    }
}
