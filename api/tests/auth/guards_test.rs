#[cfg(test)]
mod tests {
    use crate::helpers::{app::TEST_JWT_SECRET, make_test_app};
    use api::auth::Claims;
    use chrono::{Duration, Utc};
    use jsonwebtoken::{EncodingKey, Header, encode};

    fn token_with(secret: &str, exp: chrono::DateTime<Utc>) -> String {
        let claims = Claims {
            sub: 1,
            exp: exp.timestamp() as usize,
            admin: false,
        };
        encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes())).unwrap()
    }

    #[tokio::test]
    async fn test_missing_token_is_unauthorized() {
        let t = make_test_app().await;
        let (status, body) = t.send("GET", "/api/active-groups", None, None).await;

        assert_eq!(status, 401);
        assert_eq!(body["message"], "Authentication required");
    }

    #[tokio::test]
    async fn test_token_signed_with_other_secret_is_unauthorized() {
        let t = make_test_app().await;
        let token = token_with("someone-else", Utc::now() + Duration::hours(1));

        let (status, _) = t.send("GET", "/api/active-groups", Some(&token), None).await;
        assert_eq!(status, 401);
    }

    #[tokio::test]
    async fn test_expired_token_is_unauthorized() {
        let t = make_test_app().await;
        let token = token_with(TEST_JWT_SECRET, Utc::now() - Duration::hours(1));

        let (status, _) = t.send("GET", "/api/visits", Some(&token), None).await;
        assert_eq!(status, 401);
    }

    #[tokio::test]
    async fn test_valid_token_passes_the_guard() {
        let t = make_test_app().await;
        let token = token_with(TEST_JWT_SECRET, Utc::now() + Duration::hours(1));

        let (status, body) = t.send("GET", "/api/combined-groups", Some(&token), None).await;
        assert_eq!(status, 200);
        assert!(body["data"].as_array().unwrap().is_empty());
    }
}
