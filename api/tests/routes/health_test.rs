#[cfg(test)]
mod tests {
    use crate::helpers::make_test_app;

    #[tokio::test]
    async fn health_is_public() {
        let t = make_test_app().await;
        let (status, json) = t.send("GET", "/api/health", None, None).await;

        assert_eq!(status, 200);
        assert_eq!(json["success"], true);
        assert_eq!(json["data"], "OK");
    }
}
