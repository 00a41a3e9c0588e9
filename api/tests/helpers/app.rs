use api::{auth::generate_jwt, routes::routes, ws::ws_routes};
use axum::{
    Router,
    body::Body,
    http::{Request, Response},
};
use db::models::account;
use sea_orm::DatabaseConnection;
use serde_json::Value;
use std::convert::Infallible;
use tower::ServiceExt;
use tower::util::BoxCloneService;
use util::{config::AppConfig, state::AppState, ws::WebSocketManager};

pub const TEST_JWT_SECRET: &str = "integration-test-secret";

pub type TestService = BoxCloneService<Request<Body>, Response<Body>, Infallible>;

pub struct TestApp {
    pub app: TestService,
    pub state: AppState,
}

impl TestApp {
    pub fn db(&self) -> &DatabaseConnection {
        self.state.db()
    }

    /// Sends `method uri` with an optional bearer token and JSON body and
    /// returns the status and the decoded envelope.
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (u16, Value) {
        let mut req = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }
        let req = match body {
            Some(body) => req
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => req.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(req).await.unwrap();
        let status = response.status().as_u16();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }
}

/// Router over a fresh, migrated in-memory database. Request logging is
/// left out since it needs the peer address of a real connection.
pub async fn make_test_app() -> TestApp {
    AppConfig::set_jwt_secret(TEST_JWT_SECRET);

    let db = db::test_utils::setup_test_db().await;
    let state = AppState::new(db, WebSocketManager::new());

    let router = Router::new()
        .nest("/api", routes(state.clone()))
        .nest("/ws", ws_routes(state.clone()));

    TestApp {
        app: router.into_service().boxed_clone(),
        state,
    }
}

pub fn token_for(account: &account::Model) -> String {
    generate_jwt(account.id, account.admin).unwrap().0
}
