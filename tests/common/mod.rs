use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use expense_tracker::expense_tracker_config::JwtConfig;
use expense_tracker::router::init_router;
use expense_tracker::testing::InMemoryStore;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "test_secret_key_for_testing_purposes";
pub const TEST_PASSWORD: &str = "password123";

pub fn jwt_config() -> JwtConfig {
    JwtConfig {
        secret: TEST_SECRET.to_string(),
        token_ttl_secs: 86_400,
    }
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: axum::Router,
    pub store: Arc<InMemoryStore>,
}

pub fn setup_test_app() -> TestApp {
    let store = Arc::new(InMemoryStore::new());
    let state = store.clone().into_app_state(jwt_config());
    let router = init_router(state).unwrap();

    TestApp { router, store }
}

impl TestApp {
    /// Sends a request and returns the status with the decoded JSON body
    /// (`Value::Null` for an empty body).
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, json)
    }

    /// Registers a user through the API and returns `(user_id, token)`.
    #[allow(dead_code)]
    pub async fn register(&self, email: &str) -> (i64, String) {
        let (status, body) = self
            .send(
                "POST",
                "/api/register",
                None,
                Some(serde_json::json!({
                    "name": "Test User",
                    "email": email,
                    "password": TEST_PASSWORD,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {}", body);

        let id = body["user"]["id"].as_i64().unwrap();
        let token = body["token"].as_str().unwrap().to_string();
        (id, token)
    }
}
