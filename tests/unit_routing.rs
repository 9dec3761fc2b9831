use axum::body::Body;
use axum::extract::Request;
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use expense_tracker::routing::{PathPattern, RouteParams, Router};
use http_body_util::BodyExt;
use tower::ServiceExt;

async fn body_string(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn request(method: Method, uri: &str) -> Request {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[test]
fn test_pattern_captures_named_segments() {
    let pattern = PathPattern::compile("/api/users/{user_id}/expenses/{id}").unwrap();

    let params = pattern.captures("/api/users/3/expenses/42").unwrap();

    assert_eq!(params.get("user_id"), Some("3"));
    assert_eq!(params.parse::<i64>("id"), Some(42));
    assert!(pattern.captures("/api/users/3/expenses/42/").is_none());
    assert!(pattern.captures("/api/users/3/expenses").is_none());
}

#[test]
fn test_pattern_literals_are_escaped() {
    let pattern = PathPattern::compile("/api/v1.0/items").unwrap();

    assert!(pattern.captures("/api/v1.0/items").is_some());
    assert!(pattern.captures("/api/v1x0/items").is_none());
}

async fn show(params: RouteParams) -> String {
    format!("expense {}", params.get("id").unwrap_or("?"))
}

#[tokio::test]
async fn test_router_as_tower_service() {
    let mut router = Router::new(());
    router
        .add_route(Method::GET, "/api/expenses/{id}", show)
        .unwrap();
    let service = router.into_service();

    let response = service
        .clone()
        .oneshot(request(Method::GET, "/api/expenses/42"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "expense 42");

    let response = service
        .oneshot(request(Method::GET, "/api/expenses"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_string(response).await,
        r#"{"error":"Route not found"}"#
    );
}

#[tokio::test]
async fn test_middleware_short_circuits_on_prefix() {
    let mut router = Router::new(());
    router
        .add_route(Method::GET, "/open", || async { "open" })
        .unwrap()
        .add_route(Method::GET, "/locked/{id}", show)
        .unwrap()
        .add_middleware("/locked", |_req: &mut Request| -> Option<Response> {
            Some(StatusCode::FORBIDDEN.into_response())
        });

    let open = router.dispatch(request(Method::GET, "/open")).await;
    assert_eq!(open.status(), StatusCode::OK);

    let locked = router.dispatch(request(Method::GET, "/locked/1")).await;
    assert_eq!(locked.status(), StatusCode::FORBIDDEN);
}
