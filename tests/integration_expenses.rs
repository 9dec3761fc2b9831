mod common;

use axum::http::StatusCode;
use common::setup_test_app;
use serde_json::{Value, json};

fn expense_payload() -> Value {
    json!({
        "category_id": 1,
        "amount": 42.5,
        "description": "Lunch with the team",
        "expense_date": "2025-01-31"
    })
}

#[tokio::test]
async fn test_expenses_require_token() {
    let app = setup_test_app();

    for (method, uri) in [
        ("GET", "/api/expenses"),
        ("POST", "/api/expenses"),
        ("GET", "/api/expenses/1"),
        ("PUT", "/api/expenses/1"),
        ("DELETE", "/api/expenses/1"),
    ] {
        let (status, body) = app.send(method, uri, None, None).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED, "{} {}", method, uri);
        assert_eq!(body["error"], "Unauthorized");
    }
}

#[tokio::test]
async fn test_create_expense() {
    let app = setup_test_app();
    let (user_id, token) = app.register("exp@example.com").await;

    let (status, body) = app
        .send("POST", "/api/expenses", Some(&token), Some(expense_payload()))
        .await;

    assert_eq!(status, StatusCode::CREATED);
    let data = &body["data"];
    assert_eq!(data["user_id"], user_id);
    assert_eq!(data["category_id"], 1);
    assert_eq!(data["amount"], 42.5);
    assert_eq!(data["description"], "Lunch with the team");
    assert_eq!(data["expense_date"], "2025-01-31");
    assert_eq!(data["category"], json!({"id": 1, "name": "Food & Dining"}));
    assert!(data["created_at"].is_string());
}

#[tokio::test]
async fn test_create_expense_missing_field() {
    let app = setup_test_app();
    let (_, token) = app.register("exp@example.com").await;

    let (status, body) = app
        .send(
            "POST",
            "/api/expenses",
            Some(&token),
            Some(json!({"amount": 10, "description": "Bus", "expense_date": "2025-01-31"})),
        )
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "Category_id is required");
}

#[tokio::test]
async fn test_create_expense_invalid_values() {
    let app = setup_test_app();
    let (_, token) = app.register("exp@example.com").await;

    let mut non_positive = expense_payload();
    non_positive["amount"] = json!(0);
    let mut unknown_category = expense_payload();
    unknown_category["category_id"] = json!(999);
    let mut bad_date = expense_payload();
    bad_date["expense_date"] = json!("31/01/2025");

    for (payload, message) in [
        (non_positive, "Amount must be greater than zero"),
        (unknown_category, "Selected category does not exist"),
        (bad_date, "Invalid request body"),
    ] {
        let (status, body) = app
            .send("POST", "/api/expenses", Some(&token), Some(payload))
            .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], message);
    }
}

#[tokio::test]
async fn test_amount_that_rounds_to_zero_is_rejected() {
    let app = setup_test_app();
    let (_, token) = app.register("exp@example.com").await;

    let mut tiny = expense_payload();
    tiny["amount"] = json!(0.004);
    let (status, body) = app
        .send("POST", "/api/expenses", Some(&token), Some(tiny))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "Amount must be greater than zero");
    assert_eq!(app.store.expense_count(), 0);

    let (_, created) = app
        .send("POST", "/api/expenses", Some(&token), Some(expense_payload()))
        .await;
    let uri = format!("/api/expenses/{}", created["data"]["id"]);

    let (status, body) = app
        .send("PUT", &uri, Some(&token), Some(json!({"amount": 0.004})))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "Amount must be greater than zero");

    let (_, body) = app.send("GET", &uri, Some(&token), None).await;
    assert_eq!(body["data"]["amount"], 42.5);
}

#[tokio::test]
async fn test_padded_description_is_trimmed_before_length_check() {
    let app = setup_test_app();
    let (_, token) = app.register("exp@example.com").await;

    let mut padded = expense_payload();
    padded["description"] = json!(format!("  {}  ", "x".repeat(255)));
    let (status, body) = app
        .send("POST", "/api/expenses", Some(&token), Some(padded))
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["description"], "x".repeat(255));
}

#[tokio::test]
async fn test_get_expense_of_another_user_is_not_found() {
    let app = setup_test_app();
    let (_, owner_token) = app.register("owner@example.com").await;
    let (_, other_token) = app.register("other@example.com").await;

    let (_, created) = app
        .send("POST", "/api/expenses", Some(&owner_token), Some(expense_payload()))
        .await;
    let uri = format!("/api/expenses/{}", created["data"]["id"]);

    let (status, body) = app.send("GET", &uri, Some(&other_token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Expense not found");

    let (status, body) = app
        .send("PUT", &uri, Some(&other_token), Some(json!({"amount": 1})))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Expense not found");

    let (status, _) = app.send("DELETE", &uri, Some(&other_token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app.send("GET", &uri, Some(&owner_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["description"], "Lunch with the team");
}

#[tokio::test]
async fn test_list_only_returns_own_expenses() {
    let app = setup_test_app();
    let (_, ada) = app.register("ada@example.com").await;
    let (_, bob) = app.register("bob@example.com").await;

    app.send("POST", "/api/expenses", Some(&ada), Some(expense_payload()))
        .await;
    app.send("POST", "/api/expenses", Some(&bob), Some(expense_payload()))
        .await;

    let (status, body) = app.send("GET", "/api/expenses", Some(&ada), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_list_filters_and_sorting() {
    let app = setup_test_app();
    let (_, token) = app.register("ada@example.com").await;

    for (category_id, amount, description, date) in [
        (1, 15.0, "Team lunch", "2025-01-10"),
        (1, 9.0, "Coffee beans", "2025-01-12"),
        (2, 40.0, "Train to the lunch meetup", "2025-01-11"),
    ] {
        let (status, _) = app
            .send(
                "POST",
                "/api/expenses",
                Some(&token),
                Some(json!({
                    "category_id": category_id,
                    "amount": amount,
                    "description": description,
                    "expense_date": date
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let descriptions = |body: &Value| -> Vec<String> {
        body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["description"].as_str().unwrap().to_string())
            .collect()
    };

    let (_, body) = app.send("GET", "/api/expenses", Some(&token), None).await;
    assert_eq!(
        descriptions(&body),
        vec!["Coffee beans", "Train to the lunch meetup", "Team lunch"]
    );

    let (_, body) = app
        .send(
            "GET",
            "/api/expenses?search=LUNCH&sort_by=amount&sort_order=asc",
            Some(&token),
            None,
        )
        .await;
    assert_eq!(
        descriptions(&body),
        vec!["Team lunch", "Train to the lunch meetup"]
    );

    let (_, body) = app
        .send("GET", "/api/expenses?category_id=2", Some(&token), None)
        .await;
    assert_eq!(descriptions(&body), vec!["Train to the lunch meetup"]);

    let (status, _) = app
        .send("GET", "/api/expenses?sort_by=price", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_update_expense() {
    let app = setup_test_app();
    let (_, token) = app.register("ada@example.com").await;
    let (_, created) = app
        .send("POST", "/api/expenses", Some(&token), Some(expense_payload()))
        .await;
    let uri = format!("/api/expenses/{}", created["data"]["id"]);

    let (status, body) = app
        .send(
            "PUT",
            &uri,
            Some(&token),
            Some(json!({"amount": 12.75, "category_id": 2})),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["amount"], 12.75);
    assert_eq!(body["data"]["category"]["name"], "Transportation");
    assert_eq!(body["data"]["description"], "Lunch with the team");
}

#[tokio::test]
async fn test_update_with_empty_body() {
    let app = setup_test_app();
    let (_, token) = app.register("ada@example.com").await;

    let (status, body) = app
        .send("PUT", "/api/expenses/999", Some(&token), Some(json!({})))
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "No data provided for update");
}

#[tokio::test]
async fn test_delete_expense() {
    let app = setup_test_app();
    let (_, token) = app.register("ada@example.com").await;
    let (_, created) = app
        .send("POST", "/api/expenses", Some(&token), Some(expense_payload()))
        .await;
    let uri = format!("/api/expenses/{}", created["data"]["id"]);

    let (status, body) = app.send("DELETE", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());
    assert_eq!(app.store.expense_count(), 0);

    let (status, _) = app.send("GET", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    for uri in [uri.as_str(), uri.as_str(), "/api/expenses/987654"] {
        let (status, body) = app.send("DELETE", uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "DELETE {}", uri);
        assert_eq!(body["error"], "Expense not found");
    }
}

#[tokio::test]
async fn test_non_numeric_id_is_not_found() {
    let app = setup_test_app();
    let (_, token) = app.register("ada@example.com").await;

    let (status, body) = app
        .send("GET", "/api/expenses/abc", Some(&token), None)
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Expense not found");
}
