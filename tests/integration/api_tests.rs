//! API integration tests

use std::sync::{Arc, Mutex};

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;

use lending_server::{api, services::clock::Clock, AppConfig, AppState};

/// Clock the tests can move forward
#[derive(Clone)]
struct TestClock(Arc<Mutex<DateTime<Utc>>>);

impl TestClock {
    fn new() -> Self {
        Self(Arc::new(Mutex::new(
            Utc.with_ymd_and_hms(2024, 9, 1, 9, 0, 0).unwrap(),
        )))
    }

    fn advance(&self, by: Duration) {
        *self.0.lock().unwrap() += by;
    }
}

impl Clock for TestClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }
}

fn app_with_clock(clock: TestClock) -> Router {
    api::create_router(AppState::new(AppConfig::default(), Arc::new(clock)))
}

fn app() -> Router {
    app_with_clock(TestClock::new())
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut request = Request::builder()
        .method(method)
        .uri(format!("/api/v1{}", uri))
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        request = request.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let body = match body {
        Some(value) => Body::from(serde_json::to_vec(&value).unwrap()),
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .expect("Failed to send request");

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Failed to parse response")
    };
    (status, value)
}

/// Register a user and return its token
async fn register(app: &Router, username: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/users",
        None,
        Some(json!({ "username": username, "password": "password" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["access_token"].as_str().expect("No token in response").to_string()
}

async fn create_item(app: &Router, token: &str, item: Value) {
    let (status, _) = send(app, Method::POST, "/items", Some(token), Some(item)).await;
    assert_eq!(status, StatusCode::CREATED);
}

fn book(key: &str, title: &str, author: &str, total: u32) -> Value {
    json!({
        "key": key,
        "title": title,
        "author": author,
        "published_year": 1949,
        "genres": ["Fiction"],
        "total": total
    })
}

#[tokio::test]
async fn test_health_check() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_register_and_login() {
    let app = app();
    register(&app, "alice").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/login",
        None,
        Some(json!({ "username": "alice", "password": "password" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["access_token"].is_string());
    assert_eq!(body["token_type"], "bearer");

    let (status, _) = send(
        &app,
        Method::POST,
        "/login",
        None,
        Some(json!({ "username": "alice", "password": "wrong" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(
        &app,
        Method::POST,
        "/users",
        None,
        Some(json!({ "username": "alice", "password": "password" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Duplicate");
}

#[tokio::test]
async fn test_borrowing_requires_token() {
    let app = app();
    let (status, _) = send(&app, Method::POST, "/loans/A-001", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, Method::POST, "/loans/A-001", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_last_copy_moves_between_borrowers() {
    let app = app();
    let alice = register(&app, "alice").await;
    let bob = register(&app, "bob").await;
    create_item(&app, &alice, book("A-001", "1984", "George Orwell", 1)).await;

    let (status, loan) = send(&app, Method::POST, "/loans/A-001", Some(&alice), None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(loan["borrower"], "alice");

    let (_, item) = send(&app, Method::GET, "/items/A-001", None, None).await;
    assert_eq!(item["available"], 0);

    let (status, body) = send(&app, Method::POST, "/loans/A-001", Some(&bob), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "ItemNotAvailable");

    let (status, body) = send(&app, Method::POST, "/loans/A-001/return", Some(&alice), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "returned");

    let (_, item) = send(&app, Method::GET, "/items/A-001", None, None).await;
    assert_eq!(item["available"], 1);

    let (status, _) = send(&app, Method::POST, "/loans/A-001", Some(&bob), None).await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, stats) = send(&app, Method::GET, "/stats", None, None).await;
    assert_eq!(stats["active_loans"], 1);
    assert_eq!(stats["copies_available"], 0);
}

#[tokio::test]
async fn test_fourth_loan_is_refused() {
    let app = app();
    let alice = register(&app, "alice").await;
    for key in ["A", "B", "C", "D"] {
        create_item(&app, &alice, book(key, &format!("Book {}", key), "Someone", 1)).await;
    }

    for key in ["A", "B", "C"] {
        let (status, _) = send(&app, Method::POST, &format!("/loans/{}", key), Some(&alice), None).await;
        assert_eq!(status, StatusCode::CREATED);
    }
    let (status, body) = send(&app, Method::POST, "/loans/D", Some(&alice), None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "MaxBorrowsReached");

    let (_, loans) = send(&app, Method::GET, "/loans", Some(&alice), None).await;
    assert_eq!(loans.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_overdue_return_is_refused() {
    let clock = TestClock::new();
    let app = app_with_clock(clock.clone());
    let alice = register(&app, "alice").await;
    create_item(&app, &alice, book("A-001", "1984", "George Orwell", 1)).await;

    send(&app, Method::POST, "/loans/A-001", Some(&alice), None).await;
    clock.advance(Duration::days(15));

    let (status, body) = send(&app, Method::POST, "/loans/A-001/return", Some(&alice), None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "OverdueReturn");

    let (_, loans) = send(&app, Method::GET, "/loans", Some(&alice), None).await;
    assert_eq!(loans[0]["is_overdue"], true);

    let (_, overdue) = send(&app, Method::GET, "/loans/overdue", Some(&alice), None).await;
    assert_eq!(overdue.as_array().unwrap().len(), 1);

    let (_, item) = send(&app, Method::GET, "/items/A-001", None, None).await;
    assert_eq!(item["available"], 0);
}

#[tokio::test]
async fn test_search_by_author() {
    let app = app();
    let alice = register(&app, "alice").await;
    create_item(&app, &alice, book("A-001", "1984", "George Orwell", 1)).await;
    create_item(&app, &alice, book("B-001", "Brave New World", "Aldous Huxley", 1)).await;

    let (status, items) = send(&app, Method::GET, "/items/search?author=Orwell", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let items = items.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["key"], "A-001");

    let (status, _) = send(&app, Method::GET, "/items/search?title=Dune", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, items) = send(&app, Method::GET, "/items?title=Dune", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(items.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_item_lifecycle() {
    let app = app();
    let alice = register(&app, "alice").await;
    create_item(&app, &alice, book("A-001", "1984", "George Orwell", 1)).await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/items",
        Some(&alice),
        Some(book("A-001", "1984", "George Orwell", 1)),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, item) = send(
        &app,
        Method::PUT,
        "/items/A-001",
        Some(&alice),
        Some(book("A-001", "Nineteen Eighty-Four", "George Orwell", 3)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(item["available"], 3);

    let mut invalid = book("A-001", "1984", "George Orwell", 1);
    invalid["available"] = json!(2);
    let (status, _) = send(&app, Method::PUT, "/items/A-001", Some(&alice), Some(invalid)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::DELETE, "/items/A-001", Some(&alice), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, Method::GET, "/items/A-001", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_recommendations_follow_history() {
    let app = app();
    let alice = register(&app, "alice").await;
    create_item(&app, &alice, book("A-001", "1984", "George Orwell", 1)).await;
    create_item(&app, &alice, book("A-002", "Animal Farm", "George Orwell", 1)).await;
    create_item(&app, &alice, book("B-001", "Brave New World", "Aldous Huxley", 1)).await;

    let (status, items) = send(&app, Method::GET, "/recommendations?by=authors", Some(&alice), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(items.as_array().unwrap().is_empty());

    send(&app, Method::POST, "/loans/A-001", Some(&alice), None).await;
    send(&app, Method::POST, "/loans/A-001/return", Some(&alice), None).await;

    let (_, history) = send(&app, Method::GET, "/loans/history", Some(&alice), None).await;
    assert_eq!(history.as_array().unwrap().len(), 1);

    let (_, items) = send(&app, Method::GET, "/recommendations?by=authors", Some(&alice), None).await;
    let keys: Vec<&str> = items
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["key"].as_str().unwrap())
        .collect();
    assert_eq!(keys, vec!["A-002"]);

    let (_, items) = send(&app, Method::GET, "/recommendations?by=genres", Some(&alice), None).await;
    assert_eq!(items.as_array().unwrap().len(), 2);
}
