//! Router-level API tests
//!
//! These use a lazily-connected pool, so they exercise routing, parameter
//! parsing, and input validation without touching a real database. Anything
//! that needs rows lives in `loan_query_tests.rs`.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use loanbook_server::app;
use loanbook_server::state::AppState;

fn test_app() -> axum::Router {
    let pool = sqlx::postgres::PgPoolOptions::new()
        .connect_lazy("postgresql://localhost/loanbook_unreachable")
        .expect("lazy pool");
    app(AppState::new(pool))
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("body is JSON")
}

#[tokio::test]
async fn test_root_banner() {
    let response = test_app()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/api/unknown")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_negative_offset_rejected() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/api/loans?offset=-1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_zero_limit_rejected() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/api/loans?limit=0")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unrecognized_status_filter_rejected() {
    // Typed filter enums: a typo is a 400, not a silent empty match
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/api/loans?status=CLOSED")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unrecognized_sort_column_rejected() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/api/loans?sort_by=borrower_email")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

fn loan_body(amount: Value, term: Value) -> Value {
    json!({
        "purpose": "PERSONAL",
        "borrower_name": "Bob Smith",
        "borrower_email": "bob@example.com",
        "amount": amount,
        "interest_rate": 6.0,
        "term": term,
        "status": "PENDING",
        "start_date": "2024-01-15"
    })
}

async fn post_loan(body: Value) -> axum::response::Response {
    test_app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/loans")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

#[tokio::test]
async fn test_create_with_zero_amount_gets_field_error() {
    let response = post_loan(loan_body(json!(0), json!(12))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(body["error"]["field_errors"]["amount"].is_array());
    assert!(body["error"]["field_errors"].get("term").is_none());
}

#[tokio::test]
async fn test_create_with_term_361_gets_field_error() {
    let response = post_loan(loan_body(json!(10000), json!(361))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(body["error"]["field_errors"]["term"].is_array());
}

#[tokio::test]
async fn test_create_with_unknown_purpose_rejected() {
    let mut body = loan_body(json!(10000), json!(12));
    body["purpose"] = json!("VACATION");

    let response = post_loan(body).await;
    // Rejected by the typed enum at deserialization time
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
