//! Integration tests for the HTTP surface: every status code and
//! machine-readable error code in the contract, driven through the router.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use feedback::{app, config::Config, database::Database, state::AppState};

const ADMIN_TOKEN: &str = "test_admin_token";

fn test_app() -> Router {
    let state = AppState {
        config: Config {
            port: 0,
            database_path: ":memory:".into(),
            admin_token: ADMIN_TOKEN.to_string(),
        },
        database: Database::open_in_memory().unwrap(),
    };

    app(Arc::new(state))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, body)
}

fn submit(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/feedback")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn list(query: &str, token: Option<&str>) -> Request<Body> {
    let uri = if query.is_empty() {
        "/feedback".to_string()
    } else {
        format!("/feedback?{query}")
    };

    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    builder.body(Body::empty()).unwrap()
}

fn delete(body: Value, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("DELETE")
        .uri("/feedback")
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    builder.body(Body::from(body.to_string())).unwrap()
}

#[tokio::test]
async fn submit_list_delete_roundtrip() {
    let app = test_app();

    let (status, body) = send(&app, submit(json!({"feedbackText": "Great service!"}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["id"], json!(1));

    let (status, body) = send(&app, list("", Some(ADMIN_TOKEN))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], json!(1));
    assert_eq!(body["limit"], json!(50));
    assert_eq!(body["offset"], json!(0));
    assert_eq!(body["data"][0]["feedbackText"], json!("Great service!"));
    assert!(body["data"][0]["createdAt"].is_string());

    let (status, body) = send(&app, delete(json!({"id": 1}), Some(ADMIN_TOKEN))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["id"], json!(1));

    let (status, body) = send(&app, list("", Some(ADMIN_TOKEN))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], json!(0));
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn submit_is_trimmed_before_storing() {
    let app = test_app();

    let (status, _) = send(&app, submit(json!({"feedbackText": "  padded  "}))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = send(&app, list("", Some(ADMIN_TOKEN))).await;
    assert_eq!(body["data"][0]["feedbackText"], json!("padded"));
}

#[tokio::test]
async fn submit_validation_codes() {
    let app = test_app();

    let cases = [
        (json!({}), "MISSING_FEEDBACK_TEXT"),
        (json!({"feedbackText": 42}), "INVALID_FEEDBACK_TEXT_TYPE"),
        (json!({"feedbackText": ""}), "EMPTY_FEEDBACK_TEXT"),
        (json!({"feedbackText": "   "}), "EMPTY_FEEDBACK_TEXT"),
        (
            json!({"feedbackText": "x".repeat(5001)}),
            "FEEDBACK_TEXT_TOO_LONG",
        ),
    ];

    for (payload, code) in cases {
        let (status, body) = send(&app, submit(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "code={code}");
        assert_eq!(body["code"], json!(code));
        assert!(body["error"].is_string());
    }

    // nothing slipped into the store
    let (_, body) = send(&app, list("", Some(ADMIN_TOKEN))).await;
    assert_eq!(body["total"], json!(0));
}

#[tokio::test]
async fn missing_and_wrong_credentials_stay_distinct() {
    let app = test_app();

    let (status, body) = send(&app, list("", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], json!("MISSING_AUTH"));

    let (status, body) = send(&app, list("", Some("wrong_token"))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], json!("FORBIDDEN"));

    let (status, body) = send(&app, delete(json!({"id": 1}), None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], json!("MISSING_AUTH"));

    let (status, body) = send(&app, delete(json!({"id": 1}), Some("wrong_token"))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], json!("FORBIDDEN"));
}

#[tokio::test]
async fn list_parameter_validation_codes() {
    let app = test_app();

    let cases = [
        ("limit=0", "INVALID_LIMIT"),
        ("limit=-1", "INVALID_LIMIT"),
        ("limit=abc", "INVALID_LIMIT"),
        ("offset=-1", "INVALID_OFFSET"),
        ("offset=abc", "INVALID_OFFSET"),
        ("sort=newest", "INVALID_SORT"),
    ];

    for (query, code) in cases {
        let (status, body) = send(&app, list(query, Some(ADMIN_TOKEN))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "query={query}");
        assert_eq!(body["code"], json!(code));
    }
}

#[tokio::test]
async fn oversized_limit_is_clamped() {
    let app = test_app();

    send(&app, submit(json!({"feedbackText": "one entry"}))).await;

    let (status, body) = send(&app, list("limit=200", Some(ADMIN_TOKEN))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["limit"], json!(100));
    assert_eq!(body["total"], json!(1));
}

#[tokio::test]
async fn sort_orders_by_creation_time() {
    let app = test_app();

    for text in ["first", "second", "third"] {
        let (status, _) = send(&app, submit(json!({"feedbackText": text}))).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, body) = send(&app, list("sort=desc", Some(ADMIN_TOKEN))).await;
    assert_eq!(body["data"][0]["feedbackText"], json!("third"));
    assert_eq!(body["data"][2]["feedbackText"], json!("first"));

    // case-insensitive literal
    let (status, body) = send(&app, list("sort=ASC", Some(ADMIN_TOKEN))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["feedbackText"], json!("first"));
    assert_eq!(body["data"][2]["feedbackText"], json!("third"));
}

#[tokio::test]
async fn search_filters_before_pagination() {
    let app = test_app();

    for text in ["apple pie", "banana bread", "apple tart"] {
        send(&app, submit(json!({"feedbackText": text}))).await;
    }

    let (_, body) = send(&app, list("search=apple", Some(ADMIN_TOKEN))).await;
    assert_eq!(body["total"], json!(2));
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    // total stays the full match count even when the page is smaller
    let (_, body) = send(&app, list("search=apple&limit=1", Some(ADMIN_TOKEN))).await;
    assert_eq!(body["total"], json!(2));
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn delete_of_missing_id_reports_success() {
    let app = test_app();

    let (status, body) = send(&app, delete(json!({"id": 999}), Some(ADMIN_TOKEN))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["id"], json!(999));
}

#[tokio::test]
async fn delete_id_validation() {
    let app = test_app();

    for payload in [json!({}), json!({"id": "7"}), json!({"id": 1.5})] {
        let (status, body) = send(&app, delete(payload, Some(ADMIN_TOKEN))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], json!("INVALID_FEEDBACK_ID"));
    }
}
