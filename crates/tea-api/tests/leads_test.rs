//! Contact and franchise relay tests.
//!
//! Uses a mock Resend server so the full path from form JSON to the
//! provider request is exercised.

mod common;

use axum::http::{Request, StatusCode};
use common::{json_request, resend_relay, router, send};
use serde_json::json;
use tea_api::AppConfig;
use tea_webhook::WebhookConfig;
use tower::ServiceExt;
use wiremock::{matchers, Mock, MockServer, ResponseTemplate};

fn contact_form() -> serde_json::Value {
    json!({
        "name": "Mina Park",
        "email": "mina@example.com",
        "subject": "Wholesale",
        "message": "Can cafes order your jasmine blend in bulk?"
    })
}

#[tokio::test]
async fn contact_submission_is_mailed() {
    let mock_server = MockServer::start().await;
    Mock::given(matchers::method("POST"))
        .and(matchers::path("/emails"))
        .and(matchers::header("Authorization", "Bearer re_test"))
        .and(matchers::header_exists("Idempotency-Key"))
        .and(matchers::body_partial_json(json!({
            "to": ["leads@tearoom.example"],
            "subject": "[Contact] Wholesale - Mina Park",
            "reply_to": "mina@example.com"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "em_1"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let app = router(
        AppConfig::default(),
        WebhookConfig::new(None),
        Some(resend_relay(&mock_server.uri())),
    );

    let (status, body) = send(app, json_request("/api/contact", &contact_form())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"ok": true}));
}

#[tokio::test]
async fn franchise_submission_is_mailed() {
    let mock_server = MockServer::start().await;
    Mock::given(matchers::method("POST"))
        .and(matchers::path("/emails"))
        .and(matchers::body_partial_json(json!({
            "subject": "[Franchise] Jae Kim (Daegu)"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "em_2"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let app = router(
        AppConfig::default(),
        WebhookConfig::new(None),
        Some(resend_relay(&mock_server.uri())),
    );

    let form = json!({
        "name": "Jae Kim",
        "phone": "010-1234-5678",
        "email": "jae@example.com",
        "region": "Daegu",
        "budget": "100M KRW"
    });
    let (status, body) = send(app, json_request("/api/franchise", &form)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"ok": true}));
}

#[tokio::test]
async fn invalid_email_is_rejected_without_sending() {
    let mock_server = MockServer::start().await;
    Mock::given(matchers::any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let app = router(
        AppConfig::default(),
        WebhookConfig::new(None),
        Some(resend_relay(&mock_server.uri())),
    );

    let mut form = contact_form();
    form["email"] = json!("mina-at-example");
    let (status, body) = send(app, json_request("/api/contact", &form)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["ok"], json!(false));
    assert!(body["error"].as_str().unwrap().contains("email"));
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let app = router(AppConfig::default(), WebhookConfig::new(None), None);

    let request = Request::builder()
        .method("POST")
        .uri("/api/contact")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{\"name\":"))
        .unwrap();
    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["ok"], json!(false));
}

#[tokio::test]
async fn missing_required_field_is_a_bad_request() {
    let app = router(AppConfig::default(), WebhookConfig::new(None), None);

    let (status, body) = send(
        app,
        json_request("/api/franchise", &json!({"name": "Jae", "email": "jae@example.com"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["ok"], json!(false));
}

#[tokio::test]
async fn unconfigured_mail_is_a_server_error() {
    let app = router(AppConfig::default(), WebhookConfig::new(None), None);

    let (status, body) = send(app, json_request("/api/contact", &contact_form())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["ok"], json!(false));
}

#[tokio::test]
async fn provider_failure_is_a_bad_gateway() {
    let mock_server = MockServer::start().await;
    Mock::given(matchers::method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "statusCode": 500,
            "name": "internal_server_error",
            "message": "Something went wrong"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let app = router(
        AppConfig::default(),
        WebhookConfig::new(None),
        Some(resend_relay(&mock_server.uri())),
    );

    let (status, body) = send(app, json_request("/api/contact", &contact_form())).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["ok"], json!(false));
}

#[tokio::test]
async fn cors_preflight_allows_configured_origin() {
    let config = AppConfig {
        allowed_origins: vec!["https://tearoom.example".to_string()],
        ..AppConfig::default()
    };
    let app = router(config, WebhookConfig::new(None), None);

    let request = Request::builder()
        .method("OPTIONS")
        .uri("/api/contact")
        .header("origin", "https://tearoom.example")
        .header("access-control-request-method", "POST")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.expect("failed to make request");

    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("https://tearoom.example")
    );
}
