//! Shared helpers for router tests.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use tea_api::{create_router, AppConfig, AppState};
use tea_mail::{MailConfig, MailRelay, ResendMailer};
use tea_webhook::WebhookConfig;
use tower::ServiceExt;

pub const SECRET: &str = "whsec_tearoom_integration";

pub const PAYMENT_BODY: &str =
    r#"{"eventType":"PAYMENT_STATUS_CHANGED","orderId":"ord_1001","status":"DONE","totalAmount":32000}"#;

pub fn router(config: AppConfig, webhook: WebhookConfig, mail: Option<MailRelay>) -> Router {
    let state = AppState::new(config, webhook, mail).expect("failed to build state");
    create_router(state)
}

pub fn webhook_router(webhook: WebhookConfig) -> Router {
    router(AppConfig::default(), webhook, None)
}

/// Mail relay pointed at a mock Resend server
pub fn resend_relay(api_base_url: &str) -> MailRelay {
    let config = MailConfig::new(
        "re_test",
        "Tearoom <noreply@tearoom.example>",
        vec!["leads@tearoom.example".to_string()],
    )
    .with_api_base_url(api_base_url);
    let mailer = ResendMailer::new(config.clone()).expect("failed to build mailer");
    MailRelay::from_config(Arc::new(mailer), &config)
}

pub fn webhook_request(body: &[u8], signature: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/webhooks/payment")
        .header("content-type", "application/json");
    if let Some(sig) = signature {
        builder = builder.header("x-webhook-signature", sig);
    }
    builder.body(Body::from(body.to_vec())).unwrap()
}

pub fn json_request(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Run one request; non-JSON bodies come back as `Value::Null`
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.expect("failed to make request");
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    let body = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);
    (status, body)
}
