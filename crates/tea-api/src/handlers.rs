//! # Request Handlers
//!
//! Axum request handlers for the storefront relays.
//! Every endpoint answers with `{ok, error?}`.

use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, JsonRejection},
        State,
    },
    http::{HeaderMap, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use tea_core::{ContactInquiry, FranchiseInquiry, Lead, RelayError};
use tracing::{debug, error, info, instrument, warn};

// =============================================================================
// Response Types
// =============================================================================

/// Response body shared by all relay endpoints
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ApiResponse {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiResponse {
    pub fn ok() -> Self {
        Self { ok: true, error: None }
    }

    pub fn error(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: Some(error.into()),
        }
    }
}

/// Error half of every handler result
pub type ApiError = (StatusCode, Json<ApiResponse>);

fn relay_error_to_response(err: RelayError) -> ApiError {
    let status = StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ApiResponse::error(err.to_string())))
}

fn body_rejection_to_response(rejection: BytesRejection) -> ApiError {
    (rejection.status(), Json(ApiResponse::error(rejection.body_text())))
}

fn json_rejection_to_response(rejection: JsonRejection) -> ApiError {
    // Malformed or mistyped form JSON is the caller's fault; size limits keep their 413
    let status = match rejection.status() {
        StatusCode::PAYLOAD_TOO_LARGE => StatusCode::PAYLOAD_TOO_LARGE,
        _ => StatusCode::BAD_REQUEST,
    };
    (status, Json(ApiResponse::error(rejection.body_text())))
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint, optionally proxying the admin backend's health
#[instrument(skip(state))]
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<serde_json::Value>) {
    let mut body = serde_json::json!({
        "status": "healthy",
        "service": "tearoom",
        "version": env!("CARGO_PKG_VERSION")
    });

    if let Some(url) = state.config.admin_health_url.as_deref() {
        let upstream_up = match state.http_client.get(url).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                warn!(error = %e, "Upstream health check failed");
                false
            }
        };

        body["upstream"] = serde_json::json!(if upstream_up { "up" } else { "down" });
        if !upstream_up {
            body["status"] = serde_json::json!("degraded");
            return (StatusCode::BAD_GATEWAY, Json(body));
        }
    }

    (StatusCode::OK, Json(body))
}

/// Handle a payment provider webhook.
///
/// The raw body is verified before anything is parsed. Verified payloads are
/// forwarded best-effort; the provider gets 200 regardless of the forward.
#[instrument(skip(state, headers, body))]
pub async fn payment_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<ApiResponse>, ApiError> {
    let body = body.map_err(|rejection| {
        warn!("Rejected webhook body: {}", rejection.body_text());
        body_rejection_to_response(rejection)
    })?;

    let signature = headers
        .get(state.signature_header.as_str())
        .and_then(|v| v.to_str().ok());

    let verified = state
        .verifier
        .authenticate(&body, signature)
        .map_err(|e| {
            if e.is_client_error() {
                warn!(error_kind = e.kind(), "Webhook rejected: {}", e);
            } else {
                error!(error_kind = e.kind(), "Webhook not processed: {}", e);
            }
            relay_error_to_response(e)
        })?;

    info!(
        event_type = verified.event_type().unwrap_or("unknown"),
        order_id = verified.order_id().unwrap_or("-"),
        "Received payment webhook"
    );

    // Outcome is logged by the forwarder; the provider is acknowledged either way
    let outcome = state.forwarder.forward(&verified.into_envelope()).await;
    debug!(forward_failed = outcome.is_failure(), "Acknowledging payment webhook");

    Ok(Json(ApiResponse::ok()))
}

/// Relay a contact form submission
#[instrument(skip(state, payload))]
pub async fn submit_contact(
    State(state): State<AppState>,
    payload: Result<Json<ContactInquiry>, JsonRejection>,
) -> Result<Json<ApiResponse>, ApiError> {
    let Json(inquiry) = payload.map_err(json_rejection_to_response)?;
    relay_lead(&state, &inquiry).await
}

/// Relay a franchise inquiry
#[instrument(skip(state, payload))]
pub async fn submit_franchise(
    State(state): State<AppState>,
    payload: Result<Json<FranchiseInquiry>, JsonRejection>,
) -> Result<Json<ApiResponse>, ApiError> {
    let Json(inquiry) = payload.map_err(json_rejection_to_response)?;
    relay_lead(&state, &inquiry).await
}

/// Shared lead relay logic
async fn relay_lead<L: Lead>(state: &AppState, lead: &L) -> Result<Json<ApiResponse>, ApiError> {
    let relay = state.mail.as_ref().ok_or_else(|| {
        error!(lead = lead.kind(), "Mail relay not configured");
        relay_error_to_response(RelayError::Configuration(
            "mail relay is not configured".to_string(),
        ))
    })?;

    relay.relay(lead).await.map_err(|e| {
        if e.is_client_error() {
            warn!(lead = lead.kind(), "Invalid {} submission: {}", lead.kind(), e);
        } else {
            error!(lead = lead.kind(), error_kind = e.kind(), "Failed to relay lead: {}", e);
        }
        relay_error_to_response(e)
    })?;

    Ok(Json(ApiResponse::ok()))
}
