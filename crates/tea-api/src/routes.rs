//! # Routes
//!
//! Axum router configuration for the storefront relays.

use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

/// Create the main application router
///
/// Routes:
/// - GET  /health, /api/health - Health check (proxies admin health if configured)
/// - POST /api/contact - Contact form relay
/// - POST /api/franchise - Franchise inquiry relay
/// - POST /api/webhooks/payment - Payment webhook
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.allowed_origins);
    let body_limit = DefaultBodyLimit::max(state.config.max_body_bytes);

    // Browser-facing form relays
    let form_routes = Router::new()
        .route("/contact", post(handlers::submit_contact))
        .route("/franchise", post(handlers::submit_franchise))
        .layer(cors);

    // Webhook routes (no CORS, must accept raw body)
    let webhook_routes = Router::new().route("/payment", post(handlers::payment_webhook));

    let api_routes = Router::new()
        .route("/health", get(handlers::health))
        .merge(form_routes)
        .nest("/webhooks", webhook_routes);

    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api", api_routes)
        .layer(body_limit)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Empty origin list allows any origin
fn cors_layer(origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    if origins.is_empty() {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    cors.allow_origin(AllowOrigin::list(origins))
}
