//! # Tearoom
//!
//! Server-side relays for the tearoom storefront.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export PAYMENT_WEBHOOK_SECRET=...
//! export PAYMENT_WEBHOOK_FORWARD_URL=https://admin.tearoom.example/api/payments/webhook
//! export RESEND_API_KEY=re_...
//! export MAIL_FROM="Tearoom <noreply@tearoom.example>"
//! export MAIL_TO=leads@tearoom.example
//!
//! # Run the server
//! tearoom
//! ```

use tea_api::{routes, state::AppState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Before tracing, so RUST_LOG and LOG_FORMAT from .env apply
    dotenvy::dotenv().ok();
    init_tracing();

    let state = AppState::from_env()?;

    let addr = state.config.socket_addr()?;
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!(
        "Payment webhook: configured={}, forwarding={}",
        state.verifier.is_configured(),
        state.forwarder.is_enabled()
    );
    info!(
        "Mail relay: {}",
        state.mail.as_ref().map(|m| m.provider_name()).unwrap_or("disabled")
    );

    let app = routes::create_router(state);

    info!("Tearoom relays starting on http://{}", addr);

    if !is_prod {
        info!("Health: http://{}/health", addr);
        info!("Contact: POST http://{}/api/contact", addr);
        info!("Webhook: POST http://{}/api/webhooks/payment", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// `RUST_LOG` filters; `LOG_FORMAT=json` switches to JSON lines
fn init_tracing() {
    let filter = EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .from_env_lossy();
    let registry = tracing_subscriber::registry().with(filter);
    if wants_json_logs() {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

fn wants_json_logs() -> bool {
    std::env::var("LOG_FORMAT").is_ok_and(|v| v.trim().eq_ignore_ascii_case("json"))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
