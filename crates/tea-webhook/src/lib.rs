//! # tea-webhook
//!
//! Payment webhook handling for tearoom-rs.
//!
//! 1. **WebhookVerifier** - authenticates a raw body against a hex
//!    HMAC-SHA256 signature header before anything else happens
//! 2. **Forwarder** - relays the verified payload to an admin endpoint,
//!    best effort, one attempt, bounded timeout
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tea_webhook::{Forwarder, WebhookConfig, WebhookVerifier};
//!
//! let config = WebhookConfig::new(Some(secret)).with_forward_url(admin_url);
//! let verifier = WebhookVerifier::from_config(&config);
//! let forwarder = Forwarder::from_config(&config)?;
//!
//! // In your webhook endpoint:
//! let verified = verifier.authenticate(&body, signature)?;
//! forwarder.forward(&verified.into_envelope()).await;
//! ```

pub mod config;
pub mod forward;
pub mod verifier;

// Re-exports
pub use config::WebhookConfig;
pub use forward::{ForwardOutcome, Forwarder};
pub use verifier::{sign, verify, WebhookVerifier};
