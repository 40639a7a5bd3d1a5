//! # Webhook Forwarding
//!
//! Relays verified payloads to the admin endpoint as `{provider, payload}`.
//!
//! Forwarding is a best-effort side task: one attempt, bounded timeout, and
//! the outcome is logged rather than returned to the payment provider. The
//! provider has already been authenticated at this point and must get its
//! acknowledgment either way, otherwise it keeps redelivering.

use crate::config::WebhookConfig;
use reqwest::Client;
use std::time::Duration;
use tea_core::{RelayError, RelayResult, WebhookEnvelope};
use tracing::{info, instrument, warn};

/// What happened to a forwarding attempt
#[derive(Debug)]
pub enum ForwardOutcome {
    /// No forward URL configured
    Skipped,
    /// Downstream answered 2xx
    Delivered { status: u16 },
    /// Transport error, timeout, or non-2xx answer
    Failed(RelayError),
}

impl ForwardOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, ForwardOutcome::Failed(_))
    }
}

/// HTTP relay for verified webhooks
#[derive(Debug, Clone)]
pub struct Forwarder {
    client: Client,
    url: Option<String>,
    timeout: Duration,
}

impl Forwarder {
    /// Create a forwarder; `url = None` disables forwarding
    pub fn new(url: Option<String>, timeout: Duration) -> RelayResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RelayError::Configuration(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: url.filter(|u| !u.trim().is_empty()),
            timeout,
        })
    }

    pub fn from_config(config: &WebhookConfig) -> RelayResult<Self> {
        Self::new(config.forward_url.clone(), config.forward_timeout)
    }

    pub fn is_enabled(&self) -> bool {
        self.url.is_some()
    }

    /// Forward an envelope and log the outcome. Never fails.
    #[instrument(skip(self, envelope), fields(provider = %envelope.provider))]
    pub async fn forward(&self, envelope: &WebhookEnvelope) -> ForwardOutcome {
        let Some(url) = self.url.as_deref() else {
            return ForwardOutcome::Skipped;
        };

        match self.deliver(url, envelope).await {
            Ok(status) => {
                info!(status, "forwarded webhook");
                ForwardOutcome::Delivered { status }
            }
            Err(e) => {
                warn!(
                    error = %e,
                    error_kind = e.kind(),
                    timeout_ms = self.timeout.as_millis() as u64,
                    "webhook forwarding failed; provider is still acknowledged"
                );
                ForwardOutcome::Failed(e)
            }
        }
    }

    /// Single POST attempt. Non-2xx is an error.
    async fn deliver(&self, url: &str, envelope: &WebhookEnvelope) -> RelayResult<u16> {
        let response = self
            .client
            .post(url)
            .json(envelope)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    RelayError::Forwarding(format!("timed out after {:?}", self.timeout))
                } else {
                    RelayError::Forwarding(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RelayError::Forwarding(format!("HTTP {}: {}", status, body)));
        }

        Ok(status.as_u16())
    }
}
