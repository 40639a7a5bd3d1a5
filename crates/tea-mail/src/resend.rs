//! # Resend Mail Provider
//!
//! `MailProvider` implementation over the Resend HTTP API.

use crate::config::MailConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tea_core::{MailMessage, MailProvider, RelayError, RelayResult};
use tracing::{debug, error, instrument};

/// Resend transactional mail provider
pub struct ResendMailer {
    config: MailConfig,
    client: Client,
}

impl ResendMailer {
    /// Create a new Resend mailer
    pub fn new(config: MailConfig) -> RelayResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| RelayError::Configuration(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }
}

#[async_trait]
impl MailProvider for ResendMailer {
    #[instrument(skip(self, message), fields(subject = %message.subject, recipients = message.to.len()))]
    async fn send(&self, message: &MailMessage, idempotency_key: &str) -> RelayResult<String> {
        let request = ResendEmailRequest {
            from: &message.from,
            to: &message.to,
            subject: &message.subject,
            text: &message.text,
            reply_to: message.reply_to.as_deref(),
        };

        let url = format!("{}/emails", self.config.api_base_url);
        debug!("Sending mail via Resend: {}", url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.config.auth_header())
            .header("Idempotency-Key", idempotency_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| RelayError::NetworkError(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RelayError::NetworkError(e.to_string()))?;

        if !status.is_success() {
            error!("Resend API error: status={}, body={}", status, body);

            if let Ok(error_response) = serde_json::from_str::<ResendErrorResponse>(&body) {
                return Err(RelayError::ProviderError {
                    provider: "resend".to_string(),
                    message: error_response.message,
                });
            }

            return Err(RelayError::ProviderError {
                provider: "resend".to_string(),
                message: format!("HTTP {}: {}", status, body),
            });
        }

        let sent: ResendEmailResponse = serde_json::from_str(&body).map_err(|e| {
            RelayError::Serialization(format!("Failed to parse Resend response: {}", e))
        })?;

        Ok(sent.id)
    }

    fn provider_name(&self) -> &'static str {
        "resend"
    }
}

// =============================================================================
// Resend API Types
// =============================================================================

#[derive(Debug, Serialize)]
struct ResendEmailRequest<'a> {
    from: &'a str,
    to: &'a [String],
    subject: &'a str,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct ResendEmailResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ResendErrorResponse {
    message: String,
}
