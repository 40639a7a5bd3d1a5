//! # Webhook Configuration
//!
//! Explicit configuration for the payment webhook endpoint.
//! `from_env` exists for the binary; everything else takes a value.

use std::env;
use std::time::Duration;

/// Default provider label placed in forwarded envelopes
pub const DEFAULT_PROVIDER: &str = "payment";

/// Default header carrying the hex HMAC
pub const DEFAULT_SIGNATURE_HEADER: &str = "x-webhook-signature";

/// Forwarding must never hold up the acknowledgment for long
pub const DEFAULT_FORWARD_TIMEOUT: Duration = Duration::from_secs(5);

/// Payment webhook configuration
#[derive(Clone)]
pub struct WebhookConfig {
    /// Provider label (appears in logs and the forwarded envelope)
    pub provider: String,

    /// Header carrying the signature (lowercase)
    pub signature_header: String,

    /// Shared HMAC secret. `None` means the endpoint is not configured.
    pub secret: Option<String>,

    /// Admin endpoint verified payloads are relayed to
    pub forward_url: Option<String>,

    /// Timeout for the forwarding call
    pub forward_timeout: Duration,
}

impl WebhookConfig {
    /// Load configuration from environment variables.
    ///
    /// All variables are optional:
    /// - `PAYMENT_PROVIDER`
    /// - `PAYMENT_SIGNATURE_HEADER`
    /// - `PAYMENT_WEBHOOK_SECRET`
    /// - `PAYMENT_WEBHOOK_FORWARD_URL`
    /// - `PAYMENT_FORWARD_TIMEOUT_SECS`
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::new(non_empty_var("PAYMENT_WEBHOOK_SECRET"));

        if let Some(provider) = non_empty_var("PAYMENT_PROVIDER") {
            config.provider = provider;
        }
        if let Some(header) = non_empty_var("PAYMENT_SIGNATURE_HEADER") {
            config = config.with_signature_header(header);
        }
        if let Some(url) = non_empty_var("PAYMENT_WEBHOOK_FORWARD_URL") {
            config = config.with_forward_url(url);
        }
        if let Some(timeout) =
            non_empty_var("PAYMENT_FORWARD_TIMEOUT_SECS").and_then(|s| parse_timeout_secs(&s))
        {
            config.forward_timeout = timeout;
        }

        config
    }

    /// Create config with an explicit secret; empty secrets count as unset
    pub fn new(secret: Option<String>) -> Self {
        Self {
            provider: DEFAULT_PROVIDER.to_string(),
            signature_header: DEFAULT_SIGNATURE_HEADER.to_string(),
            secret: secret.filter(|s| !s.is_empty()),
            forward_url: None,
            forward_timeout: DEFAULT_FORWARD_TIMEOUT,
        }
    }

    /// Builder: set provider label
    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = provider.into();
        self
    }

    /// Builder: set signature header name
    pub fn with_signature_header(mut self, header: impl Into<String>) -> Self {
        self.signature_header = header.into().to_ascii_lowercase();
        self
    }

    /// Builder: set forwarding URL
    pub fn with_forward_url(mut self, url: impl Into<String>) -> Self {
        self.forward_url = Some(url.into());
        self
    }

    /// Builder: set forwarding timeout
    pub fn with_forward_timeout(mut self, timeout: Duration) -> Self {
        self.forward_timeout = timeout;
        self
    }

    /// Check if a secret is present
    pub fn is_configured(&self) -> bool {
        self.secret.is_some()
    }
}

impl std::fmt::Debug for WebhookConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookConfig")
            .field("provider", &self.provider)
            .field("signature_header", &self.signature_header)
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .field("forward_url", &self.forward_url)
            .field("forward_timeout", &self.forward_timeout)
            .finish()
    }
}

/// Whole seconds; zero is rejected since it would time out every forward
fn parse_timeout_secs(raw: &str) -> Option<Duration> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = WebhookConfig::new(Some("whsec".to_string()));
        assert!(config.is_configured());
        assert_eq!(config.provider, "payment");
        assert_eq!(config.signature_header, "x-webhook-signature");
        assert_eq!(config.forward_timeout, Duration::from_secs(5));
        assert!(config.forward_url.is_none());
    }

    #[test]
    fn test_empty_secret_is_unconfigured() {
        assert!(!WebhookConfig::new(Some(String::new())).is_configured());
        assert!(!WebhookConfig::new(None).is_configured());
    }

    #[test]
    fn test_header_is_lowercased() {
        let config = WebhookConfig::new(None).with_signature_header("X-Toss-Signature");
        assert_eq!(config.signature_header, "x-toss-signature");
    }

    #[test]
    fn test_parse_timeout_secs() {
        assert_eq!(parse_timeout_secs("10"), Some(Duration::from_secs(10)));
        assert_eq!(parse_timeout_secs(" 3 "), Some(Duration::from_secs(3)));
        assert_eq!(parse_timeout_secs("0"), None);
        assert_eq!(parse_timeout_secs("-1"), None);
        assert_eq!(parse_timeout_secs("soon"), None);
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = WebhookConfig::new(Some("super-secret".to_string()));
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
