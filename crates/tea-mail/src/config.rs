//! # Mail Configuration
//!
//! Resend credentials and lead routing.
//! Secrets are loaded from environment variables.

use std::env;
use tea_core::RelayError;

/// Resend API configuration plus sender/recipients for lead mail
#[derive(Clone)]
pub struct MailConfig {
    /// Resend API key (re_...)
    pub api_key: String,

    /// Sender, e.g. `Tearoom <noreply@tearoom.example>`
    pub from: String,

    /// Inboxes that receive leads
    pub to: Vec<String>,

    /// API base URL (for testing/mocking)
    pub api_base_url: String,
}

impl MailConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `RESEND_API_KEY`
    /// - `MAIL_FROM`
    /// - `MAIL_TO` (comma separated)
    pub fn from_env() -> Result<Self, RelayError> {
        dotenvy::dotenv().ok();

        let api_key = required_var("RESEND_API_KEY")?;
        let from = required_var("MAIL_FROM")?;
        let to = parse_recipients(&required_var("MAIL_TO")?);

        if to.is_empty() {
            return Err(RelayError::Configuration(
                "MAIL_TO has no recipients".to_string(),
            ));
        }

        let mut config = Self::new(api_key, from, to);
        if let Ok(base) = env::var("RESEND_API_BASE_URL") {
            config = config.with_api_base_url(base);
        }
        Ok(config)
    }

    /// Create config with explicit values (for testing)
    pub fn new(api_key: impl Into<String>, from: impl Into<String>, to: Vec<String>) -> Self {
        Self {
            api_key: api_key.into(),
            from: from.into(),
            to,
            api_base_url: "https://api.resend.com".to_string(),
        }
    }

    /// Get authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.api_key)
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }
}

impl std::fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailConfig")
            .field("api_key", &"<redacted>")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}

fn required_var(key: &str) -> Result<String, RelayError> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| RelayError::Configuration(format!("{} not set", key)))
}

/// Split a comma separated recipient list, dropping blanks
pub fn parse_recipients(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
