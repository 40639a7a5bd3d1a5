//! # Application State
//!
//! Shared state for the Axum application.
//! Holds the webhook verifier and forwarder, the optional mail relay, and
//! server settings. All of it is immutable after startup.

use anyhow::Context;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tea_core::RelayResult;
use tea_mail::{MailConfig, MailRelay, ResendMailer};
use tea_webhook::{Forwarder, WebhookConfig, WebhookVerifier};
use tracing::{info, warn};

/// Settings file used when `TEAROOM_CONFIG` is not set
pub const DEFAULT_CONFIG_PATH: &str = "config/tearoom.toml";

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
    /// Largest accepted request body
    pub max_body_bytes: usize,
    /// Admin backend health URL checked by `/health`
    pub admin_health_url: Option<String>,
    /// Storefront origins allowed to post forms; empty allows any
    pub allowed_origins: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            environment: "development".to_string(),
            max_body_bytes: 64 * 1024,
            admin_health_url: None,
            allowed_origins: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Load the settings file (if any), then apply environment overrides
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let path = std::env::var("TEAROOM_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let config = Self::from_file(Path::new(&path))?;
        Ok(config.with_env_overrides())
    }

    /// Parse a TOML settings file; a missing file yields defaults
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let config = Self::from_toml_str(&content)
                    .with_context(|| format!("Failed to parse {}", path.display()))?;
                info!("Loaded settings from {}", path.display());
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Environment variables win over the file
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(host) = std::env::var("HOST") {
            self.host = host;
        }
        if let Some(port) = std::env::var("PORT").ok().and_then(|p| p.parse().ok()) {
            self.port = port;
        }
        if let Ok(environment) = std::env::var("ENVIRONMENT") {
            self.environment = environment;
        }
        if let Some(limit) = std::env::var("MAX_BODY_BYTES").ok().and_then(|v| v.parse().ok()) {
            self.max_body_bytes = limit;
        }
        if let Ok(url) = std::env::var("ADMIN_HEALTH_URL") {
            self.admin_health_url = Some(url).filter(|u| !u.trim().is_empty());
        }
        if let Ok(origins) = std::env::var("ALLOWED_ORIGINS") {
            self.allowed_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(String::from)
                .collect();
        }
        self
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<std::net::SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid socket address {}:{}", self.host, self.port))
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Application config
    pub config: AppConfig,
    /// Header the payment provider puts its signature in
    pub signature_header: String,
    /// Payment webhook verifier
    pub verifier: WebhookVerifier,
    /// Best-effort relay for verified webhooks
    pub forwarder: Forwarder,
    /// Lead mail relay; `None` when mail is not configured
    pub mail: Option<MailRelay>,
    /// Client for the upstream health check
    pub http_client: reqwest::Client,
}

impl AppState {
    /// Build state from explicit configuration
    pub fn new(
        config: AppConfig,
        webhook: WebhookConfig,
        mail: Option<MailRelay>,
    ) -> RelayResult<Self> {
        let forwarder = Forwarder::from_config(&webhook)?;
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(3))
            .build()
            .map_err(|e| {
                tea_core::RelayError::Configuration(format!("failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            config,
            signature_header: webhook.signature_header.clone(),
            verifier: WebhookVerifier::from_config(&webhook),
            forwarder,
            mail,
            http_client,
        })
    }

    /// Build state from the settings file and environment
    pub fn from_env() -> anyhow::Result<Self> {
        let config = AppConfig::load()?;
        let webhook = WebhookConfig::from_env();

        if !webhook.is_configured() {
            warn!("PAYMENT_WEBHOOK_SECRET not set; payment webhooks will be answered with 500");
        }

        let mail = match MailConfig::from_env() {
            Ok(mail_config) => {
                let mailer = ResendMailer::new(mail_config.clone())
                    .map_err(|e| anyhow::anyhow!("Failed to initialize Resend: {}", e))?;
                Some(MailRelay::from_config(Arc::new(mailer), &mail_config))
            }
            Err(e) => {
                warn!("Mail relay disabled: {}", e);
                None
            }
        };

        Self::new(config, webhook, mail).map_err(|e| anyhow::anyhow!("Failed to build state: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.max_body_bytes, 65536);
        assert!(!config.is_production());
    }

    #[test]
    fn test_socket_addr() {
        let config = AppConfig {
            host: "0.0.0.0".to_string(),
            port: 3000,
            ..AppConfig::default()
        };

        let addr = config.socket_addr().unwrap();
        assert_eq!(addr.to_string(), "0.0.0.0:3000");
    }

    #[test]
    fn test_invalid_socket_addr() {
        let config = AppConfig {
            host: "not a host".to_string(),
            ..AppConfig::default()
        };
        assert!(config.socket_addr().is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            port = 9090
            environment = "production"
            allowed_origins = ["https://tearoom.example"]
            "#,
        )
        .unwrap();

        assert_eq!(config.port, 9090);
        assert_eq!(config.host, "127.0.0.1");
        assert!(config.is_production());
        assert_eq!(config.allowed_origins, vec!["https://tearoom.example"]);
        assert_eq!(config.max_body_bytes, 64 * 1024);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = AppConfig::from_file(Path::new("does/not/exist.toml")).unwrap();
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_state_without_secret_is_unconfigured() {
        let state = AppState::new(AppConfig::default(), WebhookConfig::new(None), None).unwrap();
        assert!(!state.verifier.is_configured());
        assert!(!state.forwarder.is_enabled());
        assert!(state.mail.is_none());
        assert_eq!(state.signature_header, "x-webhook-signature");
    }
}
