//! # Relay Error Types
//!
//! Typed error handling for the storefront relays.
//! All relay operations return `Result<T, RelayError>`.

use thiserror::Error;

/// Core error type for all relay operations
#[derive(Debug, Error)]
pub enum RelayError {
    /// Configuration errors (missing secret, missing mail settings)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Webhook signature missing or mismatched
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Body could not be parsed into the expected shape
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// A submitted form field failed validation
    #[error("Invalid {field}: {message}")]
    Validation { field: String, message: String },

    /// Downstream relay of a verified webhook failed
    #[error("Forwarding failed: {0}")]
    Forwarding(String),

    /// Upstream provider (mail API, admin endpoint) rejected the request
    #[error("Provider error [{provider}]: {message}")]
    ProviderError { provider: String, message: String },

    /// Network/HTTP error talking to a provider
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl RelayError {
    /// Shorthand for a field validation failure
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        RelayError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            RelayError::Configuration(_) => 500,
            RelayError::Authentication(_) => 400,
            RelayError::InvalidPayload(_) => 400,
            RelayError::Validation { .. } => 400,
            RelayError::Forwarding(_) => 502,
            RelayError::ProviderError { .. } => 502,
            RelayError::NetworkError(_) => 503,
            RelayError::Serialization(_) => 500,
        }
    }

    /// Stable label used in structured log fields
    pub fn kind(&self) -> &'static str {
        match self {
            RelayError::Configuration(_) => "configuration",
            RelayError::Authentication(_) => "authentication",
            RelayError::InvalidPayload(_) => "invalid_payload",
            RelayError::Validation { .. } => "validation",
            RelayError::Forwarding(_) => "forwarding",
            RelayError::ProviderError { .. } => "provider",
            RelayError::NetworkError(_) => "network",
            RelayError::Serialization(_) => "serialization",
        }
    }

    /// Returns true if the caller sent something we refuse to process
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }
}

/// Result type alias for relay operations
pub type RelayResult<T> = Result<T, RelayError>;
