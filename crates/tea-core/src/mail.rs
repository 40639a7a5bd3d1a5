//! # Mail Provider Trait
//!
//! Strategy trait for transactional mail providers.
//! Implementations: Resend (see `tea-mail`), test doubles.

use crate::error::RelayResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A fully composed outbound mail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MailMessage {
    pub from: String,
    pub to: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
    pub subject: String,
    pub text: String,
}

/// Core trait for mail provider implementations.
#[async_trait]
pub trait MailProvider: Send + Sync {
    /// Send a message.
    ///
    /// # Arguments
    /// * `message` - The composed mail
    /// * `idempotency_key` - Key the provider uses to drop duplicate sends
    ///
    /// # Returns
    /// The provider's message id.
    async fn send(&self, message: &MailMessage, idempotency_key: &str) -> RelayResult<String>;

    /// Get the provider name (for logging).
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared mail provider (dynamic dispatch)
pub type BoxedMailProvider = Arc<dyn MailProvider>;
