//! # Webhook Types
//!
//! Payloads that have passed signature verification, and the envelope
//! used to relay them downstream.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A payment notification whose signature has been verified.
///
/// Only constructed after the raw body matched its HMAC, so holding one
/// means the payload is authentic.
#[derive(Debug, Clone, PartialEq)]
pub struct VerifiedWebhook {
    /// Provider label (e.g. "payment", "toss")
    pub provider: String,
    /// Parsed JSON object from the raw body
    pub payload: Map<String, Value>,
}

impl VerifiedWebhook {
    pub fn new(provider: impl Into<String>, payload: Map<String, Value>) -> Self {
        Self {
            provider: provider.into(),
            payload,
        }
    }

    /// Best-effort event type for logging.
    ///
    /// Providers disagree on the key, so the common spellings are tried in order.
    pub fn event_type(&self) -> Option<&str> {
        ["eventType", "event_type", "type", "event"]
            .iter()
            .find_map(|key| self.payload.get(*key).and_then(|v| v.as_str()))
    }

    /// Order reference if the provider sent one
    pub fn order_id(&self) -> Option<&str> {
        ["orderId", "order_id", "merchant_uid"]
            .iter()
            .find_map(|key| self.payload.get(*key).and_then(|v| v.as_str()))
    }

    /// Wrap for downstream delivery
    pub fn into_envelope(self) -> WebhookEnvelope {
        WebhookEnvelope {
            provider: self.provider,
            payload: Value::Object(self.payload),
        }
    }
}

/// Body posted to the forwarding URL: `{provider, payload}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookEnvelope {
    pub provider: String,
    pub payload: Value,
}
