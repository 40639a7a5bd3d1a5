//! # Webhook Signature Verification
//!
//! HMAC-SHA256 over the raw request body, hex encoded.
//! The body is hashed exactly as received; parsing happens only after the
//! signature matched.

use crate::config::WebhookConfig;
use hmac::{Hmac, Mac};
use serde_json::Value;
use sha2::Sha256;
use tea_core::{RelayError, RelayResult, VerifiedWebhook};
use tracing::debug;

type HmacSha256 = Hmac<Sha256>;

/// Compute the hex signature a provider would send for `body`.
pub fn sign(body: &[u8], secret: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(body);
    hex::encode(mac.finalize().into_bytes())
}

/// Check `signature` against the HMAC of `body`.
///
/// Returns `false` when the signature is absent or blank, the secret is
/// unset or empty, the signature is not hex, or the tags differ.
pub fn verify(body: &[u8], signature: Option<&str>, secret: Option<&str>) -> bool {
    let Some(secret) = secret.filter(|s| !s.is_empty()) else {
        return false;
    };
    let Some(signature) = signature.map(str::trim).filter(|s| !s.is_empty()) else {
        return false;
    };
    let Ok(expected) = hex::decode(signature) else {
        return false;
    };
    let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
        return false;
    };
    mac.update(body);
    // verify_slice compares tags in constant time
    mac.verify_slice(&expected).is_ok()
}

/// Authenticates inbound payment notifications.
#[derive(Clone)]
pub struct WebhookVerifier {
    provider: String,
    secret: Option<String>,
}

impl WebhookVerifier {
    pub fn new(provider: impl Into<String>, secret: Option<String>) -> Self {
        Self {
            provider: provider.into(),
            secret: secret.filter(|s| !s.is_empty()),
        }
    }

    pub fn from_config(config: &WebhookConfig) -> Self {
        Self::new(config.provider.clone(), config.secret.clone())
    }

    pub fn is_configured(&self) -> bool {
        self.secret.is_some()
    }

    /// Boolean check, see [`verify`]
    pub fn verify(&self, body: &[u8], signature: Option<&str>) -> bool {
        verify(body, signature, self.secret.as_deref())
    }

    /// Verify and parse a notification.
    ///
    /// # Errors
    /// - `Configuration` when no secret is set, whatever the signature
    /// - `Authentication` when the signature is missing or does not match
    /// - `InvalidPayload` when an authentic body is not a JSON object
    pub fn authenticate(&self, body: &[u8], signature: Option<&str>) -> RelayResult<VerifiedWebhook> {
        if !self.is_configured() {
            return Err(RelayError::Configuration(format!(
                "webhook secret for {} is not set",
                self.provider
            )));
        }

        if signature.map(str::trim).filter(|s| !s.is_empty()).is_none() {
            return Err(RelayError::Authentication("missing signature".to_string()));
        }

        if !self.verify(body, signature) {
            return Err(RelayError::Authentication("signature mismatch".to_string()));
        }

        let payload = match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(map)) => map,
            Ok(_) => {
                return Err(RelayError::InvalidPayload(
                    "webhook body is not a JSON object".to_string(),
                ))
            }
            Err(e) => {
                return Err(RelayError::InvalidPayload(format!(
                    "failed to parse webhook body: {}",
                    e
                )))
            }
        };

        debug!(provider = %self.provider, keys = payload.len(), "verified webhook");

        Ok(VerifiedWebhook::new(self.provider.clone(), payload))
    }
}

impl std::fmt::Debug for WebhookVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookVerifier")
            .field("provider", &self.provider)
            .field("configured", &self.is_configured())
            .finish()
    }
}
