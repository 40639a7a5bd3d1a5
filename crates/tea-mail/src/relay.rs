//! # Lead Relay
//!
//! Turns a validated lead into a plain-text mail and hands it to the
//! configured provider.

use crate::config::MailConfig;
use chrono::{DateTime, SecondsFormat, Utc};
use tea_core::{BoxedMailProvider, Lead, MailMessage, RelayResult};
use tracing::{info, instrument};
use uuid::Uuid;

/// Compose the mail for a lead
pub fn compose<L: Lead + ?Sized>(
    lead: &L,
    from: &str,
    to: &[String],
    received_at: DateTime<Utc>,
) -> MailMessage {
    let mut text = String::new();
    for (label, value) in lead.fields() {
        if value.contains('\n') {
            text.push_str(&format!("{}:\n{}\n", label, value));
        } else {
            text.push_str(&format!("{}: {}\n", label, value));
        }
    }
    text.push_str(&format!(
        "\nReceived at: {}\n",
        received_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    ));

    MailMessage {
        from: from.to_string(),
        to: to.to_vec(),
        reply_to: lead.reply_to().map(String::from),
        subject: lead.subject(),
        text,
    }
}

/// Validates, composes and sends lead mail
#[derive(Clone)]
pub struct MailRelay {
    provider: BoxedMailProvider,
    from: String,
    to: Vec<String>,
}

impl MailRelay {
    pub fn new(provider: BoxedMailProvider, from: impl Into<String>, to: Vec<String>) -> Self {
        Self {
            provider,
            from: from.into(),
            to,
        }
    }

    /// Relay routed by `config`, sent through `provider`
    pub fn from_config(provider: BoxedMailProvider, config: &MailConfig) -> Self {
        Self::new(provider, config.from.clone(), config.to.clone())
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.provider_name()
    }

    /// Validate and send a lead. Returns the provider message id.
    #[instrument(skip(self, lead), fields(lead = lead.kind(), provider = self.provider.provider_name()))]
    pub async fn relay<L: Lead + ?Sized>(&self, lead: &L) -> RelayResult<String> {
        lead.validate()?;

        let idempotency_key = Uuid::new_v4().to_string();
        let message = compose(lead, &self.from, &self.to, Utc::now());

        let id = self.provider.send(&message, &idempotency_key).await?;
        info!(message_id = %id, idempotency_key = %idempotency_key, "lead mail sent");
        Ok(id)
    }
}

impl std::fmt::Debug for MailRelay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailRelay")
            .field("provider", &self.provider.provider_name())
            .field("from", &self.from)
            .field("to", &self.to)
            .finish()
    }
}
