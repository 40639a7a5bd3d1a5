//! # tea-mail
//!
//! Lead form mail relay for tearoom-rs.
//!
//! Contact and franchise inquiries are validated, rendered as plain text and
//! sent through a `MailProvider`. The bundled provider is Resend.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tea_mail::{MailConfig, MailRelay, ResendMailer};
//!
//! let config = MailConfig::from_env()?;
//! let relay = MailRelay::from_config(Arc::new(ResendMailer::new(config.clone())?), &config);
//!
//! relay.relay(&inquiry).await?;
//! ```

pub mod config;
pub mod relay;
pub mod resend;

// Re-exports
pub use config::MailConfig;
pub use relay::{compose, MailRelay};
pub use resend::ResendMailer;
