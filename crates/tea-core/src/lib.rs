//! # tea-core
//!
//! Core types and traits for the tearoom storefront relays.
//!
//! This crate provides:
//! - `RelayError` for typed error handling
//! - `VerifiedWebhook` and `WebhookEnvelope` for payment notifications
//! - `ContactInquiry`, `FranchiseInquiry` and the `Lead` trait for lead forms
//! - `MailProvider` trait for transactional mail providers
//!
//! ## Example
//!
//! ```rust,ignore
//! use tea_core::{ContactInquiry, Lead};
//!
//! let inquiry: ContactInquiry = serde_json::from_slice(&body)?;
//! inquiry.validate()?;
//!
//! // Relay through a MailProvider
//! relay.relay(&inquiry).await?;
//! ```

pub mod error;
pub mod lead;
pub mod mail;
pub mod webhook;

// Re-exports for convenience
pub use error::{RelayError, RelayResult};
pub use lead::{ContactInquiry, FranchiseInquiry, Lead};
pub use mail::{BoxedMailProvider, MailMessage, MailProvider};
pub use webhook::{VerifiedWebhook, WebhookEnvelope};
