//! # Lead Forms
//!
//! Contact and franchise inquiries submitted from the storefront.
//! Each form validates itself and describes how it should read in a mail.

use crate::error::{RelayError, RelayResult};
use serde::{Deserialize, Serialize};

/// Upper bound for free-text fields
pub const MAX_TEXT_LEN: usize = 5000;

/// Upper bound for single-line fields
pub const MAX_FIELD_LEN: usize = 200;

/// A form submission that can be relayed as a mail.
pub trait Lead: Send + Sync {
    /// Short label for logs ("contact", "franchise")
    fn kind(&self) -> &'static str;

    /// Check required fields and lengths
    fn validate(&self) -> RelayResult<()>;

    /// Mail subject line
    fn subject(&self) -> String;

    /// Label/value pairs in display order; empty optional fields are skipped
    fn fields(&self) -> Vec<(&'static str, String)>;

    /// Address replies should go to
    fn reply_to(&self) -> Option<&str>;
}

/// General inquiry from the contact page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInquiry {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    pub message: String,
}

impl Lead for ContactInquiry {
    fn kind(&self) -> &'static str {
        "contact"
    }

    fn validate(&self) -> RelayResult<()> {
        require("name", &self.name, MAX_FIELD_LEN)?;
        require_email(&self.email)?;
        optional("phone", self.phone.as_deref(), MAX_FIELD_LEN)?;
        optional("subject", self.subject.as_deref(), MAX_FIELD_LEN)?;
        require("message", &self.message, MAX_TEXT_LEN)
    }

    fn subject(&self) -> String {
        match non_blank(self.subject.as_deref()) {
            Some(subject) => format!("[Contact] {} - {}", subject, self.name.trim()),
            None => format!("[Contact] New inquiry from {}", self.name.trim()),
        }
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("Name", self.name.trim().to_string()),
            ("Email", self.email.trim().to_string()),
        ];
        push_optional(&mut fields, "Phone", self.phone.as_deref());
        push_optional(&mut fields, "Subject", self.subject.as_deref());
        fields.push(("Message", self.message.trim().to_string()));
        fields
    }

    fn reply_to(&self) -> Option<&str> {
        Some(self.email.trim())
    }
}

/// Franchise / store opening inquiry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FranchiseInquiry {
    pub name: String,
    pub phone: String,
    pub email: String,
    /// Region where the applicant wants to open a store
    pub region: String,
    /// Prior food & beverage experience
    #[serde(default)]
    pub experience: Option<String>,
    /// Planned investment range, free text
    #[serde(default)]
    pub budget: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl Lead for FranchiseInquiry {
    fn kind(&self) -> &'static str {
        "franchise"
    }

    fn validate(&self) -> RelayResult<()> {
        require("name", &self.name, MAX_FIELD_LEN)?;
        require("phone", &self.phone, MAX_FIELD_LEN)?;
        require_email(&self.email)?;
        require("region", &self.region, MAX_FIELD_LEN)?;
        optional("experience", self.experience.as_deref(), MAX_TEXT_LEN)?;
        optional("budget", self.budget.as_deref(), MAX_FIELD_LEN)?;
        optional("message", self.message.as_deref(), MAX_TEXT_LEN)
    }

    fn subject(&self) -> String {
        format!(
            "[Franchise] {} ({})",
            self.name.trim(),
            self.region.trim()
        )
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("Name", self.name.trim().to_string()),
            ("Phone", self.phone.trim().to_string()),
            ("Email", self.email.trim().to_string()),
            ("Region", self.region.trim().to_string()),
        ];
        push_optional(&mut fields, "Experience", self.experience.as_deref());
        push_optional(&mut fields, "Budget", self.budget.as_deref());
        push_optional(&mut fields, "Message", self.message.as_deref());
        fields
    }

    fn reply_to(&self) -> Option<&str> {
        Some(self.email.trim())
    }
}

// =============================================================================
// Validation helpers
// =============================================================================

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn push_optional(fields: &mut Vec<(&'static str, String)>, label: &'static str, value: Option<&str>) {
    if let Some(v) = non_blank(value) {
        fields.push((label, v.to_string()));
    }
}

fn require(field: &str, value: &str, max_len: usize) -> RelayResult<()> {
    if value.trim().is_empty() {
        return Err(RelayError::validation(field, "is required"));
    }
    check_len(field, value, max_len)
}

fn optional(field: &str, value: Option<&str>, max_len: usize) -> RelayResult<()> {
    match value {
        Some(v) => check_len(field, v, max_len),
        None => Ok(()),
    }
}

fn check_len(field: &str, value: &str, max_len: usize) -> RelayResult<()> {
    if value.trim().chars().count() > max_len {
        return Err(RelayError::validation(
            field,
            format!("must be at most {} characters", max_len),
        ));
    }
    Ok(())
}

fn require_email(value: &str) -> RelayResult<()> {
    require("email", value, MAX_FIELD_LEN)?;
    if !looks_like_email(value.trim()) {
        return Err(RelayError::validation("email", "is not a valid address"));
    }
    Ok(())
}

/// `local@domain.tld` with no whitespace. Deliverability is the provider's problem.
fn looks_like_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}
