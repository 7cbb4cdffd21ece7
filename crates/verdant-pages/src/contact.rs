//! Contact form submissions.
//!
//! The public contact form posts either JSON (`/api/contact`) or a plain
//! HTML form (`/contact`). Both go through [`ContactSubmission::validate`]
//! and valid submissions are appended to the `contact-inquiries` section.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use verdant_core::{Section, SectionId};
use verdant_storage::ContentStore;

/// Section that collects contact form submissions.
pub const INQUIRIES_SECTION: &str = "contact-inquiries";

/// Per-field validation messages, keyed by form field name.
pub type FieldErrors = BTreeMap<String, String>;

/// One contact form submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactSubmission {
    /// Sender name (required).
    pub name: String,
    /// Sender email (required, must look like an address).
    pub email: String,
    /// Optional phone number.
    pub phone: String,
    /// Message body (required).
    pub message: String,
}

impl ContactSubmission {
    /// Check required fields and email shape.
    ///
    /// Returns every problem at once so the form can mark each field.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.name.trim().is_empty() {
            errors.insert("name".into(), "Name is required".into());
        }
        if self.email.trim().is_empty() {
            errors.insert("email".into(), "Email is required".into());
        } else if !looks_like_email(self.email.trim()) {
            errors.insert("email".into(), "Please enter a valid email address".into());
        }
        if self.message.trim().is_empty() {
            errors.insert("message".into(), "Message is required".into());
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn to_record(&self, received_at: &str) -> Value {
        serde_json::json!({
            "name": self.name.trim(),
            "email": self.email.trim(),
            "phone": self.phone.trim(),
            "message": self.message.trim(),
            "receivedAt": received_at,
        })
    }
}

fn looks_like_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

/// State of the contact form between requests.
#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    /// Values to put back into the inputs.
    pub values: ContactSubmission,
    /// Messages to show next to each field.
    pub errors: FieldErrors,
    /// Set after a successful submission.
    pub sent: bool,
}

impl ContactForm {
    /// Form state after a rejected submission.
    pub fn rejected(values: ContactSubmission, errors: FieldErrors) -> Self {
        Self {
            values,
            errors,
            sent: false,
        }
    }

    /// Form state after a successful submission.
    pub fn sent() -> Self {
        Self {
            sent: true,
            ..Self::default()
        }
    }
}

/// Append a submission to the inquiries section.
///
/// Reads propagate failures here: losing earlier inquiries because a read
/// failed would be worse than rejecting this one.
pub async fn record_inquiry(
    store: &ContentStore,
    submission: &ContactSubmission,
    received_at: &str,
) -> verdant_storage::Result<()> {
    let id = SectionId::new(INQUIRIES_SECTION)?;
    let mut section = store.fetch(&id).await?.unwrap_or_default();
    let mut items = section
        .get_array("items")
        .cloned()
        .unwrap_or_default();
    items.push(submission.to_record(received_at));
    let count = items.len();
    section.insert("items", Value::Array(items));
    store.set(&id, section).await?;
    tracing::info!(inquiries = count, "Recorded contact inquiry");
    Ok(())
}

/// All recorded inquiries, oldest first.
pub async fn inquiries(store: &ContentStore) -> Vec<Value> {
    store
        .get(INQUIRIES_SECTION)
        .await
        .as_ref()
        .and_then(|s: &Section| s.get_array("items").cloned())
        .unwrap_or_default()
}
