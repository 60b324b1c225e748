//! Outbound message model.
//!
//! # Responsibilities
//! - Hold the sender, recipients, subject and body of one email
//! - Validate that every field the engine needs is present and non-blank
//! - Derive a plain-text body for vendors that want one
//!
//! # Design Decisions
//! - Read-only to the delivery engine and to every adapter
//! - HTML is the primary body; the plain-text part is optional
//! - Validation reports the first missing field, before any provider is contacted

pub mod text;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when a message is not deliverable as composed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("message has no sender")]
    MissingSender,

    #[error("message has no recipients")]
    NoRecipients,

    /// A recipient address is blank (index into the recipient list).
    #[error("recipient {0} is blank")]
    BlankRecipient(usize),

    #[error("message has no subject")]
    MissingSubject,

    #[error("message has no body")]
    MissingBody,
}

/// Message body: HTML content plus an optional plain-text alternative.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Body {
    pub html: String,
    #[serde(default)]
    pub text: Option<String>,
}

impl Body {
    /// Plain-text rendering of the body.
    ///
    /// The explicit text part wins verbatim; otherwise markup is stripped
    /// from the HTML.
    pub fn plain_text(&self) -> String {
        match &self.text {
            Some(text) => text.clone(),
            None => text::strip_tags(&self.html),
        }
    }
}

/// A single email to be delivered through the provider chain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub body: Body,
}

impl Message {
    /// Create a message with an HTML body.
    pub fn new(
        from: impl Into<String>,
        to: impl IntoIterator<Item = impl Into<String>>,
        subject: impl Into<String>,
        html: impl Into<String>,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into_iter().map(Into::into).collect(),
            subject: subject.into(),
            body: Body {
                html: html.into(),
                text: None,
            },
        }
    }

    /// Attach an explicit plain-text part.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.body.text = Some(text.into());
        self
    }

    /// Check that sender, recipients, subject and body are all present.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if is_blank(&self.from) {
            return Err(ValidationError::MissingSender);
        }
        if self.to.is_empty() {
            return Err(ValidationError::NoRecipients);
        }
        if let Some(index) = self.to.iter().position(|addr| is_blank(addr)) {
            return Err(ValidationError::BlankRecipient(index));
        }
        if is_blank(&self.subject) {
            return Err(ValidationError::MissingSubject);
        }
        if is_blank(&self.body.html) {
            return Err(ValidationError::MissingBody);
        }
        Ok(())
    }

    /// Recipients joined with commas, as several vendors expect.
    pub fn recipients_joined(&self) -> String {
        self.to.join(",")
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
