//! Sending projection results by email
//!
//! The relay itself is an external collaborator behind [`EmailRelay`]; the
//! calculator only composes the message and checks the recipient address
//! before handing it over.

mod sendgrid;
mod handler;

use std::sync::OnceLock;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::Result;
use crate::export::{email_body, email_subject, serialize, ExportOptions};
use crate::projection::{ProjectionResult, Summary};

pub use handler::{handle_request, RelayResponse, CORS_HEADERS};
pub use sendgrid::{SendGridConfig, SendGridRelay, DEFAULT_SENDGRID_API_URL};

/// Subject used when a request leaves it blank
pub const DEFAULT_SUBJECT: &str = "Interest Calculator Results";

#[derive(Error, Debug)]
pub enum EmailError {
    #[error("Email service not configured")]
    NotConfigured,

    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    #[error("Missing required fields")]
    MissingFields,

    /// The provider answered with a non-success status
    #[error("Email provider rejected the request ({status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("Email transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Message handed to the relay
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub text: String,
    #[serde(default)]
    pub csv: String,
}

impl EmailMessage {
    /// Build a message from loosely filled fields.
    ///
    /// Fields are trimmed, a blank subject falls back to [`DEFAULT_SUBJECT`],
    /// `to` and `text` are required and `to` must look like an address.
    pub fn new(
        to: &str,
        subject: Option<&str>,
        text: &str,
        csv: Option<&str>,
    ) -> std::result::Result<Self, EmailError> {
        let to = to.trim();
        let text = text.trim();

        if to.is_empty() || text.is_empty() {
            return Err(EmailError::MissingFields);
        }
        if !is_valid_address(to) {
            return Err(EmailError::InvalidAddress(to.to_string()));
        }

        let subject = subject.map(str::trim).filter(|s| !s.is_empty()).unwrap_or(DEFAULT_SUBJECT);

        Ok(Self {
            to: to.to_string(),
            subject: subject.to_string(),
            text: text.to_string(),
            csv: csv.map(str::trim).unwrap_or_default().to_string(),
        })
    }

    /// Text actually delivered: the body, followed by the CSV data when present
    pub fn full_text(&self) -> String {
        if self.csv.is_empty() {
            self.text.clone()
        } else {
            format!("{}\n\nCSV Data:\n{}", self.text, self.csv)
        }
    }
}

/// Loose check that a string looks like `local@domain.tld`
pub fn is_valid_address(address: &str) -> bool {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok())
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(address))
}

/// Something that can deliver an [`EmailMessage`]
#[async_trait]
pub trait EmailRelay: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> std::result::Result<(), EmailError>;
}

/// Compose the results email for a projection.
///
/// The address is checked before anything else is built.
pub fn compose_message(
    to: &str,
    result: &ProjectionResult,
    summary: &Summary,
    generated_at: Option<NaiveDateTime>,
) -> Result<EmailMessage> {
    if !is_valid_address(to.trim()) {
        return Err(EmailError::InvalidAddress(to.trim().to_string()).into());
    }

    let options = ExportOptions {
        generated_at,
        ..Default::default()
    };
    let csv = serialize(result, summary, &options)?;
    let body = email_body(result, summary, generated_at);
    let subject = email_subject(result);

    Ok(EmailMessage::new(to, Some(subject.as_str()), &body, Some(csv.as_str()))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inputs::{GrowthModel, ValidatedInputs};
    use crate::projection::project;
    use crate::CalculatorError;

    #[test]
    fn test_address_pattern() {
        assert!(is_valid_address("anna@example.se"));
        assert!(is_valid_address("a.b+c@mail.example.com"));
        assert!(!is_valid_address("anna@example"));
        assert!(!is_valid_address("anna example@x.se"));
        assert!(!is_valid_address("@example.se"));
        assert!(!is_valid_address(""));
    }

    #[test]
    fn test_message_defaults_and_trimming() {
        let message = EmailMessage::new(" anna@example.se ", Some("  "), " hello ", None).unwrap();
        assert_eq!(message.to, "anna@example.se");
        assert_eq!(message.subject, DEFAULT_SUBJECT);
        assert_eq!(message.text, "hello");
        assert_eq!(message.full_text(), "hello");

        let with_csv = EmailMessage::new("anna@example.se", None, "hello", Some("a,b\n1,2\n")).unwrap();
        assert_eq!(with_csv.full_text(), "hello\n\nCSV Data:\na,b\n1,2");
    }

    #[test]
    fn test_message_requires_fields() {
        assert!(matches!(
            EmailMessage::new("", None, "hello", None),
            Err(EmailError::MissingFields)
        ));
        assert!(matches!(
            EmailMessage::new("anna@example.se", None, "   ", None),
            Err(EmailError::MissingFields)
        ));
        assert!(matches!(
            EmailMessage::new("not-an-address", None, "hello", None),
            Err(EmailError::InvalidAddress(_))
        ));
    }

    #[test]
    fn test_compose_message() {
        let inputs = ValidatedInputs::new(GrowthModel::AnnualCompounding, 300_000.0, 2.0, 1.2).unwrap();
        let result = project(&inputs);
        let summary = result.summary().unwrap();

        let message = compose_message("anna@example.se", &result, &summary, None).unwrap();
        assert_eq!(message.subject, "Church Tax Calculation - Income: 300000 kr");
        assert!(message.text.starts_with("Church Tax Calculation Results"));
        assert!(message.csv.contains("Year,Income,Salary Increase"));

        let err = compose_message("anna@", &result, &summary, None).unwrap_err();
        assert!(matches!(err, CalculatorError::Email(EmailError::InvalidAddress(_))));
    }
}
