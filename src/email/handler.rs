//! HTTP semantics of the email relay function
//!
//! Transport-agnostic: the Lambda binary maps [`RelayResponse`] onto its own
//! response type.

use log::warn;
use serde::Deserialize;

use super::{EmailError, EmailMessage, EmailRelay};

/// Headers sent with every relay response
pub const CORS_HEADERS: [(&str, &str); 3] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Headers", "Content-Type"),
    ("Access-Control-Allow-Methods", "POST, OPTIONS"),
];

/// Status code and plain text body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayResponse {
    pub status: u16,
    pub body: String,
}

impl RelayResponse {
    fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }
}

/// Request body as posted by the calculator page; every field may be missing
#[derive(Debug, Default, Deserialize)]
struct RelayRequest {
    #[serde(default)]
    to: Option<String>,
    #[serde(default)]
    subject: Option<String>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    csv: Option<String>,
}

/// Handle one relay request.
///
/// `relay` is `None` when the email service has no credentials configured.
pub async fn handle_request(method: &str, body: &str, relay: Option<&dyn EmailRelay>) -> RelayResponse {
    if method.eq_ignore_ascii_case("OPTIONS") {
        return RelayResponse::new(200, "");
    }
    if !method.eq_ignore_ascii_case("POST") {
        return RelayResponse::new(405, "Method Not Allowed");
    }

    let relay = match relay {
        Some(relay) => relay,
        None => return RelayResponse::new(500, "Email service not configured"),
    };

    let body = if body.trim().is_empty() { "{}" } else { body };
    let request: RelayRequest = match serde_json::from_str(body) {
        Ok(request) => request,
        Err(_) => return RelayResponse::new(400, "Invalid JSON payload"),
    };

    let message = match EmailMessage::new(
        request.to.as_deref().unwrap_or_default(),
        request.subject.as_deref(),
        request.text.as_deref().unwrap_or_default(),
        request.csv.as_deref(),
    ) {
        Ok(message) => message,
        Err(EmailError::InvalidAddress(_)) => return RelayResponse::new(400, "Invalid email address"),
        Err(_) => return RelayResponse::new(400, "Missing required fields"),
    };

    match relay.send(&message).await {
        Ok(()) => RelayResponse::new(200, "Email sent"),
        Err(EmailError::Rejected { status, body }) => {
            let body = if body.is_empty() { "SendGrid request failed".to_string() } else { body };
            RelayResponse::new(status, body)
        }
        Err(e) => {
            warn!("Email send failed: {}", e);
            RelayResponse::new(500, "Email send error")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records messages and answers with a fixed outcome
    struct FakeRelay {
        sent: Mutex<Vec<EmailMessage>>,
        reject: Option<(u16, String)>,
        fail: bool,
    }

    impl FakeRelay {
        fn accepting() -> Self {
            Self { sent: Mutex::new(Vec::new()), reject: None, fail: false }
        }
    }

    #[async_trait]
    impl EmailRelay for FakeRelay {
        async fn send(&self, message: &EmailMessage) -> Result<(), EmailError> {
            self.sent.lock().unwrap().push(message.clone());
            if let Some((status, body)) = &self.reject {
                return Err(EmailError::Rejected { status: *status, body: body.clone() });
            }
            if self.fail {
                return Err(EmailError::NotConfigured);
            }
            Ok(())
        }
    }

    const VALID: &str = r#"{"to":" anna@example.se ","subject":"","text":"Hello","csv":"Year\n1\n"}"#;

    #[tokio::test]
    async fn test_preflight_and_method() {
        let relay = FakeRelay::accepting();
        assert_eq!(handle_request("OPTIONS", "", Some(&relay)).await, RelayResponse::new(200, ""));
        assert_eq!(handle_request("GET", "", Some(&relay)).await.status, 405);
        assert!(relay.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unconfigured_relay() {
        let response = handle_request("POST", VALID, None).await;
        assert_eq!(response, RelayResponse::new(500, "Email service not configured"));
    }

    #[tokio::test]
    async fn test_bad_payloads() {
        let relay = FakeRelay::accepting();
        assert_eq!(
            handle_request("POST", "{not json", Some(&relay)).await,
            RelayResponse::new(400, "Invalid JSON payload")
        );
        assert_eq!(
            handle_request("POST", "", Some(&relay)).await,
            RelayResponse::new(400, "Missing required fields")
        );
        assert_eq!(
            handle_request("POST", r#"{"to":"anna@example.se"}"#, Some(&relay)).await,
            RelayResponse::new(400, "Missing required fields")
        );
        assert_eq!(
            handle_request("POST", r#"{"to":"anna","text":"x"}"#, Some(&relay)).await,
            RelayResponse::new(400, "Invalid email address")
        );
        assert!(relay.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_sends_normalized_message() {
        let relay = FakeRelay::accepting();
        let response = handle_request("POST", VALID, Some(&relay)).await;

        assert_eq!(response, RelayResponse::new(200, "Email sent"));
        let sent = relay.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "anna@example.se");
        assert_eq!(sent[0].subject, "Interest Calculator Results");
        assert_eq!(sent[0].full_text(), "Hello\n\nCSV Data:\nYear\n1");
    }

    #[tokio::test]
    async fn test_provider_failures() {
        let rejecting = FakeRelay {
            reject: Some((401, String::new())),
            ..FakeRelay::accepting()
        };
        assert_eq!(
            handle_request("POST", VALID, Some(&rejecting)).await,
            RelayResponse::new(401, "SendGrid request failed")
        );

        let failing = FakeRelay { fail: true, ..FakeRelay::accepting() };
        assert_eq!(
            handle_request("POST", VALID, Some(&failing)).await,
            RelayResponse::new(500, "Email send error")
        );
    }
}
