//! SendGrid v3 mail client

use async_trait::async_trait;
use log::{info, warn};
use reqwest::Client;
use serde_json::json;

use super::{EmailError, EmailMessage, EmailRelay};

pub const DEFAULT_SENDGRID_API_URL: &str = "https://api.sendgrid.com/v3/mail/send";

/// SendGrid credentials and endpoint
#[derive(Debug, Clone)]
pub struct SendGridConfig {
    pub api_key: String,
    /// Verified sender address
    pub from: String,
    pub api_url: String,
}

impl SendGridConfig {
    /// Read `SENDGRID_API_KEY`, `SENDGRID_FROM` and optional `SENDGRID_API_URL`
    pub fn from_env() -> Result<Self, EmailError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, EmailError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let api_key = non_empty("SENDGRID_API_KEY").ok_or(EmailError::NotConfigured)?;
        let from = non_empty("SENDGRID_FROM").ok_or(EmailError::NotConfigured)?;
        let api_url = non_empty("SENDGRID_API_URL").unwrap_or_else(|| DEFAULT_SENDGRID_API_URL.to_string());

        Ok(Self { api_key, from, api_url })
    }
}

/// Relay that posts messages to the SendGrid mail send endpoint
#[derive(Debug, Clone)]
pub struct SendGridRelay {
    client: Client,
    config: SendGridConfig,
}

impl SendGridRelay {
    pub fn new(config: SendGridConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn payload(&self, message: &EmailMessage) -> serde_json::Value {
        json!({
            "personalizations": [
                { "to": [{ "email": message.to }] }
            ],
            "from": { "email": self.config.from },
            "subject": message.subject,
            "content": [
                { "type": "text/plain", "value": message.full_text() }
            ]
        })
    }
}

#[async_trait]
impl EmailRelay for SendGridRelay {
    async fn send(&self, message: &EmailMessage) -> Result<(), EmailError> {
        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&self.payload(message))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("SendGrid rejected email to {} with status {}", message.to, status);
            return Err(EmailError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        info!("Sent email to {} ({})", message.to, message.subject);
        Ok(())
    }
}
