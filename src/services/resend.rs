use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when sending through Resend
#[derive(Debug, Error)]
pub enum ResendError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Provider rejected message: {message}")]
    Rejected {
        message: String,
        details: Option<Value>,
    },
}

/// File attached to an outbound message; `content` is base64
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attachment {
    pub filename: String,
    pub content: String,
    pub content_type: String,
}

/// Message as accepted by the Resend `POST /emails` API
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutboundEmail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub text: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
}

/// Provider acknowledgment
#[derive(Debug, Clone, PartialEq)]
pub struct SendReceipt {
    pub id: Option<String>,
}

/// Resend API client
pub struct ResendClient {
    base_url: String,
    api_key: String,
    client: Client,
}

impl ResendClient {
    /// Create a new Resend client
    pub fn new(base_url: String, api_key: String) -> Result<Self, ResendError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            base_url,
            api_key,
            client,
        })
    }

    /// Send one message. No retries: a failure is reported as-is.
    pub async fn send(&self, email: &OutboundEmail) -> Result<SendReceipt, ResendError> {
        let url = format!("{}/emails", self.base_url.trim_end_matches('/'));
        let idempotency_key = uuid::Uuid::new_v4().to_string();

        tracing::debug!(
            "Sending email to {} recipient(s) via {} (key {})",
            email.to.len(),
            url,
            idempotency_key
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .header("Idempotency-Key", &idempotency_key)
            .json(email)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        let json: Option<Value> = serde_json::from_str(&body).ok();

        if !status.is_success() {
            let message = json
                .as_ref()
                .and_then(|j| j.get("message"))
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| format!("Send blocked: {}", status));
            tracing::error!("Resend rejected message: {} - {}", status, body);
            return Err(ResendError::Rejected {
                message,
                details: json,
            });
        }

        // A 2xx means the message was accepted; an unreadable body only loses the id
        let id = json
            .as_ref()
            .and_then(|j| j.get("id"))
            .and_then(Value::as_str)
            .map(str::to_string);
        if id.is_none() {
            tracing::warn!("Resend accepted message ({}) without an id: {:?}", status, body);
        }

        Ok(SendReceipt { id })
    }
}
