//! Transactional email via the Resend HTTP API.
//!
//! [`EmailDelivery`] posts a JSON message to `{api_base}/emails` with a
//! bearer API key. Configuration comes from the environment; when
//! `RESEND_API_KEY` is not set, [`EmailConfig::from_env`] returns `None` and
//! [`Mailer::LogOnly`] writes the text body to the log instead.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// HTTP timeout for a single send.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for email delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    /// The HTTP request itself failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider answered with a non-2xx status code.
    #[error("Email provider returned HTTP {status}: {body}")]
    Provider { status: u16, body: String },
}

// ---------------------------------------------------------------------------
// EmailConfig
// ---------------------------------------------------------------------------

const DEFAULT_API_BASE: &str = "https://api.resend.com";

const DEFAULT_FROM_ADDRESS: &str = "GV Software <onboarding@resend.dev>";

const DEFAULT_CONTACT_INBOX: &str = "contato@gvsoftware.com";

/// Configuration for the email provider.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub api_key: String,
    /// RFC 5322 "From" value, display name allowed.
    pub from_address: String,
    /// Where contact-form submissions are delivered.
    pub contact_inbox: String,
    /// Base URL without a trailing slash.
    pub api_base: String,
}

impl EmailConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `RESEND_API_KEY` is not set, signalling that
    /// messages should only be logged.
    ///
    /// | Variable          | Required | Default                               |
    /// |-------------------|----------|---------------------------------------|
    /// | `RESEND_API_KEY`  | yes      | -                                     |
    /// | `EMAIL_FROM`      | no       | `GV Software <onboarding@resend.dev>` |
    /// | `CONTACT_INBOX`   | no       | `contato@gvsoftware.com`              |
    /// | `RESEND_API_BASE` | no       | `https://api.resend.com`              |
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("RESEND_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())?;
        Some(Self {
            api_key,
            from_address: std::env::var("EMAIL_FROM")
                .unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_string()),
            contact_inbox: std::env::var("CONTACT_INBOX")
                .unwrap_or_else(|_| DEFAULT_CONTACT_INBOX.to_string()),
            api_base: std::env::var("RESEND_API_BASE")
                .map(|b| b.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_API_BASE.to_string()),
        })
    }
}

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

/// A message ready to hand to the provider.
#[derive(Debug, Clone, Serialize)]
pub struct OutboundEmail {
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
}

#[derive(Serialize)]
struct SendRequest<'a> {
    from: &'a str,
    #[serde(flatten)]
    email: &'a OutboundEmail,
}

#[derive(Deserialize)]
struct SendResponse {
    id: Option<String>,
}

// ---------------------------------------------------------------------------
// EmailDelivery
// ---------------------------------------------------------------------------

/// Sends email through the Resend API.
pub struct EmailDelivery {
    client: reqwest::Client,
    config: EmailConfig,
}

impl EmailDelivery {
    pub fn new(config: EmailConfig) -> Result<Self, EmailError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &EmailConfig {
        &self.config
    }

    /// Send a message. Returns the provider's message id when it reports one.
    pub async fn send(&self, email: &OutboundEmail) -> Result<Option<String>, EmailError> {
        let body = SendRequest {
            from: &self.config.from_address,
            email,
        };
        let response = self
            .client
            .post(format!("{}/emails", self.config.api_base))
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(EmailError::Provider {
                status: status.as_u16(),
                body,
            });
        }

        let id = response.json::<SendResponse>().await.ok().and_then(|r| r.id);
        tracing::info!(to = ?email.to, subject = %email.subject, id = ?id, "Email sent");
        Ok(id)
    }
}

// ---------------------------------------------------------------------------
// Mailer
// ---------------------------------------------------------------------------

/// Outbound mail channel: the real provider, or the log when no provider
/// is configured.
pub enum Mailer {
    Resend(EmailDelivery),
    LogOnly,
}

impl Mailer {
    /// Build from the environment, falling back to [`Mailer::LogOnly`].
    pub fn from_env() -> Result<Self, EmailError> {
        match EmailConfig::from_env() {
            Some(config) => Ok(Mailer::Resend(EmailDelivery::new(config)?)),
            None => Ok(Mailer::LogOnly),
        }
    }

    /// Inbox for contact-form submissions.
    pub fn contact_inbox(&self) -> &str {
        match self {
            Mailer::Resend(delivery) => &delivery.config().contact_inbox,
            Mailer::LogOnly => DEFAULT_CONTACT_INBOX,
        }
    }

    pub async fn send(&self, email: &OutboundEmail) -> Result<(), EmailError> {
        match self {
            Mailer::Resend(delivery) => delivery.send(email).await.map(|_| ()),
            Mailer::LogOnly => {
                tracing::info!(
                    to = ?email.to,
                    subject = %email.subject,
                    reply_to = ?email.reply_to,
                    body = %email.text,
                    "Email provider not configured, message logged only",
                );
                Ok(())
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
