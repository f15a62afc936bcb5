//! Driven port for posting JSON payloads to an external webhook.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::Error;

use super::define_port_error;

define_port_error! {
    /// Errors raised by webhook adapters.
    pub enum WebhookError {
        /// No webhook endpoint is configured.
        NotConfigured => "webhook endpoint is not configured",
        /// The request could not be sent or the response not read.
        Transport { message: String } => "webhook transport failed: {message}",
        /// The webhook answered with a non-success status.
        Status { status: u16, body: String } => "webhook returned status {status}: {body}",
    }
}

impl From<WebhookError> for Error {
    fn from(error: WebhookError) -> Self {
        Error::service_unavailable("webhook is unavailable").with_cause(match error {
            WebhookError::NotConfigured => "WebhookNotConfigured",
            WebhookError::Transport { .. } => "WebhookTransport",
            WebhookError::Status { .. } => "WebhookStatus",
        })
    }
}

/// Outbound webhook.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WebhookClient: Send + Sync {
    /// POST `payload` and return the response body.
    async fn post(&self, payload: &Value) -> Result<String, WebhookError>;
}

/// Client used when no webhook URL is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnconfiguredWebhookClient;

#[async_trait]
impl WebhookClient for UnconfiguredWebhookClient {
    async fn post(&self, _payload: &Value) -> Result<String, WebhookError> {
        Err(WebhookError::not_configured())
    }
}
