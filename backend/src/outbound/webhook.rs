//! Reqwest-backed webhook adapter.
//!
//! This adapter owns transport details only: JSON request encoding, timeout
//! handling and HTTP status mapping. It serves both the [`WebhookClient`]
//! relay port and, as an [`EventSink`], event publication.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;
use tracing::info;

use crate::domain::ports::{EventSink, EventSinkError, OutboundEvent, WebhookClient, WebhookError};

const USER_AGENT: &str = concat!("company-api/", env!("CARGO_PKG_VERSION"));

/// Webhook adapter posting JSON to one endpoint.
pub struct HttpWebhookClient {
    client: Client,
    endpoint: Url,
}

impl HttpWebhookClient {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl WebhookClient for HttpWebhookClient {
    async fn post(&self, payload: &Value) -> Result<String, WebhookError> {
        info!(endpoint = %self.endpoint, "posting to webhook");
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(payload)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body));
        }
        Ok(body)
    }
}

#[async_trait]
impl EventSink for HttpWebhookClient {
    async fn send(&self, event: &OutboundEvent) -> Result<(), EventSinkError> {
        let payload =
            serde_json::to_value(event).map_err(|err| EventSinkError::encoding(err.to_string()))?;
        self.post(&payload)
            .await
            .map(|_| ())
            .map_err(|err| EventSinkError::delivery(err.to_string()))
    }
}

fn map_transport_error(error: reqwest::Error) -> WebhookError {
    if error.is_timeout() {
        WebhookError::transport(format!("webhook request timed out: {error}"))
    } else {
        WebhookError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: String) -> WebhookError {
    const MAX_BODY_CHARS: usize = 256;
    let body = if body.chars().count() > MAX_BODY_CHARS {
        body.chars().take(MAX_BODY_CHARS).collect()
    } else {
        body
    };
    WebhookError::status(status.as_u16(), body)
}
