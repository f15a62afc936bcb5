//! Server settings loaded via OrthoConfig.
//!
//! Every field is optional so an empty environment boots a development
//! server on fixture adapters. Accessors apply the defaults.

use std::net::SocketAddr;
use std::time::Duration;

use actix_web::http::header::HeaderName;
use company_api::domain::ApiKeyRecord;
use company_api::middleware::DEFAULT_API_KEY_HEADER;
use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_POOL_SIZE: u32 = 10;
const DEFAULT_WEBHOOK_TIMEOUT_SECS: u64 = 10;
const DEFAULT_EVENT_EXCHANGE: &str = "company";

/// Configuration values controlling the HTTP server and its adapters.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "COMPANY_API")]
pub struct ServerSettings {
    /// Socket address to bind, e.g. `127.0.0.1:8080`.
    pub bind_addr: Option<String>,
    /// Header carrying the API key.
    pub api_key_header: Option<String>,
    /// PostgreSQL URL for the key store. Fixture keys are used when absent.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    pub pool_size: Option<u32>,
    /// Webhook endpoint for relayed payloads and published events.
    pub webhook_url: Option<String>,
    /// Webhook request timeout in seconds.
    pub webhook_timeout_secs: Option<u64>,
    /// Exchange name stamped on published events.
    pub event_exchange: Option<String>,
    /// Development keys as `key=slug[=email]` entries separated by commas.
    pub fixture_api_keys: Option<String>,
}

/// Settings that could not be interpreted.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address {value:?}: {message}")]
    BindAddr { value: String, message: String },
    #[error("invalid api key header {value:?}")]
    HeaderName { value: String },
    #[error("invalid webhook url {value:?}: {message}")]
    WebhookUrl { value: String, message: String },
    #[error("invalid fixture api key entry {entry:?}")]
    FixtureKey { entry: String },
}

impl ServerSettings {
    /// Parse the bind address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|err: std::net::AddrParseError| SettingsError::BindAddr {
            value: value.to_owned(),
            message: err.to_string(),
        })
    }

    /// Parse the API-key header name, falling back to `x-api-key`.
    pub fn api_key_header(&self) -> Result<HeaderName, SettingsError> {
        let value = self
            .api_key_header
            .as_deref()
            .unwrap_or(DEFAULT_API_KEY_HEADER);
        HeaderName::try_from(value).map_err(|_| SettingsError::HeaderName {
            value: value.to_owned(),
        })
    }

    pub fn pool_size(&self) -> u32 {
        self.pool_size.unwrap_or(DEFAULT_POOL_SIZE)
    }

    /// Parse the webhook URL when one is configured.
    pub fn webhook_url(&self) -> Result<Option<Url>, SettingsError> {
        self.webhook_url
            .as_deref()
            .map(|value| {
                Url::parse(value).map_err(|err| SettingsError::WebhookUrl {
                    value: value.to_owned(),
                    message: err.to_string(),
                })
            })
            .transpose()
    }

    pub fn webhook_timeout(&self) -> Duration {
        Duration::from_secs(
            self.webhook_timeout_secs
                .unwrap_or(DEFAULT_WEBHOOK_TIMEOUT_SECS),
        )
    }

    pub fn event_exchange(&self) -> &str {
        self.event_exchange
            .as_deref()
            .unwrap_or(DEFAULT_EVENT_EXCHANGE)
    }

    /// Parse the development key list. Record ids follow entry order from 1.
    pub fn fixture_api_keys(&self) -> Result<Vec<(String, ApiKeyRecord)>, SettingsError> {
        let Some(raw) = self.fixture_api_keys.as_deref() else {
            return Ok(Vec::new());
        };
        raw.split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .zip(1_i64..)
            .map(|(entry, id)| parse_fixture_key(entry, id))
            .collect()
    }
}

fn parse_fixture_key(entry: &str, id: i64) -> Result<(String, ApiKeyRecord), SettingsError> {
    let invalid = || SettingsError::FixtureKey {
        entry: entry.to_owned(),
    };
    let mut parts = entry.splitn(3, '=').map(str::trim);
    let key = parts.next().filter(|key| !key.is_empty()).ok_or_else(invalid)?;
    let slug = parts.next().filter(|slug| !slug.is_empty()).ok_or_else(invalid)?;
    let email = parts.next().filter(|email| !email.is_empty());
    Ok((
        key.to_owned(),
        ApiKeyRecord {
            id,
            company_slug: slug.to_owned(),
            company_email: email.map(str::to_owned),
        },
    ))
}
