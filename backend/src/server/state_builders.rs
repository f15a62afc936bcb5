//! Builders selecting adapters for each port from the loaded settings.

use std::sync::Arc;

use actix_web::web;
use tracing::{info, warn};

use company_api::domain::ports::{
    ApiKeyRepository, BestEffortPublisher, EventPublisher, FixtureApiKeyRepository,
    UnconfiguredWebhookClient, WebhookClient,
};
use company_api::domain::{ApiKeyAuthenticator, CompanyRegistrationService};
use company_api::inbound::http::state::HttpState;
use company_api::middleware::ApiKeyAuth;
use company_api::outbound::events::LogEventSink;
use company_api::outbound::persistence::{DbPool, DieselApiKeyRepository, PoolConfig};
use company_api::outbound::webhook::HttpWebhookClient;

use super::config::ServerSettings;

/// Adapters shared by every worker.
#[derive(Clone)]
pub struct AppPorts {
    pub http_state: web::Data<HttpState>,
    pub api_key_auth: ApiKeyAuth,
}

/// Select the key store: Diesel when a pool is available, fixture keys
/// otherwise.
pub(super) fn build_key_store(
    pool: Option<DbPool>,
    fixture: FixtureApiKeyRepository,
) -> Arc<dyn ApiKeyRepository> {
    match pool {
        Some(pool) => Arc::new(DieselApiKeyRepository::new(pool)),
        None => {
            if fixture.is_empty() {
                warn!("no database or fixture api keys configured; all api requests will be rejected");
            }
            Arc::new(fixture)
        }
    }
}

/// Webhook client and event publisher for the configured endpoint.
pub(super) fn build_webhook_ports(
    webhook: Option<HttpWebhookClient>,
) -> (Arc<dyn WebhookClient>, Arc<dyn EventPublisher>) {
    match webhook {
        Some(client) => {
            let client = Arc::new(client);
            (
                client.clone() as Arc<dyn WebhookClient>,
                Arc::new(BestEffortPublisher::new(client)) as Arc<dyn EventPublisher>,
            )
        }
        None => (
            Arc::new(UnconfiguredWebhookClient),
            Arc::new(BestEffortPublisher::new(LogEventSink)),
        ),
    }
}

/// Connect adapters described by `settings`.
///
/// # Errors
/// Returns [`std::io::Error`] when settings are malformed, the pool cannot be
/// built, or the webhook client cannot be constructed.
pub(super) async fn build_ports(settings: &ServerSettings) -> std::io::Result<AppPorts> {
    let header_name = settings.api_key_header().map_err(std::io::Error::other)?;

    let pool = match settings.database_url.as_deref() {
        Some(url) => {
            let config = PoolConfig::new(url).with_max_size(settings.pool_size());
            let pool = DbPool::new(config).await.map_err(std::io::Error::other)?;
            info!("key store backed by PostgreSQL");
            Some(pool)
        }
        None => None,
    };
    let fixture = settings
        .fixture_api_keys()
        .map_err(std::io::Error::other)?
        .into_iter()
        .fold(FixtureApiKeyRepository::default(), |repo, (key, record)| {
            repo.with_key(key, record)
        });
    let key_store = build_key_store(pool, fixture);

    let webhook = settings
        .webhook_url()
        .map_err(std::io::Error::other)?
        .map(|url| HttpWebhookClient::new(url, settings.webhook_timeout()))
        .transpose()
        .map_err(std::io::Error::other)?;
    let (webhook, publisher) = build_webhook_ports(webhook);

    let registrations = CompanyRegistrationService::new(publisher, settings.event_exchange());
    let http_state = web::Data::new(HttpState::new(registrations).with_webhook(webhook));
    let api_key_auth = ApiKeyAuth::new(header_name, ApiKeyAuthenticator::new(key_store));

    Ok(AppPorts {
        http_state,
        api_key_auth,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use company_api::domain::{ApiKey, ApiKeyRecord};
    use rstest::rstest;
    use serde_json::Value;

    fn record() -> ApiKeyRecord {
        ApiKeyRecord {
            id: 1,
            company_slug: "my-company-test".to_owned(),
            company_email: None,
        }
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_store_is_used_without_a_pool() {
        let store = build_key_store(
            None,
            FixtureApiKeyRepository::default().with_key("my-apikey-test", record()),
        );

        let key = ApiKey::from_header_value("my-apikey-test").expect("non-blank key");
        let found = store.find_by_key(&key).await.expect("fixture lookup");

        assert_eq!(found, Some(record()));
    }

    #[rstest]
    #[tokio::test]
    async fn missing_webhook_leaves_the_relay_unconfigured() {
        let (webhook, _publisher) = build_webhook_ports(None);

        let result = webhook.post(&Value::Null).await;

        assert!(result.is_err());
    }
}
