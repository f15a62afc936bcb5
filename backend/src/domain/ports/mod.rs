//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod api_key_repository;
mod event_publisher;
mod webhook_client;

#[cfg(test)]
pub use api_key_repository::MockApiKeyRepository;
pub use api_key_repository::{ApiKeyRepository, ApiKeyRepositoryError, FixtureApiKeyRepository};
#[cfg(test)]
pub use event_publisher::MockEventSink;
pub use event_publisher::{
    BestEffortPublisher, EventPublisher, EventSink, EventSinkError, NoOpEventPublisher,
    OutboundEvent,
};
#[cfg(test)]
pub use webhook_client::MockWebhookClient;
pub use webhook_client::{UnconfiguredWebhookClient, WebhookClient, WebhookError};
