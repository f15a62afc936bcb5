//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain services and ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::CompanyRegistrationService;
use crate::domain::ports::{UnconfiguredWebhookClient, WebhookClient};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub registrations: CompanyRegistrationService,
    pub webhook: Arc<dyn WebhookClient>,
}

impl HttpState {
    /// State with no webhook configured.
    pub fn new(registrations: CompanyRegistrationService) -> Self {
        Self {
            registrations,
            webhook: Arc::new(UnconfiguredWebhookClient),
        }
    }

    #[must_use]
    pub fn with_webhook(mut self, webhook: Arc<dyn WebhookClient>) -> Self {
        self.webhook = webhook;
        self
    }
}
