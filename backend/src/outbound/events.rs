//! Event sink that writes events to the structured log.

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{EventSink, EventSinkError, OutboundEvent};

/// Sink used when no broker or webhook is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogEventSink;

#[async_trait]
impl EventSink for LogEventSink {
    async fn send(&self, event: &OutboundEvent) -> Result<(), EventSinkError> {
        let payload = serde_json::to_string(&event.payload)
            .map_err(|err| EventSinkError::encoding(err.to_string()))?;
        info!(
            target: "company_api::events",
            exchange = %event.exchange,
            routing_key = %event.routing_key,
            trace_id = event.trace_id.as_deref().unwrap_or_default(),
            payload = %payload,
            "event emitted"
        );
        Ok(())
    }
}
