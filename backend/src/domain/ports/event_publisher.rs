//! Outbound event publication.
//!
//! Two ports split the contract explicitly:
//!
//! - [`EventSink`] is the fallible transport (broker, webhook, log).
//! - [`EventPublisher`] is what services call. It returns `()`: publication
//!   is best-effort and never fails the caller.
//!
//! [`BestEffortPublisher`] adapts any sink to the publisher contract by
//! logging sink failures instead of returning them.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info};

use crate::domain::TraceId;

use super::define_port_error;

define_port_error! {
    /// Errors raised by event sinks.
    pub enum EventSinkError {
        /// The payload could not be encoded for the transport.
        Encoding { message: String } => "event encoding failed: {message}",
        /// The transport refused or failed to deliver the event.
        Delivery { message: String } => "event delivery failed: {message}",
    }
}

/// Event handed to a sink.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundEvent {
    pub exchange: String,
    pub routing_key: String,
    pub payload: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
}

impl OutboundEvent {
    /// Build an event, tagging it with the trace id in scope.
    pub fn new(exchange: impl Into<String>, routing_key: impl Into<String>, payload: Value) -> Self {
        Self {
            exchange: exchange.into(),
            routing_key: routing_key.into(),
            payload,
            trace_id: TraceId::current().map(|id| id.to_string()),
        }
    }
}

/// Fallible event transport.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn send(&self, event: &OutboundEvent) -> Result<(), EventSinkError>;
}

#[async_trait]
impl<S> EventSink for Arc<S>
where
    S: EventSink + ?Sized,
{
    async fn send(&self, event: &OutboundEvent) -> Result<(), EventSinkError> {
        (**self).send(event).await
    }
}

/// Best-effort event publication. Implementations must not fail the caller.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, event: OutboundEvent);
}

/// Publisher that forwards to a sink and logs delivery failures.
pub struct BestEffortPublisher<S> {
    sink: S,
}

impl<S> BestEffortPublisher<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }
}

#[async_trait]
impl<S> EventPublisher for BestEffortPublisher<S>
where
    S: EventSink,
{
    async fn publish(&self, event: OutboundEvent) {
        match self.sink.send(&event).await {
            Ok(()) => info!(
                exchange = %event.exchange,
                routing_key = %event.routing_key,
                trace_id = event.trace_id.as_deref().unwrap_or_default(),
                "event published"
            ),
            Err(err) => error!(
                error = %err,
                exchange = %event.exchange,
                routing_key = %event.routing_key,
                payload = %event.payload,
                "event publication failed"
            ),
        }
    }
}

/// Publisher that drops every event; for wiring without a sink.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpEventPublisher;

#[async_trait]
impl EventPublisher for NoOpEventPublisher {
    async fn publish(&self, _event: OutboundEvent) {}
}
