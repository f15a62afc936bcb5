//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL key store using Diesel ORM
//! - **webhook**: reqwest client for the webhook relay and event delivery
//! - **events**: log-backed event sink for deployments without a broker
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no business logic.

pub mod events;
pub mod persistence;
pub mod webhook;
