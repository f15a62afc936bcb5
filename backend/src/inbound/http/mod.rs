//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod companies;
pub mod error;
pub mod health;
pub mod me;
pub mod problem;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;
pub mod webhooks;

pub use error::ApiResult;
