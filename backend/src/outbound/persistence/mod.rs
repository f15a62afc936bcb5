//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repository implementations only translate between Diesel rows and domain
//! types. Row structs and schema definitions stay private to this module.
//!
//! # Example
//!
//! ```ignore
//! use company_api::outbound::persistence::{DbPool, DieselApiKeyRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/company")).await?;
//! let keys = DieselApiKeyRepository::new(pool);
//! ```

mod diesel_api_key_repository;
mod error_mapping;
mod models;
mod pool;
mod schema;

pub use diesel_api_key_repository::DieselApiKeyRepository;
pub use error_mapping::{failure_from_diesel, map_diesel_error, map_pool_error};
pub use pool::{DbPool, PoolConfig, PoolError};
