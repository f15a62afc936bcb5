//! Diesel error mapping shared by the persistence adapters.
//!
//! Two targets:
//!
//! - [`failure_from_diesel`] keeps the driver's message so the HTTP adapter
//!   can derive a client reason from `Detail: Key (...)=(...)` text.
//! - [`map_diesel_error`] collapses errors into port errors with fixed
//!   messages for lookups whose failure is never shown to clients.

use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::{Failure, PersistenceKind};

use super::pool::PoolError;

fn persistence_kind(kind: &DatabaseErrorKind) -> PersistenceKind {
    match kind {
        DatabaseErrorKind::UniqueViolation => PersistenceKind::UniqueViolation,
        DatabaseErrorKind::ForeignKeyViolation => PersistenceKind::ForeignKeyViolation,
        DatabaseErrorKind::NotNullViolation | DatabaseErrorKind::CheckViolation => {
            PersistenceKind::IntegrityViolation
        }
        _ => PersistenceKind::Generic,
    }
}

/// Rebuild the PostgreSQL driver layout `ERROR: <message>  Detail: <details>`.
fn driver_message(info: &dyn DatabaseErrorInformation) -> String {
    match info.details() {
        Some(details) => format!("ERROR: {}  Detail: {details}", info.message()),
        None => format!("ERROR: {}", info.message()),
    }
}

/// Classify a Diesel error as a request failure.
pub fn failure_from_diesel(error: DieselError) -> Failure {
    match error {
        DieselError::NotFound => Failure::not_found("record not found"),
        DieselError::DatabaseError(kind, info) => {
            Failure::persistence(persistence_kind(&kind), driver_message(info.as_ref()))
        }
        other => Failure::persistence(PersistenceKind::Generic, other.to_string()),
    }
}

impl From<DieselError> for Failure {
    fn from(error: DieselError) -> Self {
        failure_from_diesel(error)
    }
}

impl From<PoolError> for Failure {
    fn from(error: PoolError) -> Self {
        Failure::unclassified(error.to_string())
    }
}

/// Map pool errors into a port's connection error constructor.
pub fn map_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    connection(error.message().to_owned())
}

/// Map Diesel errors into a port's query and connection constructors.
pub fn map_diesel_error<E, Q, C>(error: DieselError, query: Q, connection: C) -> E
where
    Q: FnOnce(&'static str) -> E,
    C: FnOnce(&'static str) -> E,
{
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        _ => query("database error"),
    }
}
