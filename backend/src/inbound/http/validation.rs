//! Extractor error handlers for inbound HTTP adapters.
//!
//! Actix rejects malformed bodies, query strings and path segments before a
//! handler runs. These handlers turn those rejections into
//! [`Failure::Validation`] so they are normalised like any other validation
//! failure.

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{HttpRequest, web};

use crate::domain::{Failure, FieldViolation};

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &'static str {
        self.0
    }
}

const BODY: FieldName = FieldName::new("body");
const QUERY: FieldName = FieldName::new("query");
const PATH: FieldName = FieldName::new("path");

fn rejected(field: FieldName, message: impl Into<String>) -> actix_web::Error {
    Failure::validation([FieldViolation::new(field.as_str(), message)]).into()
}

fn json_message(err: &JsonPayloadError) -> String {
    match err {
        JsonPayloadError::ContentType => "expected an application/json body".to_owned(),
        JsonPayloadError::Deserialize(inner) => inner.to_string(),
        other => other.to_string(),
    }
}

/// JSON extractor configuration reporting body errors as validation failures.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
        rejected(BODY, json_message(&err))
    })
}

/// Query extractor configuration reporting parse errors as validation failures.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err: QueryPayloadError, _req: &HttpRequest| {
        rejected(QUERY, err.to_string())
    })
}

/// Path extractor configuration reporting parse errors as validation failures.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|err: PathError, _req: &HttpRequest| rejected(PATH, err.to_string()))
}
