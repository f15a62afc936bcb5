//! Problem response body returned for every failed request.
//!
//! The body follows the problem-details layout: `title` is the status name,
//! `detail` the reason phrase and `errors` the client-facing entries built by
//! the error normalizer.

use actix_web::http::StatusCode;
use chrono::Local;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{ErrorDetail, TraceId};

use super::schemas::ErrorDetailSchema;

/// Media type of problem responses.
pub const PROBLEM_JSON: &str = "application/problem+json";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Uniform error body.
///
/// # Examples
/// ```
/// use actix_web::http::StatusCode;
/// use company_api::domain::ErrorDetail;
/// use company_api::inbound::http::problem::ProblemResponse;
///
/// let body = ProblemResponse::new(StatusCode::BAD_REQUEST, vec![ErrorDetail::new("bad")]);
/// assert_eq!(body.title(), "BAD_REQUEST");
/// assert_eq!(body.detail(), "Bad Request");
/// assert_eq!(body.status(), 400);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProblemResponse {
    /// Status name, for example `BAD_REQUEST`.
    #[schema(example = "UNAUTHORIZED")]
    title: String,
    /// Reason phrase of the status.
    #[schema(example = "Unauthorized")]
    detail: String,
    /// Numeric HTTP status.
    #[schema(example = 401)]
    status: u16,
    /// Client-facing error entries.
    #[schema(value_type = Vec<ErrorDetailSchema>)]
    errors: Vec<ErrorDetail>,
    /// Local server time at which the body was built.
    #[schema(example = "2024-05-01T10:15:30")]
    timestamp: String,
    /// Trace identifier of the failed request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: Option<String>,
}

impl ProblemResponse {
    /// Build a body for `status`, stamping the current time and trace id.
    pub fn new(status: StatusCode, errors: Vec<ErrorDetail>) -> Self {
        Self {
            title: status_name(status),
            detail: status
                .canonical_reason()
                .map_or_else(|| status.as_str().to_owned(), str::to_owned),
            status: status.as_u16(),
            errors,
            timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
            id: TraceId::current().map(|id| id.to_string()),
        }
    }

    /// Replace the trace identifier, keeping the scoped one when `id` is `None`.
    pub fn with_id(mut self, id: Option<&str>) -> Self {
        if let Some(id) = id {
            self.id = Some(id.to_owned());
        }
        self
    }

    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    pub fn detail(&self) -> &str {
        self.detail.as_str()
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn errors(&self) -> &[ErrorDetail] {
        &self.errors
    }

    pub fn timestamp(&self) -> &str {
        self.timestamp.as_str()
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

/// Upper snake-case name of a status, e.g. `SERVICE_UNAVAILABLE`.
///
/// Codes the service emits use fixed names; any other code is derived from
/// its reason phrase.
pub(crate) fn status_name(status: StatusCode) -> String {
    let fixed = match status {
        StatusCode::OK => "OK",
        StatusCode::CREATED => "CREATED",
        StatusCode::ACCEPTED => "ACCEPTED",
        StatusCode::BAD_REQUEST => "BAD_REQUEST",
        StatusCode::UNAUTHORIZED => "UNAUTHORIZED",
        StatusCode::FORBIDDEN => "FORBIDDEN",
        StatusCode::NOT_FOUND => "NOT_FOUND",
        StatusCode::CONFLICT => "CONFLICT",
        StatusCode::IM_A_TEAPOT => "I_AM_A_TEAPOT",
        StatusCode::INTERNAL_SERVER_ERROR => "INTERNAL_SERVER_ERROR",
        StatusCode::SERVICE_UNAVAILABLE => "SERVICE_UNAVAILABLE",
        other => return reason_name(other),
    };
    fixed.to_owned()
}

fn reason_name(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => reason
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_uppercase()
                } else {
                    '_'
                }
            })
            .collect(),
        None => status.as_str().to_owned(),
    }
}
