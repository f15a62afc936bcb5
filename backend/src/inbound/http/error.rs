//! HTTP adapter mapping for failures.
//!
//! Purpose: keep [`Failure`] HTTP-agnostic while turning every failed request
//! into exactly one [`ProblemResponse`]. The mapping matches the failure
//! variants exhaustively; adding a variant is a compile error here until it
//! is classified.

use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::domain::{
    ErrorCode, ErrorDetail, Failure, GENERIC_ERROR_MESSAGE, TRACE_ID_HEADER,
    extract_persistence_detail,
};

use super::problem::{PROBLEM_JSON, ProblemResponse};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Failure>;

/// Detail name attached to field validation entries.
pub const VALIDATION_DETAIL_NAME: &str = "ValidationException";

/// Reason reported for empty lookups.
pub const NOT_FOUND_REASON: &str = "no record found for this id";

pub(crate) fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn status_of(failure: &Failure) -> StatusCode {
    match failure {
        Failure::Validation(_) | Failure::Constraint(_) | Failure::Persistence(_) => {
            StatusCode::BAD_REQUEST
        }
        Failure::AuthorizationDenied { .. } => StatusCode::FORBIDDEN,
        Failure::NotFound { .. } => StatusCode::NOT_FOUND,
        Failure::DeferredLoad { .. } | Failure::Unclassified { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        Failure::Domain(error) => status_for(error.code()),
        Failure::Serialization {
            intended_status, ..
        } => StatusCode::from_u16(*intended_status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

fn generic_detail() -> Vec<ErrorDetail> {
    vec![ErrorDetail::new(GENERIC_ERROR_MESSAGE)]
}

/// Client-facing entries for a failure.
pub(crate) fn error_details(failure: &Failure) -> Vec<ErrorDetail> {
    match failure {
        Failure::Validation(violations) if violations.is_empty() => generic_detail(),
        Failure::Constraint(violations) if violations.is_empty() => generic_detail(),
        Failure::Validation(violations) => violations
            .iter()
            .map(|violation| {
                ErrorDetail::new(format!("{}: {}", violation.field(), violation.message()))
                    .with_name(VALIDATION_DETAIL_NAME)
                    .with_pointer(violation.field())
            })
            .collect(),
        Failure::Constraint(violations) => violations
            .iter()
            .map(|violation| {
                ErrorDetail::new(format!("{}: {}", violation.path(), violation.message()))
                    .with_pointer(violation.path())
            })
            .collect(),
        Failure::Persistence(persistence) => {
            vec![ErrorDetail::new(extract_persistence_detail(persistence.cause()))]
        }
        Failure::AuthorizationDenied { .. } => Vec::new(),
        Failure::NotFound { .. } => vec![ErrorDetail::new(NOT_FOUND_REASON)],
        Failure::Domain(error) if !error.errors().is_empty() => error.errors().to_vec(),
        Failure::Domain(error) => {
            vec![ErrorDetail::new(error.message()).with_name(error.cause_name())]
        }
        Failure::DeferredLoad { .. }
        | Failure::Serialization { .. }
        | Failure::Unclassified { .. } => generic_detail(),
    }
}

fn is_internal(failure: &Failure) -> bool {
    matches!(
        failure,
        Failure::DeferredLoad { .. } | Failure::Serialization { .. } | Failure::Unclassified { .. }
    )
}

fn log_failure(failure: &Failure, status: StatusCode) {
    let category = failure.category();
    let status = status.as_u16();
    if let Failure::Persistence(persistence) = failure {
        info!(
            category,
            status,
            kind = ?persistence.kind(),
            cause = persistence.cause(),
            "request failed"
        );
    } else if is_internal(failure) || status >= 500 {
        warn!(category, status, error = %failure, "request failed");
    } else {
        info!(category, status, error = %failure, "request failed");
    }
}

/// Build the problem body for a failure, logging it first.
pub fn normalize(failure: &Failure) -> ProblemResponse {
    let status = status_of(failure);
    log_failure(failure, status);
    let trace_id = match failure {
        Failure::Domain(error) => error.trace_id(),
        _ => None,
    };
    ProblemResponse::new(status, error_details(failure)).with_id(trace_id)
}

impl ResponseError for Failure {
    fn status_code(&self) -> StatusCode {
        status_of(self)
    }

    fn error_response(&self) -> HttpResponse {
        let problem = normalize(self);
        let status =
            StatusCode::from_u16(problem.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = match serde_json::to_vec(&problem) {
            Ok(body) => body,
            Err(err) => {
                error!(error = %err, "failed to encode problem response");
                return HttpResponse::InternalServerError().finish();
            }
        };

        let mut builder = HttpResponse::build(status);
        builder.content_type(PROBLEM_JSON);
        if let Some(id) = problem.id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.body(body)
    }
}

impl From<actix_web::Error> for Failure {
    fn from(err: actix_web::Error) -> Self {
        Failure::unclassified(err.to_string())
    }
}

/// Serialise `value` as a JSON response with `status`.
///
/// A value that fails to serialise becomes a [`Failure::Serialization`]
/// carrying `status`, so the client still sees the intended status code.
///
/// # Examples
/// ```
/// use actix_web::http::StatusCode;
/// use company_api::inbound::http::error::json_response;
///
/// let response = json_response(StatusCode::ACCEPTED, &serde_json::json!({"ok": true}))
///     .expect("plain JSON serialises");
/// assert_eq!(response.status(), StatusCode::ACCEPTED);
/// ```
pub fn json_response<T>(status: StatusCode, value: &T) -> ApiResult<HttpResponse>
where
    T: Serialize + ?Sized,
{
    let body = serde_json::to_vec(value)
        .map_err(|err| Failure::serialization(status.as_u16(), err.to_string()))?;
    Ok(HttpResponse::build(status)
        .content_type(ContentType::json())
        .body(body))
}
