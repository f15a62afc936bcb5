//! Failure taxonomy for request processing.
//!
//! Every failure that can reach the HTTP boundary is one [`Failure`] variant.
//! The inbound adapter matches the variants exhaustively to build exactly one
//! problem response per failed request; nothing propagates unconverted.

use crate::domain::Error;

/// A single rejected field from request validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    field: String,
    message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn field(&self) -> &str {
        self.field.as_str()
    }

    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

/// A constraint broken at a property path (for example `owner.email`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintViolation {
    path: String,
    message: String,
}

impl ConstraintViolation {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn path(&self) -> &str {
        self.path.as_str()
    }

    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

/// Kind of persistence failure, kept for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistenceKind {
    UniqueViolation,
    ForeignKeyViolation,
    IntegrityViolation,
    BatchUpdate,
    Generic,
}

/// Persistence or integrity failure reported by a storage adapter.
///
/// `cause` is the message of the most deeply nested cause, verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistenceFailure {
    kind: PersistenceKind,
    cause: String,
}

impl PersistenceFailure {
    pub fn new(kind: PersistenceKind, cause: impl Into<String>) -> Self {
        Self {
            kind,
            cause: cause.into(),
        }
    }

    pub fn kind(&self) -> PersistenceKind {
        self.kind
    }

    /// Message of the most specific cause.
    pub fn cause(&self) -> &str {
        self.cause.as_str()
    }
}

/// Any failure raised while handling a request.
///
/// # Examples
/// ```
/// use company_api::domain::{Failure, FieldViolation};
///
/// let failure = Failure::validation([
///     FieldViolation::new("email", "must not be blank"),
///     FieldViolation::new("name", "must not be blank"),
/// ]);
/// assert!(matches!(failure, Failure::Validation(ref v) if v.len() == 2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Failure {
    /// Field or argument validation, possibly several fields at once.
    #[error("validation failed for {} field(s)", .0.len())]
    Validation(Vec<FieldViolation>),
    /// Constraint violations reported against property paths.
    #[error("constraint validation failed for {} path(s)", .0.len())]
    Constraint(Vec<ConstraintViolation>),
    /// Unique constraint, integrity or batch failures from storage.
    #[error("persistence failure: {}", .0.cause())]
    Persistence(PersistenceFailure),
    /// The caller is authenticated but not allowed to perform the action.
    #[error("access denied: {message}")]
    AuthorizationDenied { message: String },
    /// A lookup by identifier returned nothing.
    #[error("empty result: {message}")]
    NotFound { message: String },
    /// Lazily loaded data was accessed after its source was closed.
    #[error("deferred load failed: {message}")]
    DeferredLoad { message: String },
    /// Application-raised error carrying its own category.
    #[error(transparent)]
    Domain(Error),
    /// Writing the response body failed; `intended_status` is the status the
    /// handler meant to send.
    #[error("response serialisation failed: {message}")]
    Serialization { intended_status: u16, message: String },
    /// Anything else.
    #[error("unhandled failure: {message}")]
    Unclassified { message: String },
}

impl Failure {
    pub fn validation(violations: impl IntoIterator<Item = FieldViolation>) -> Self {
        Self::Validation(violations.into_iter().collect())
    }

    pub fn constraint(violations: impl IntoIterator<Item = ConstraintViolation>) -> Self {
        Self::Constraint(violations.into_iter().collect())
    }

    pub fn persistence(kind: PersistenceKind, cause: impl Into<String>) -> Self {
        Self::Persistence(PersistenceFailure::new(kind, cause))
    }

    pub fn authorization_denied(message: impl Into<String>) -> Self {
        Self::AuthorizationDenied {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn deferred_load(message: impl Into<String>) -> Self {
        Self::DeferredLoad {
            message: message.into(),
        }
    }

    pub fn serialization(intended_status: u16, message: impl Into<String>) -> Self {
        Self::Serialization {
            intended_status,
            message: message.into(),
        }
    }

    pub fn unclassified(message: impl Into<String>) -> Self {
        Self::Unclassified {
            message: message.into(),
        }
    }

    /// Stable label for logs.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Constraint(_) => "constraint",
            Self::Persistence(_) => "persistence",
            Self::AuthorizationDenied { .. } => "authorization_denied",
            Self::NotFound { .. } => "not_found",
            Self::DeferredLoad { .. } => "deferred_load",
            Self::Domain(_) => "domain",
            Self::Serialization { .. } => "serialization",
            Self::Unclassified { .. } => "unclassified",
        }
    }
}

impl From<Error> for Failure {
    fn from(error: Error) -> Self {
        Self::Domain(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Failure::Validation(Vec::new()), "validation")]
    #[case(Failure::Constraint(Vec::new()), "constraint")]
    #[case(Failure::persistence(PersistenceKind::Generic, "x"), "persistence")]
    #[case(Failure::authorization_denied("x"), "authorization_denied")]
    #[case(Failure::not_found("x"), "not_found")]
    #[case(Failure::deferred_load("x"), "deferred_load")]
    #[case(Failure::from(Error::conflict("x")), "domain")]
    #[case(Failure::serialization(200, "x"), "serialization")]
    #[case(Failure::unclassified("x"), "unclassified")]
    fn category_labels_are_stable(#[case] failure: Failure, #[case] expected: &str) {
        assert_eq!(failure.category(), expected);
    }

    #[rstest]
    fn domain_display_is_the_error_message() {
        let failure = Failure::from(Error::conflict("slug already taken"));
        assert_eq!(failure.to_string(), "slug already taken");
    }

    #[rstest]
    fn validation_preserves_violation_order() {
        let Failure::Validation(violations) = Failure::validation([
            FieldViolation::new("email", "must not be blank"),
            FieldViolation::new("name", "must not be blank"),
        ]) else {
            panic!("expected a validation failure");
        };
        let fields: Vec<&str> = violations.iter().map(FieldViolation::field).collect();
        assert_eq!(fields, ["email", "name"]);
    }
}
