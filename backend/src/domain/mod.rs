//! Domain primitives, services and ports.
//!
//! Purpose: define the transport-agnostic core of the service. Failures are
//! modelled as [`Failure`] values and only turned into problem responses by
//! the inbound HTTP adapter. Credentials, principals and trace identifiers
//! are typed values passed explicitly between layers.
//!
//! Public surface:
//! - [`Error`], [`ErrorCode`], [`ErrorDetail`]: application-raised errors.
//! - [`Failure`]: every failure that can reach the HTTP boundary.
//! - [`extract_persistence_detail`]: client reason for storage failures.
//! - [`ApiKey`], [`AuthenticatedPrincipal`], [`ApiKeyAuthenticator`]:
//!   API-key authentication.
//! - [`CompanyDraft`], [`CompanyRegistrationService`]: registration intake.
//! - [`TraceId`]: request-scoped correlation identifier.

pub mod api_key_authenticator;
pub mod auth;
pub mod company_registration;
pub mod error;
pub mod failure;
pub mod persistence_detail;
pub mod ports;
pub mod trace_id;

pub use self::api_key_authenticator::ApiKeyAuthenticator;
pub use self::auth::{ApiKey, ApiKeyRecord, AuthenticatedPrincipal, AuthenticationError};
pub use self::company_registration::{
    COMPANY_REGISTERED_ROUTING_KEY, CompanyDraft, CompanyDraftInput, CompanyRegistrationService,
};
pub use self::error::{Error, ErrorCode, ErrorDetail, ErrorValidationError, GENERIC_ERROR_MESSAGE};
pub use self::failure::{
    ConstraintViolation, Failure, FieldViolation, PersistenceFailure, PersistenceKind,
};
pub use self::persistence_detail::extract_persistence_detail;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
