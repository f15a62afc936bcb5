//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorDetail`].
///
/// One client-facing entry of a problem response.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorDetail)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorDetailSchema {
    /// Classifier of the failure, when known.
    #[schema(example = "ValidationException")]
    name: Option<String>,
    /// Human-readable reason; never empty.
    #[schema(example = "email: must not be blank")]
    reason: String,
    /// Field or property path implicated by the failure.
    #[schema(example = "email")]
    pointer: Option<String>,
}

/// OpenAPI schema for [`crate::domain::AuthenticatedPrincipal`].
#[derive(ToSchema)]
#[schema(as = crate::domain::AuthenticatedPrincipal, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct AuthenticatedPrincipalSchema {
    /// Identifier of the matched API key.
    #[schema(example = 1)]
    subject_id: i64,
    /// Slug of the company owning the key.
    #[schema(example = "my-company-test")]
    company_slug: String,
    /// Company contact email, empty when unknown.
    #[schema(example = "test@gmail.com")]
    email: String,
    authenticated: bool,
}

/// OpenAPI schema for [`crate::domain::CompanyDraft`].
#[derive(ToSchema)]
#[schema(as = crate::domain::CompanyDraft)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct CompanyDraftSchema {
    #[schema(example = "Acme")]
    name: String,
    #[schema(example = "ops@acme.test")]
    email: String,
    #[schema(example = "acme")]
    slug: String,
    /// Digits only.
    #[schema(example = "15550109999")]
    phone: Option<String>,
}
