//! Identity extractors used by HTTP handlers.
//!
//! Keep the HTTP modules focused on request/response mapping by reading the
//! principal attached by [`crate::middleware::ApiKeyAuth`] here.

use actix_web::{FromRequest, HttpMessage, HttpRequest, dev::Payload};
use futures_util::future::{Ready, ready};

use crate::domain::{AuthenticatedPrincipal, AuthenticationError, Failure};

/// Principal of a request that passed API-key authentication.
///
/// Extraction fails with `401` when no principal is attached, for example
/// when a route is mounted outside the authenticated scope.
#[derive(Debug, Clone)]
pub struct Authenticated(pub AuthenticatedPrincipal);

impl Authenticated {
    pub fn principal(&self) -> &AuthenticatedPrincipal {
        &self.0
    }
}

impl FromRequest for Authenticated {
    type Error = Failure;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<AuthenticatedPrincipal>()
                .cloned()
                .map(Self)
                .ok_or_else(|| Failure::from(AuthenticationError::Unauthenticated)),
        )
    }
}

/// Optional view of the caller's identity.
///
/// Slug and email read as empty strings when the request carries no
/// API-key principal.
#[derive(Debug, Clone, Default)]
pub struct RequestIdentity(Option<AuthenticatedPrincipal>);

impl RequestIdentity {
    pub fn principal(&self) -> Option<&AuthenticatedPrincipal> {
        self.0.as_ref()
    }

    pub fn company_slug(&self) -> &str {
        self.0
            .as_ref()
            .map_or("", AuthenticatedPrincipal::company_slug)
    }

    pub fn email(&self) -> &str {
        self.0.as_ref().map_or("", AuthenticatedPrincipal::email)
    }
}

impl FromRequest for RequestIdentity {
    type Error = std::convert::Infallible;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(Self(
            req.extensions().get::<AuthenticatedPrincipal>().cloned(),
        )))
    }
}
