//! API-key authentication middleware.
//!
//! [`ApiKeyAuth`] reads the credential header, runs the
//! [`ApiKeyAuthenticator`] and, on success, stores the
//! [`AuthenticatedPrincipal`] in the request extensions for handlers to pick
//! up through [`crate::inbound::http::auth::Authenticated`]. Rejections are
//! answered with the normalised problem response and the wrapped service is
//! never called.

use std::rc::Rc;
use std::task::{Context, Poll};

use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderMap, HeaderName};
use actix_web::{Error, HttpMessage, ResponseError};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::debug;

use crate::domain::{ApiKey, ApiKeyAuthenticator, Failure};

/// Header carrying the credential unless configured otherwise.
pub const DEFAULT_API_KEY_HEADER: &str = "x-api-key";

/// Read the credential from `headers`.
///
/// Missing, non-UTF-8 and blank values all yield `None`; the validator
/// decides what absence means.
///
/// # Examples
/// ```
/// use actix_web::http::header::{HeaderMap, HeaderName, HeaderValue};
/// use company_api::middleware::api_key::extract_api_key;
///
/// let name = HeaderName::from_static("x-api-key");
/// let mut headers = HeaderMap::new();
/// assert!(extract_api_key(&headers, &name).is_none());
/// headers.insert(name.clone(), HeaderValue::from_static("abc123"));
/// let key = extract_api_key(&headers, &name).expect("header is set");
/// assert_eq!(key.expose(), "abc123");
/// ```
pub fn extract_api_key(headers: &HeaderMap, header_name: &HeaderName) -> Option<ApiKey> {
    headers
        .get(header_name)?
        .to_str()
        .ok()
        .and_then(ApiKey::from_header_value)
}

/// Middleware factory authenticating every request by API key.
#[derive(Clone)]
pub struct ApiKeyAuth {
    header_name: HeaderName,
    authenticator: ApiKeyAuthenticator,
}

impl ApiKeyAuth {
    pub fn new(header_name: HeaderName, authenticator: ApiKeyAuthenticator) -> Self {
        Self {
            header_name,
            authenticator,
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for ApiKeyAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = ApiKeyAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ApiKeyAuthMiddleware {
            service: Rc::new(service),
            header_name: self.header_name.clone(),
            authenticator: self.authenticator.clone(),
        }))
    }
}

/// Service wrapper produced by [`ApiKeyAuth`].
pub struct ApiKeyAuthMiddleware<S> {
    service: Rc<S>,
    header_name: HeaderName,
    authenticator: ApiKeyAuthenticator,
}

impl<S, B> Service<ServiceRequest> for ApiKeyAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let authenticator = self.authenticator.clone();
        let credential = extract_api_key(req.headers(), &self.header_name);

        Box::pin(async move {
            match authenticator.authenticate(credential.as_ref()).await {
                Ok(principal) => {
                    debug!(company_slug = principal.company_slug(), "api-key accepted");
                    req.extensions_mut().insert(principal);
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                Err(rejection) => {
                    let response = Failure::from(rejection).error_response();
                    Ok(req.into_response(response).map_into_right_body())
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::http::header::HeaderValue;
    use actix_web::{App, HttpResponse, test as actix_test, web};
    use rstest::rstest;

    use crate::domain::ports::{ApiKeyRepositoryError, MockApiKeyRepository};
    use crate::domain::{ApiKeyRecord, AuthenticatedPrincipal, GENERIC_ERROR_MESSAGE};
    use crate::inbound::http::problem::ProblemResponse;

    const API_KEY: &str = "my-apikey-test";

    fn header() -> HeaderName {
        HeaderName::from_static(DEFAULT_API_KEY_HEADER)
    }

    fn authenticator(repository: MockApiKeyRepository) -> ApiKeyAuth {
        ApiKeyAuth::new(header(), ApiKeyAuthenticator::new(Arc::new(repository)))
    }

    fn known_key_repository() -> MockApiKeyRepository {
        let mut repository = MockApiKeyRepository::new();
        repository.expect_find_by_key().returning(|candidate| {
            Ok((candidate.expose() == API_KEY).then(|| ApiKeyRecord {
                id: 1,
                company_slug: "my-company-test".to_owned(),
                company_email: Some("test@gmail.com".to_owned()),
            }))
        });
        repository
    }

    async fn echo_slug(req: actix_web::HttpRequest) -> HttpResponse {
        let slug = req
            .extensions()
            .get::<AuthenticatedPrincipal>()
            .map(|principal| principal.company_slug().to_owned())
            .unwrap_or_default();
        HttpResponse::Ok().body(slug)
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("   "))]
    fn blank_or_missing_headers_extract_nothing(#[case] value: Option<&'static str>) {
        let mut headers = HeaderMap::new();
        if let Some(value) = value {
            headers.insert(header(), HeaderValue::from_static(value));
        }
        assert!(extract_api_key(&headers, &header()).is_none());
    }

    #[rstest]
    fn non_utf8_header_extracts_nothing() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header(),
            HeaderValue::from_bytes(&[0xfe, 0xff]).expect("opaque bytes are a valid header"),
        );
        assert!(extract_api_key(&headers, &header()).is_none());
    }

    #[actix_web::test]
    async fn known_key_reaches_the_handler_with_a_principal() {
        let app = actix_test::init_service(
            App::new()
                .wrap(authenticator(known_key_repository()))
                .route("/", web::get().to(echo_slug)),
        )
        .await;
        let req = actix_test::TestRequest::get()
            .uri("/")
            .insert_header((DEFAULT_API_KEY_HEADER, API_KEY))
            .to_request();

        let res = actix_test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(actix_test::read_body(res).await, "my-company-test");
    }

    #[rstest]
    #[case(None, "api-key is not defined on request")]
    #[case(Some("abc123"), "invalid api-key")]
    #[actix_web::test]
    async fn rejected_requests_get_a_401_problem(
        #[case] key: Option<&'static str>,
        #[case] reason: &str,
    ) {
        let app = actix_test::init_service(
            App::new()
                .wrap(authenticator(known_key_repository()))
                .route("/", web::get().to(echo_slug)),
        )
        .await;
        let mut req = actix_test::TestRequest::get().uri("/");
        if let Some(key) = key {
            req = req.insert_header((DEFAULT_API_KEY_HEADER, key));
        }

        let res = actix_test::call_service(&app, req.to_request()).await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let problem: ProblemResponse = actix_test::read_body_json(res).await;
        assert_eq!(problem.title(), "UNAUTHORIZED");
        assert_eq!(problem.errors().len(), 1);
        assert_eq!(problem.errors()[0].reason(), reason);
    }

    #[actix_web::test]
    async fn key_store_outage_is_an_internal_problem() {
        let mut repository = MockApiKeyRepository::new();
        repository
            .expect_find_by_key()
            .returning(|_| Err(ApiKeyRepositoryError::connection("pool timed out")));
        let app = actix_test::init_service(
            App::new()
                .wrap(authenticator(repository))
                .route("/", web::get().to(echo_slug)),
        )
        .await;
        let req = actix_test::TestRequest::get()
            .uri("/")
            .insert_header((DEFAULT_API_KEY_HEADER, API_KEY))
            .to_request();

        let res = actix_test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let problem: ProblemResponse = actix_test::read_body_json(res).await;
        assert_eq!(problem.errors()[0].reason(), GENERIC_ERROR_MESSAGE);
    }
}
