//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::http::header::HeaderName;

use crate::domain::ports::FixtureApiKeyRepository;
use crate::domain::{ApiKeyAuthenticator, ApiKeyRecord};
use crate::middleware::{ApiKeyAuth, DEFAULT_API_KEY_HEADER};

/// Key accepted by [`test_api_key_auth`].
pub const TEST_API_KEY: &str = "my-apikey-test";
/// Company owning [`TEST_API_KEY`].
pub const TEST_COMPANY_SLUG: &str = "my-company-test";
/// Contact email of [`TEST_COMPANY_SLUG`].
pub const TEST_COMPANY_EMAIL: &str = "test@gmail.com";

/// Build an authentication middleware that accepts only [`TEST_API_KEY`].
pub fn test_api_key_auth() -> ApiKeyAuth {
    let repository = FixtureApiKeyRepository::default().with_key(
        TEST_API_KEY,
        ApiKeyRecord {
            id: 1,
            company_slug: TEST_COMPANY_SLUG.to_owned(),
            company_email: Some(TEST_COMPANY_EMAIL.to_owned()),
        },
    );
    ApiKeyAuth::new(
        HeaderName::from_static(DEFAULT_API_KEY_HEADER),
        ApiKeyAuthenticator::new(Arc::new(repository)),
    )
}
