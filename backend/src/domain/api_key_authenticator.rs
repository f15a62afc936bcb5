//! API-key validation service.
//!
//! Resolves an optional credential into an [`AuthenticatedPrincipal`]. The
//! service performs exactly one key-store lookup per call and keeps no state
//! between calls.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::ports::ApiKeyRepository;
use crate::domain::{ApiKey, AuthenticatedPrincipal, AuthenticationError};

/// Validator half of the API-key authenticator.
#[derive(Clone)]
pub struct ApiKeyAuthenticator {
    repository: Arc<dyn ApiKeyRepository>,
}

impl ApiKeyAuthenticator {
    pub fn new(repository: Arc<dyn ApiKeyRepository>) -> Self {
        Self { repository }
    }

    /// Validate the credential extracted from a request.
    ///
    /// # Errors
    /// - [`AuthenticationError::Unauthenticated`] when `credential` is absent.
    /// - [`AuthenticationError::InvalidCredential`] when no record matches.
    /// - [`AuthenticationError::KeyStore`] when the lookup itself fails.
    pub async fn authenticate(
        &self,
        credential: Option<&ApiKey>,
    ) -> Result<AuthenticatedPrincipal, AuthenticationError> {
        let Some(key) = credential else {
            info!("api-key is not defined on request, returning 401");
            return Err(AuthenticationError::Unauthenticated);
        };

        let fingerprint = key.fingerprint();
        debug!(%fingerprint, "searching for api-key");
        let record = self.repository.find_by_key(key).await.map_err(|err| {
            warn!(error = %err, %fingerprint, "api-key lookup failed");
            AuthenticationError::KeyStore {
                message: err.to_string(),
            }
        })?;

        match record {
            Some(record) => Ok(AuthenticatedPrincipal::from_record(record)),
            None => {
                info!(%fingerprint, "api-key not found, returning 401");
                Err(AuthenticationError::InvalidCredential)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ApiKeyRecord;
    use crate::domain::ports::{ApiKeyRepositoryError, MockApiKeyRepository};
    use rstest::rstest;
    use rstest_bdd_macros::{given, then, when};

    const API_KEY: &str = "my-apikey-test";
    const EMAIL: &str = "test@gmail.com";
    const COMPANY_SLUG: &str = "my-company-test";

    fn key(raw: &str) -> ApiKey {
        ApiKey::from_header_value(raw).expect("non-blank key")
    }

    fn record() -> ApiKeyRecord {
        ApiKeyRecord {
            id: 1,
            company_slug: COMPANY_SLUG.to_owned(),
            company_email: Some(EMAIL.to_owned()),
        }
    }

    #[given("a key store holding the test key")]
    fn a_key_store_holding_the_test_key() -> ApiKeyAuthenticator {
        let mut repository = MockApiKeyRepository::new();
        repository
            .expect_find_by_key()
            .returning(|candidate| Ok((candidate.expose() == API_KEY).then(record)));
        ApiKeyAuthenticator::new(Arc::new(repository))
    }

    #[when("the request carries the key")]
    fn the_request_carries_the_key(
        authenticator: ApiKeyAuthenticator,
        raw: Option<String>,
    ) -> Result<AuthenticatedPrincipal, AuthenticationError> {
        let credential = raw.as_deref().map(key);
        futures_util::FutureExt::now_or_never(authenticator.authenticate(credential.as_ref()))
            .expect("mock lookups complete immediately")
    }

    #[then("the principal mirrors the matched record")]
    fn the_principal_mirrors_the_matched_record(
        result: Result<AuthenticatedPrincipal, AuthenticationError>,
    ) {
        let principal = result.expect("known key authenticates");
        assert_eq!(principal.subject_id(), 1);
        assert_eq!(principal.company_slug(), COMPANY_SLUG);
        assert_eq!(principal.email(), EMAIL);
        assert!(principal.is_authenticated());
    }

    #[rstest]
    fn known_key_authenticates() {
        let authenticator = a_key_store_holding_the_test_key();
        let result = the_request_carries_the_key(authenticator, Some(API_KEY.to_owned()));
        the_principal_mirrors_the_matched_record(result);
    }

    #[rstest]
    fn unknown_key_is_an_invalid_credential() {
        let authenticator = a_key_store_holding_the_test_key();
        let result = the_request_carries_the_key(authenticator, Some("abc123".to_owned()));
        assert_eq!(result, Err(AuthenticationError::InvalidCredential));
    }

    #[rstest]
    #[tokio::test]
    async fn missing_credential_skips_lookup() {
        let mut repository = MockApiKeyRepository::new();
        repository.expect_find_by_key().never();
        let authenticator = ApiKeyAuthenticator::new(Arc::new(repository));

        let result = authenticator.authenticate(None).await;

        assert_eq!(result, Err(AuthenticationError::Unauthenticated));
    }

    #[rstest]
    #[case(ApiKeyRepositoryError::connection("refused"))]
    #[case(ApiKeyRepositoryError::query("syntax"))]
    #[tokio::test]
    async fn lookup_failures_surface_as_key_store_errors(#[case] failure: ApiKeyRepositoryError) {
        let expected = failure.to_string();
        let mut repository = MockApiKeyRepository::new();
        repository
            .expect_find_by_key()
            .times(1)
            .returning(move |_| Err(failure.clone()));
        let authenticator = ApiKeyAuthenticator::new(Arc::new(repository));

        let result = authenticator.authenticate(Some(&key(API_KEY))).await;

        assert_eq!(result, Err(AuthenticationError::KeyStore { message: expected }));
    }
}
