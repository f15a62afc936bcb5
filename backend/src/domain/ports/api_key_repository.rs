//! Driven port for resolving API keys against the key store.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::{ApiKey, ApiKeyRecord};

use super::define_port_error;

define_port_error! {
    /// Errors raised by key-store adapters.
    pub enum ApiKeyRepositoryError {
        /// Key store connection could not be established.
        Connection { message: String } => "api key store connection failed: {message}",
        /// Lookup failed during execution or row conversion.
        Query { message: String } => "api key store query failed: {message}",
    }
}

/// Key-store lookup.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApiKeyRepository: Send + Sync {
    /// Return the record whose key equals `key` exactly (case-sensitive, no
    /// wildcards), or `None`.
    async fn find_by_key(&self, key: &ApiKey) -> Result<Option<ApiKeyRecord>, ApiKeyRepositoryError>;
}

/// In-memory key store used for development and tests.
///
/// # Examples
/// ```
/// use company_api::domain::ports::FixtureApiKeyRepository;
/// use company_api::domain::ApiKeyRecord;
///
/// let repository = FixtureApiKeyRepository::default().with_key(
///     "my-apikey-test",
///     ApiKeyRecord { id: 1, company_slug: "acme".into(), company_email: None },
/// );
/// assert_eq!(repository.len(), 1);
/// ```
#[derive(Debug, Default, Clone)]
pub struct FixtureApiKeyRepository {
    records: HashMap<String, ApiKeyRecord>,
}

impl FixtureApiKeyRepository {
    /// Register `key` for `record`, replacing any previous registration.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>, record: ApiKeyRecord) -> Self {
        self.records.insert(key.into(), record);
        self
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl ApiKeyRepository for FixtureApiKeyRepository {
    async fn find_by_key(&self, key: &ApiKey) -> Result<Option<ApiKeyRecord>, ApiKeyRepositoryError> {
        Ok(self.records.get(key.expose()).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn repository() -> FixtureApiKeyRepository {
        FixtureApiKeyRepository::default().with_key(
            "Secret-Key",
            ApiKeyRecord {
                id: 3,
                company_slug: "acme".to_owned(),
                company_email: Some("ops@acme.test".to_owned()),
            },
        )
    }

    fn key(raw: &str) -> ApiKey {
        ApiKey::from_header_value(raw).expect("non-blank key")
    }

    #[rstest]
    #[tokio::test]
    async fn exact_match_resolves(repository: FixtureApiKeyRepository) {
        let record = repository
            .find_by_key(&key("Secret-Key"))
            .await
            .expect("lookup succeeds");
        assert_eq!(record.map(|r| r.id), Some(3));
    }

    #[rstest]
    #[case("secret-key")]
    #[case("Secret-Key ")]
    #[case("Secret-*")]
    #[tokio::test]
    async fn near_matches_do_not_resolve(repository: FixtureApiKeyRepository, #[case] raw: &str) {
        let record = repository.find_by_key(&key(raw)).await.expect("lookup succeeds");
        assert!(record.is_none());
    }
}
