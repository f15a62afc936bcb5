//! PostgreSQL-backed `ApiKeyRepository` using Diesel.
//!
//! Resolves a key by exact match on `api_keys.key` joined to its owning
//! company. The comparison is plain SQL equality: case-sensitive, no
//! wildcards, no trimming.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ApiKeyRepository, ApiKeyRepositoryError};
use crate::domain::{ApiKey, ApiKeyRecord};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{API_KEY_COLUMNS, ApiKeyRow};
use super::pool::DbPool;
use super::schema::{api_keys, companies};

/// Diesel-backed key store.
#[derive(Clone)]
pub struct DieselApiKeyRepository {
    pool: DbPool,
}

impl DieselApiKeyRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ApiKeyRepository for DieselApiKeyRepository {
    async fn find_by_key(&self, key: &ApiKey) -> Result<Option<ApiKeyRecord>, ApiKeyRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, ApiKeyRepositoryError::connection))?;

        let row = api_keys::table
            .inner_join(companies::table)
            .filter(api_keys::key.eq(key.expose()))
            .select(API_KEY_COLUMNS)
            .first::<ApiKeyRow>(&mut conn)
            .await
            .optional()
            .map_err(|err| {
                map_diesel_error(
                    err,
                    ApiKeyRepositoryError::query,
                    ApiKeyRepositoryError::connection,
                )
            })?;

        Ok(row.map(ApiKeyRecord::from))
    }
}
