//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use diesel::prelude::*;

use crate::domain::ApiKeyRecord;

use super::schema::{api_keys, companies};

/// Columns read by the key-store lookup, in [`ApiKeyRow`] field order.
pub(crate) type ApiKeyColumns = (api_keys::id, companies::slug, companies::email);

pub(crate) const API_KEY_COLUMNS: ApiKeyColumns = (api_keys::id, companies::slug, companies::email);

/// Key-store row: the key id and its owning company.
#[derive(Debug, Clone, Queryable)]
pub(crate) struct ApiKeyRow {
    pub id: i64,
    pub company_slug: String,
    pub company_email: Option<String>,
}

impl From<ApiKeyRow> for ApiKeyRecord {
    fn from(row: ApiKeyRow) -> Self {
        Self {
            id: row.id,
            company_slug: row.company_slug,
            company_email: row.company_email,
        }
    }
}
