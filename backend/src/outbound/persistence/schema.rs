//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `migrations/` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered companies.
    companies (id) {
        id -> Int8,
        /// Unique, lowercase URL-safe identifier.
        slug -> Varchar,
        name -> Varchar,
        /// Contact email; optional for legacy rows.
        email -> Nullable<Varchar>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// API keys issued to companies.
    api_keys (id) {
        id -> Int8,
        /// Opaque key value, matched exactly.
        key -> Varchar,
        company_id -> Int8,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(api_keys -> companies (company_id));

diesel::allow_tables_to_appear_in_same_query!(api_keys, companies);
