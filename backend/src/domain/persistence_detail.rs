//! Client-facing reason extraction for persistence failures.
//!
//! PostgreSQL reports integrity violations as
//! `ERROR: <summary>  Detail: Key (<column>)=(<value>) <clause>`. This module
//! turns that layout into `<column> '<value>' <clause>`.
//!
//! Known fragility: the parsing is coupled to the PostgreSQL driver's message
//! format. Messages with composite keys, values containing parentheses, or
//! other drivers fall back to [`GENERIC_ERROR_MESSAGE`].

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::GENERIC_ERROR_MESSAGE;

const DETAIL_MARKER: &str = "Detail";

/// Build the reason shown to clients from the most specific cause message.
///
/// ```
/// use company_api::domain::extract_persistence_detail;
///
/// let cause = "ERROR: duplicate key value violates unique constraint \"company_slug_key\"  \
///              Detail: Key (slug)=(bl8lo0d) already exists.";
/// assert_eq!(extract_persistence_detail(cause), "slug 'bl8lo0d' already exists.");
/// ```
pub fn extract_persistence_detail(cause: &str) -> String {
    static GROUPS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\((.*?)\)").expect("valid regex"));

    if !cause.contains(DETAIL_MARKER) {
        return GENERIC_ERROR_MESSAGE.to_owned();
    }

    let groups: Vec<&str> = GROUPS
        .captures_iter(cause)
        .filter_map(|captures| captures.get(1))
        .map(|group| group.as_str())
        .collect();

    let [key, value] = groups.as_slice() else {
        return GENERIC_ERROR_MESSAGE.to_owned();
    };

    let clause = cause
        .rfind(')')
        .map(|index| &cause[index + 1..])
        .unwrap_or_default()
        .trim_start();

    format!("{key} '{value}' {clause}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(
        "ERROR: duplicate key value violates unique constraint \"company_slug_key\"  Detail: Key (slug)=(bl8lo0d) already exists.",
        "slug 'bl8lo0d' already exists."
    )]
    #[case(
        "ERROR: insert or update on table \"api_keys\" violates foreign key constraint \"api_keys_company_id_fkey\"  Detail: Key (company_id)=(42) is not present in table \"companies\".",
        "company_id '42' is not present in table \"companies\"."
    )]
    #[case("Detail: Key (email)=() already exists.", "email '' already exists.")]
    fn extracts_key_value_and_clause(#[case] cause: &str, #[case] expected: &str) {
        assert_eq!(extract_persistence_detail(cause), expected);
    }

    #[rstest]
    #[case("ERROR: duplicate key value violates unique constraint (slug)=(x)")]
    #[case("connection reset by peer")]
    #[case("")]
    fn missing_detail_marker_falls_back(#[case] cause: &str) {
        assert_eq!(extract_persistence_detail(cause), GENERIC_ERROR_MESSAGE);
    }

    #[rstest]
    #[case("Detail: Key (slug)")]
    #[case("Detail: Key (company_id, slug)=(1, x) trailing (extra) already exists.")]
    #[case("Detail: nothing in parentheses")]
    fn wrong_group_count_falls_back(#[case] cause: &str) {
        assert_eq!(extract_persistence_detail(cause), GENERIC_ERROR_MESSAGE);
    }
}
