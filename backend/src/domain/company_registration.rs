//! Company registration intake.
//!
//! Validates a registration draft and announces it through the best-effort
//! event publisher. Storage of the company aggregate is owned elsewhere; this
//! service only accepts and publishes.

use std::sync::Arc;

use serde::Serialize;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{EventPublisher, OutboundEvent};
use crate::domain::{Failure, FieldViolation};

/// Routing key used for accepted registrations.
pub const COMPANY_REGISTERED_ROUTING_KEY: &str = "company.registered";

const BLANK: &str = "must not be blank";
const MALFORMED_EMAIL: &str = "must be a well-formed email address";
const MALFORMED_SLUG: &str = "must contain only lowercase letters, digits and hyphens";

/// Validated registration request.
///
/// ## Invariants
/// - `name`, `email` and `slug` are trimmed and non-empty.
/// - `email` contains `@` with text on both sides.
/// - `slug` uses `[a-z0-9-]` only.
/// - `phone`, when present, holds digits only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyDraft {
    name: String,
    email: String,
    slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone: Option<String>,
}

/// Raw registration fields as received from an adapter.
#[derive(Debug, Clone, Default)]
pub struct CompanyDraftInput<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub slug: &'a str,
    pub phone: Option<&'a str>,
}

impl CompanyDraft {
    /// Validate every field and report all violations at once, in field order.
    ///
    /// # Examples
    /// ```
    /// use company_api::domain::{CompanyDraft, CompanyDraftInput};
    ///
    /// let err = CompanyDraft::try_from_input(CompanyDraftInput {
    ///     name: " ",
    ///     email: "",
    ///     slug: "acme",
    ///     phone: None,
    /// })
    /// .expect_err("blank fields");
    /// let fields: Vec<&str> = err.iter().map(|v| v.field()).collect();
    /// assert_eq!(fields, ["name", "email"]);
    /// ```
    pub fn try_from_input(input: CompanyDraftInput<'_>) -> Result<Self, Vec<FieldViolation>> {
        let mut violations = Vec::new();
        let name = input.name.trim();
        let email = input.email.trim();
        let slug = input.slug.trim();

        if name.is_empty() {
            violations.push(FieldViolation::new("name", BLANK));
        }

        if email.is_empty() {
            violations.push(FieldViolation::new("email", BLANK));
        } else if !is_well_formed_email(email) {
            violations.push(FieldViolation::new("email", MALFORMED_EMAIL));
        }

        if slug.is_empty() {
            violations.push(FieldViolation::new("slug", BLANK));
        } else if !slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            violations.push(FieldViolation::new("slug", MALFORMED_SLUG));
        }

        if !violations.is_empty() {
            return Err(violations);
        }

        Ok(Self {
            name: name.to_owned(),
            email: email.to_owned(),
            slug: slug.to_owned(),
            phone: input.phone.map(numeric_only).filter(|digits| !digits.is_empty()),
        })
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    pub fn slug(&self) -> &str {
        self.slug.as_str()
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }
}

fn is_well_formed_email(email: &str) -> bool {
    email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty())
}

fn numeric_only(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Accepts registration drafts and publishes them.
#[derive(Clone)]
pub struct CompanyRegistrationService {
    publisher: Arc<dyn EventPublisher>,
    exchange: String,
}

impl CompanyRegistrationService {
    pub fn new(publisher: Arc<dyn EventPublisher>, exchange: impl Into<String>) -> Self {
        Self {
            publisher,
            exchange: exchange.into(),
        }
    }

    /// Validate and publish a registration on behalf of `requested_by`.
    ///
    /// Publication is best-effort: once the draft validates the call
    /// succeeds even if the event is lost.
    pub async fn register(
        &self,
        input: CompanyDraftInput<'_>,
        requested_by: &str,
    ) -> Result<CompanyDraft, Failure> {
        let draft = CompanyDraft::try_from_input(input).map_err(Failure::Validation)?;
        info!(slug = %draft.slug, requested_by, "company registration accepted");
        let event = OutboundEvent::new(
            self.exchange.as_str(),
            COMPANY_REGISTERED_ROUTING_KEY,
            json!({ "company": &draft, "requestedBy": requested_by }),
        );
        self.publisher.publish(event).await;
        Ok(draft)
    }
}
