//! Company registration endpoint.
//!
//! ```text
//! POST /api/v1/companies {"name":"Acme","email":"ops@acme.test","slug":"acme"}
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::CompanyDraftInput;
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Authenticated;
use crate::inbound::http::error::json_response;
use crate::inbound::http::problem::ProblemResponse;
use crate::inbound::http::schemas::CompanyDraftSchema;
use crate::inbound::http::state::HttpState;

/// Registration request body.
///
/// Missing fields deserialise as blank so they are reported as field
/// violations instead of a body parse error.
#[derive(Debug, Clone, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterCompanyRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub slug: String,
    /// Free-form phone number; only digits are kept.
    #[serde(default)]
    pub phone: Option<String>,
}

impl RegisterCompanyRequest {
    fn as_input(&self) -> CompanyDraftInput<'_> {
        CompanyDraftInput {
            name: &self.name,
            email: &self.email,
            slug: &self.slug,
            phone: self.phone.as_deref(),
        }
    }
}

/// Validate a registration and publish it for asynchronous processing.
#[utoipa::path(
    post,
    path = "/api/v1/companies",
    request_body = RegisterCompanyRequest,
    responses(
        (status = 202, description = "Registration accepted", body = CompanyDraftSchema),
        (status = 400, description = "Invalid registration", body = ProblemResponse,
            content_type = "application/problem+json"),
        (status = 401, description = "Missing or invalid API key", body = ProblemResponse,
            content_type = "application/problem+json")
    ),
    tags = ["companies"],
    operation_id = "registerCompany"
)]
#[post("/companies")]
pub async fn register_company(
    state: web::Data<HttpState>,
    identity: Authenticated,
    payload: web::Json<RegisterCompanyRequest>,
) -> ApiResult<HttpResponse> {
    let draft = state
        .registrations
        .register(payload.as_input(), identity.principal().company_slug())
        .await?;
    json_response(StatusCode::ACCEPTED, &draft)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::CompanyRegistrationService;
    use crate::domain::ports::{BestEffortPublisher, MockEventSink};
    use crate::inbound::http::test_utils::{TEST_API_KEY, TEST_COMPANY_SLUG, test_api_key_auth};
    use crate::inbound::http::validation::json_config;
    use crate::middleware::DEFAULT_API_KEY_HEADER;
    use actix_web::{App, test};
    use rstest::rstest;
    use serde_json::{Value, json};

    fn state_with(sink: MockEventSink) -> web::Data<HttpState> {
        let publisher = Arc::new(BestEffortPublisher::new(sink));
        web::Data::new(HttpState::new(CompanyRegistrationService::new(
            publisher,
            "company",
        )))
    }

    async fn post_companies(sink: MockEventSink, body: Value) -> actix_web::dev::ServiceResponse {
        let app = test::init_service(
            App::new().app_data(state_with(sink)).app_data(json_config()).service(
                web::scope("/api/v1")
                    .wrap(test_api_key_auth())
                    .service(register_company),
            ),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/api/v1/companies")
            .insert_header((DEFAULT_API_KEY_HEADER, TEST_API_KEY))
            .set_json(body)
            .to_request();
        test::call_service(&app, req).await
    }

    #[actix_web::test]
    async fn valid_registration_is_accepted_and_published() {
        let mut sink = MockEventSink::new();
        sink.expect_send()
            .withf(|event| event.payload["requestedBy"] == TEST_COMPANY_SLUG)
            .times(1)
            .returning(|_| Ok(()));

        let res = post_companies(
            sink,
            json!({"name": "Acme", "email": "ops@acme.test", "slug": "acme"}),
        )
        .await;

        assert_eq!(res.status(), StatusCode::ACCEPTED);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["slug"], "acme");
        assert!(body.get("phone").is_none());
    }

    #[rstest]
    #[case(json!({"slug": "acme"}), &["name", "email"])]
    #[case(json!({"name": "", "email": "", "slug": "acme"}), &["name", "email"])]
    #[case(json!({"name": "Acme", "email": "nope", "slug": "Not A Slug"}), &["email", "slug"])]
    #[actix_web::test]
    async fn violations_yield_one_entry_per_field(
        #[case] body: Value,
        #[case] expected: &[&str],
    ) {
        let mut sink = MockEventSink::new();
        sink.expect_send().never();

        let res = post_companies(sink, body).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let problem: ProblemResponse = test::read_body_json(res).await;
        let pointers: Vec<&str> = problem
            .errors()
            .iter()
            .filter_map(|detail| detail.pointer())
            .collect();
        assert_eq!(pointers, expected);
    }
}
