//! Caller identity endpoint.
//!
//! ```text
//! GET /api/v1/me
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, get};

use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Authenticated;
use crate::inbound::http::error::json_response;
use crate::inbound::http::problem::ProblemResponse;
use crate::inbound::http::schemas::AuthenticatedPrincipalSchema;

/// Return the principal resolved from the request's API key.
#[utoipa::path(
    get,
    path = "/api/v1/me",
    responses(
        (status = 200, description = "Authenticated principal", body = AuthenticatedPrincipalSchema),
        (status = 401, description = "Missing or invalid API key", body = ProblemResponse,
            content_type = "application/problem+json"),
        (status = 500, description = "Key store unavailable", body = ProblemResponse,
            content_type = "application/problem+json")
    ),
    tags = ["identity"],
    operation_id = "currentPrincipal"
)]
#[get("/me")]
pub async fn current_principal(identity: Authenticated) -> ApiResult<HttpResponse> {
    json_response(StatusCode::OK, identity.principal())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{
        TEST_API_KEY, TEST_COMPANY_EMAIL, TEST_COMPANY_SLUG, test_api_key_auth,
    };
    use crate::middleware::DEFAULT_API_KEY_HEADER;
    use actix_web::{App, test, web};
    use serde_json::Value;

    #[actix_web::test]
    async fn returns_principal_fields_in_camel_case() {
        let app = test::init_service(
            App::new().service(
                web::scope("/api/v1")
                    .wrap(test_api_key_auth())
                    .service(current_principal),
            ),
        )
        .await;
        let req = test::TestRequest::get()
            .uri("/api/v1/me")
            .insert_header((DEFAULT_API_KEY_HEADER, TEST_API_KEY))
            .to_request();

        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["subjectId"], 1);
        assert_eq!(body["companySlug"], TEST_COMPANY_SLUG);
        assert_eq!(body["email"], TEST_COMPANY_EMAIL);
        assert_eq!(body["authenticated"], true);
    }

    #[actix_web::test]
    async fn unauthenticated_scope_is_rejected_by_the_extractor() {
        let app = test::init_service(App::new().service(current_principal)).await;
        let req = test::TestRequest::get().uri("/me").to_request();

        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let problem: ProblemResponse = test::read_body_json(res).await;
        assert_eq!(problem.errors()[0].name(), Some("UNAUTHENTICATED"));
    }
}
