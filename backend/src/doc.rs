//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the API-key protected company endpoints, the health
//! probes, the problem response and the schema wrappers that keep utoipa out
//! of the domain types. Swagger UI serves it in debug builds and
//! `cargo run --bin openapi-dump` prints it for tooling.

use crate::inbound::http::companies::RegisterCompanyRequest;
use crate::inbound::http::problem::ProblemResponse;
use crate::inbound::http::schemas::{
    AuthenticatedPrincipalSchema, CompanyDraftSchema, ErrorDetailSchema,
};
use crate::inbound::http::webhooks::WebhookRelayResponse;
use crate::middleware::DEFAULT_API_KEY_HEADER;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Name of the API-key security scheme in the generated document.
pub const API_KEY_SCHEME: &str = "ApiKey";

/// Enrich the generated document with the API-key header scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            API_KEY_SCHEME,
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                DEFAULT_API_KEY_HEADER,
                "Company API key issued out of band.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Company API",
        description = "API-key authenticated company registration and webhook relay."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("ApiKey" = [])),
    paths(
        crate::inbound::http::me::current_principal,
        crate::inbound::http::companies::register_company,
        crate::inbound::http::webhooks::relay_webhook,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ProblemResponse,
        ErrorDetailSchema,
        AuthenticatedPrincipalSchema,
        CompanyDraftSchema,
        RegisterCompanyRequest,
        WebhookRelayResponse,
    )),
    tags(
        (name = "identity", description = "Authenticated principal"),
        (name = "companies", description = "Company registration"),
        (name = "webhooks", description = "Outbound webhook relay"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
