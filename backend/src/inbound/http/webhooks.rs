//! Webhook relay endpoint.
//!
//! ```text
//! POST /api/v1/webhooks {...any JSON...}
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, post, web};
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::domain::Error;
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::RequestIdentity;
use crate::inbound::http::error::json_response;
use crate::inbound::http::problem::ProblemResponse;
use crate::inbound::http::state::HttpState;

/// Upstream answer relayed to the caller.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct WebhookRelayResponse {
    /// Raw body returned by the webhook.
    pub response: String,
}

/// Forward the JSON body to the configured webhook.
///
/// Upstream failures are logged in full; the caller only sees a `503`.
#[utoipa::path(
    post,
    path = "/api/v1/webhooks",
    request_body = Value,
    responses(
        (status = 200, description = "Webhook answered", body = WebhookRelayResponse),
        (status = 401, description = "Missing or invalid API key", body = ProblemResponse,
            content_type = "application/problem+json"),
        (status = 503, description = "Webhook unavailable", body = ProblemResponse,
            content_type = "application/problem+json")
    ),
    tags = ["webhooks"],
    operation_id = "relayWebhook"
)]
#[post("/webhooks")]
pub async fn relay_webhook(
    state: web::Data<HttpState>,
    identity: RequestIdentity,
    payload: web::Json<Value>,
) -> ApiResult<HttpResponse> {
    let response = state.webhook.post(&payload).await.map_err(|err| {
        warn!(company = identity.company_slug(), error = %err, "webhook relay failed");
        Error::from(err)
    })?;
    json_response(StatusCode::OK, &WebhookRelayResponse { response })
}
