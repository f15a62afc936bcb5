//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerSettings;

use state_builders::{AppPorts, build_ports};

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;

use company_api::Trace;
#[cfg(debug_assertions)]
use company_api::doc::ApiDoc;
use company_api::inbound::http::companies::register_company;
use company_api::inbound::http::health::{HealthState, live, ready};
use company_api::inbound::http::me::current_principal;
use company_api::inbound::http::validation::{json_config, path_config, query_config};
use company_api::inbound::http::webhooks::relay_webhook;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Assemble the application: probes and docs are public, `/api/v1` sits
/// behind API-key authentication.
fn build_app(
    health_state: web::Data<HealthState>,
    ports: AppPorts,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppPorts {
        http_state,
        api_key_auth,
    } = ports;

    let api = web::scope("/api/v1")
        .wrap(api_key_auth)
        .service(current_principal)
        .service(register_company)
        .service(relay_webhook);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(json_config())
        .app_data(query_config())
        .app_data(path_config())
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server from the loaded settings.
///
/// # Errors
/// Propagates [`std::io::Error`] when settings are invalid, adapters cannot
/// be built, or the socket cannot be bound.
pub async fn create_server(
    health_state: web::Data<HealthState>,
    settings: &ServerSettings,
) -> std::io::Result<Server> {
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let ports = build_ports(settings).await?;
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || build_app(server_health_state.clone(), ports.clone()))
        .bind(bind_addr)?
        .run();

    info!(%bind_addr, "http server bound");
    health_state.mark_ready();
    Ok(server)
}
