//! Company API entry-point: loads settings, initialises tracing and runs the
//! HTTP server.

mod server;

use actix_web::web;
use color_eyre::eyre::WrapErr;
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use company_api::inbound::http::health::HealthState;
use server::{ServerSettings, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load().wrap_err("failed to load server settings")?;
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), &settings)
        .await
        .wrap_err("failed to start server")?;

    server.await.wrap_err("server terminated with an error")?;
    health_state.mark_unhealthy();
    Ok(())
}

#[cfg(test)]
mod tests;
