//! Tests for the application bootstrap: settings validation and readiness
//! signalling.

use super::server::{ServerSettings, create_server};
use actix_web::web;
use company_api::inbound::http::health::HealthState;
use rstest::{fixture, rstest};

#[fixture]
fn health_state() -> web::Data<HealthState> {
    web::Data::new(HealthState::new())
}

fn settings() -> ServerSettings {
    ServerSettings {
        bind_addr: Some("127.0.0.1:0".to_owned()),
        api_key_header: None,
        database_url: None,
        pool_size: None,
        webhook_url: None,
        webhook_timeout_secs: None,
        event_exchange: None,
        fixture_api_keys: Some("my-apikey-test=my-company-test=test@gmail.com".to_owned()),
    }
}

#[rstest]
#[actix_rt::test]
async fn create_server_marks_ready(health_state: web::Data<HealthState>) {
    assert!(!health_state.is_ready(), "state should start unready");

    let _server = create_server(health_state.clone(), &settings())
        .await
        .expect("server should build from fixture settings");

    assert!(
        health_state.is_ready(),
        "server creation should mark readiness"
    );
}

#[rstest]
#[case::bind_addr(ServerSettings { bind_addr: Some("nowhere".to_owned()), ..settings() })]
#[case::header(ServerSettings { api_key_header: Some("bad header".to_owned()), ..settings() })]
#[case::webhook(ServerSettings { webhook_url: Some("not a url".to_owned()), ..settings() })]
#[case::fixture_keys(ServerSettings { fixture_api_keys: Some("orphan".to_owned()), ..settings() })]
#[actix_rt::test]
async fn invalid_settings_fail_before_readiness(
    health_state: web::Data<HealthState>,
    #[case] settings: ServerSettings,
) {
    let result = create_server(health_state.clone(), &settings).await;

    assert!(result.is_err(), "invalid settings should be rejected");
    assert!(!health_state.is_ready(), "readiness must not be signalled");
}
