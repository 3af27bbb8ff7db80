//! Tests for server bootstrap and readiness signalling.

use actix_web::cookie::{Key, SameSite};
use actix_web::web;
use rstest::{fixture, rstest};

use super::server::{ServerConfig, create_server};
use contacts_backend::inbound::http::health::HealthState;

#[fixture]
fn health_state() -> web::Data<HealthState> {
    web::Data::new(HealthState::new())
}

#[fixture]
fn config() -> ServerConfig {
    ServerConfig::new(
        Key::generate(),
        false,
        SameSite::Lax,
        "127.0.0.1:0".parse().expect("loopback address"),
    )
}

#[rstest]
#[actix_rt::test]
async fn create_server_marks_ready(health_state: web::Data<HealthState>, config: ServerConfig) {
    assert!(!health_state.is_ready(), "state should start unready");

    let _server = create_server(health_state.clone(), config).expect("server should bind");

    assert!(health_state.is_ready(), "server creation should mark readiness");
    assert!(health_state.is_alive());
}
