//! Relay entry-point: loads settings, wires SMTP and serves HTTP.

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use portfolio_backend::inbound::http::health::HealthState;
use portfolio_backend::outbound::smtp::ProcessMailEnv;
use portfolio_backend::server::{
    RelaySettings, ServerConfig, build_relay_command, create_server,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = RelaySettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load relay settings: {e}")))?;
    let relay = build_relay_command(&settings, &ProcessMailEnv);
    let config = ServerConfig::new(settings.bind_addr()?, settings.relay_path(), relay);
    info!(
        bind_addr = %config.bind_addr(),
        relay_path = %config.relay_path(),
        "starting contact relay"
    );

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    let result = server.await;
    health_state.mark_unhealthy();
    result
}
