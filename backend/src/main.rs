//! Backend entry-point: loads configuration, applies migrations and serves
//! HTTP.

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use docshare::inbound::http::health::HealthState;
use docshare::inbound::http::session_config::{BuildMode, SessionSettings};
use docshare::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use docshare::server::{AppSettings, ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(|e| std::io::Error::other(e.to_string()))?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let env = DefaultEnv::new();
    let session = SessionSettings::from_env(&env, BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;

    let mut config = ServerConfig::new(session, bind_addr);
    match settings.database_url.as_deref() {
        Some(database_url) => {
            run_pending_migrations(database_url)
                .await
                .map_err(std::io::Error::other)?;
            let pool = DbPool::new(
                PoolConfig::new(database_url).with_max_size(settings.db_max_connections),
            )
            .await
            .map_err(std::io::Error::other)?;
            config = config.with_db_pool(pool);
        }
        None => warn!("DOCSHARE_DATABASE_URL not set; using in-memory repositories"),
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "docshare listening");
    server.await
}
