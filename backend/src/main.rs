//! Server entry-point: loads settings, builds adapters and serves HTTP.

mod server;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr, eyre};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use conduct_desk::inbound::http::health::HealthState;
use conduct_desk::inbound::http::pages::PageDirectory;
use conduct_desk::inbound::http::session_config::{BuildMode, session_settings};
use conduct_desk::outbound::persistence::{DbPool, PoolConfig};
use conduct_desk::settings::AppSettings;
use ortho_config::OrthoConfig;

use server::{ServerConfig, build_http_state, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(|err| eyre!("failed to load settings: {err}"))?;
    let session = session_settings(&settings, BuildMode::from_debug_assertions())
        .wrap_err("invalid session configuration")?;
    let bind_addr = settings.bind_addr()?;

    let pool = DbPool::new(
        PoolConfig::new(settings.database_url()?)
            .with_max_size(settings.db_pool_size())
            .with_connection_timeout(settings.outbound_timeout()),
    )
    .await
    .wrap_err("failed to build database pool")?;
    let http_state = build_http_state(&settings, &pool).wrap_err("failed to build adapters")?;

    let config = ServerConfig::new(
        session,
        bind_addr,
        http_state,
        PageDirectory::new(settings.page_dir()),
    );
    info!(bind_addr = %config.bind_addr(), "starting conduct desk");
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    server.await?;
    Ok(())
}
