//! Server entry-point: loads settings, prepares the store and serves the API.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use pupil_tracker::inbound::http::health::HealthState;
use pupil_tracker::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use pupil_tracker::settings::TrackerSettings;
use server::{ServerConfig, build_http_state, create_server};

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

    let settings = TrackerSettings::load_from_iter(std::env::args_os())
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;

    let db_pool = match settings.database_url() {
        Some(url) => Some(connect(url, settings.db_max_connections()).await?),
        None => {
            warn!("no database URL configured; records are kept in memory only");
            None
        }
    };

    let http_state = build_http_state(db_pool.as_ref());
    if settings.seed_categories() {
        let created = http_state
            .categories
            .seed_predefined()
            .await
            .map_err(|e| std::io::Error::other(format!("category seeding failed: {e}")))?;
        info!(created, "category seeding finished");
    }

    let config = ServerConfig::new(settings.bind_addr());
    let health_state = web::Data::new(HealthState::new());
    info!(bind_addr = %settings.bind_addr(), "starting HTTP server");
    create_server(health_state, http_state, config)?.await
}

/// Apply pending migrations over a blocking connection, then open the pool.
async fn connect(database_url: &str, max_connections: u32) -> std::io::Result<DbPool> {
    let url = database_url.to_owned();
    let applied = web::block(move || run_pending_migrations(&url))
        .await
        .map_err(|e| std::io::Error::other(format!("migration task failed: {e}")))?
        .map_err(|e| std::io::Error::other(format!("migrations failed: {e}")))?;
    info!(count = applied.len(), migrations = ?applied, "database migrations applied");

    DbPool::new(PoolConfig::new(database_url).with_max_size(max_connections))
        .await
        .map_err(|e| std::io::Error::other(e.to_string()))
}
