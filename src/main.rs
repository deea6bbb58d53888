use mimalloc::MiMalloc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use sitedash::auth::{Hasher, spawn_sweeper};
use sitedash::db::{self, Storage};
use sitedash::router::{DashState, dash_router};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = &sitedash::config::CONFIG;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        database_url = %cfg.database_url,
        listen_addr = %cfg.listen_addr,
        loglevel = %cfg.loglevel,
        session_ttl_hours = cfg.session_ttl_hours,
    );

    let pool = db::connect(&cfg.database_url, cfg.db_max_connections).await?;
    let storage = Storage::new(pool);
    storage.init_schema().await?;

    let hasher = Hasher::with_params(
        cfg.argon2_memory_kib,
        cfg.argon2_iterations,
        cfg.argon2_parallelism,
    )?;

    let state = DashState::new(storage, hasher, cfg.session_ttl());

    let sweeper = if cfg.session_sweep_secs > 0 {
        Some(spawn_sweeper(
            state.sessions().clone(),
            Duration::from_secs(cfg.session_sweep_secs),
        ))
    } else {
        warn!("session sweeper disabled; expired session rows are kept");
        None
    };

    let app = dash_router(state);

    let listener = TcpListener::bind(&cfg.listen_addr).await?;
    info!("HTTP server listening on {}", cfg.listen_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(handle) = sweeper {
        handle.abort();
    }
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
    }
    info!("shutdown signal received");
}
