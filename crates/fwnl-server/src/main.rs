//! FWNL HTTP server — chat endpoints over the dialogue core.

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use fwnl_server::config::ServerConfig;
use fwnl_server::routes;
use fwnl_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "fwnl-server starting");

    let config = ServerConfig::from_env()?;
    tracing::info!(nickname = %config.nickname, "config loaded");

    let state = AppState::new(config.nickname.clone());
    let app = routes::build_router(state);

    let addr = config.addr();
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "listening");

    axum::serve(listener, app).await?;

    Ok(())
}
