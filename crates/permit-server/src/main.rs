//! Permit Server: Application entry point.

use permit_server::config::ServerConfig;
use permit_server::state::AppState;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("permit=info".parse()?))
        .json()
        .init();

    tracing::info!("Starting permit server...");

    let config = ServerConfig::from_env();
    tokio::fs::create_dir_all(&config.upload_dir).await?;
    let bind_addr = config.bind_addr;

    let state = AppState::new(config)?;
    let app = permit_server::app(state);

    let listener = TcpListener::bind(bind_addr).await?;
    tracing::info!(%bind_addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(permit_server::shutdown_signal())
        .await?;

    tracing::info!("Permit server stopped.");
    Ok(())
}
