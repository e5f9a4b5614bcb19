mod config_manager;
mod handlers;
mod routes;
mod state;
mod translate;

use anyhow::Result;
use axum::Router;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use config_manager::utils::resolve_config;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("kappa_translate=debug,tower_http=debug")),
        )
        .init();

    info!("kappa-translate v{}", env!("CARGO_PKG_VERSION"));

    let (mut config, loaded_path) = resolve_config(std::env::var("CONFIG_PATH").ok())?;
    match loaded_path {
        Some(path) => info!("Loaded configuration from: {}", path),
        None => info!("No config file found, using defaults"),
    }
    config.apply_port_override(std::env::var("PORT").ok())?;

    let app_state = AppState::new(&config)?;

    let app = Router::new()
        .merge(routes::create_routes())
        .with_state(app_state);

    let system_config = &config.system_config;
    info!("Starting server on port {}", system_config.port);

    let listener = match tokio::net::TcpListener::bind((system_config.host.as_str(), system_config.port)).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to start server: {}", e);
            return Err(e.into());
        }
    };
    info!("Server successfully started!");

    axum::serve(listener, app).await?;

    Ok(())
}
