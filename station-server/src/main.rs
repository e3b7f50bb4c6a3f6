use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use station_server::catalog::Catalog;
use station_server::config::ServerConfig;
use station_server::routing::FootRoutingClient;
use station_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("station_server=info")),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Server failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env()?;

    // Load station catalogs (fail fast on malformed data)
    let catalog = Catalog::load(&config.data_dir)?;
    info!(
        stations = catalog.len(),
        dir = %config.data_dir.display(),
        "Loaded station catalogs"
    );

    let routing = FootRoutingClient::new(config.routing.clone())?;
    info!(base_url = %config.routing.base_url, "Using foot-routing service");

    let state = AppState::new(catalog, routing, config.default_count);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("Nearest station finder listening on http://{}", config.bind_addr);
    info!("API Endpoints:");
    info!("  GET  /health                      - Health check");
    info!("  GET  /api/cities                  - Supported cities");
    info!("  GET  /api/cities/:city/stations   - Station catalog for a city");
    info!("  GET  /api/nearest                 - Nearest stations (straight line)");
    info!("  GET  /api/nearest/walking         - Nearest stations with walking routes");

    axum::serve(listener, app).await?;

    Ok(())
}
