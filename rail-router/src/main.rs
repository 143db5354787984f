use std::process::ExitCode;
use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use rail_router::cache::CachedPlanner;
use rail_router::config::{AppConfig, ConfigError};
use rail_router::loader::{LoaderError, load_dataset};
use rail_router::network::{Network, NetworkError};
use rail_router::planner::Planner;
use rail_router::web::{AppState, create_router};

/// Anything that stops the server from starting.
#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("loading data: {0}")]
    Load(#[from] LoaderError),

    #[error("building network: {0}")]
    Network(#[from] NetworkError),

    #[error("serving on {addr}: {source}")]
    Serve {
        addr: std::net::SocketAddr,
        #[source]
        source: std::io::Error,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("rail-router: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), StartupError> {
    let config = AppConfig::from_env()?;

    info!(
        stations = %config.data.stations.display(),
        joins = %config.data.joins.display(),
        "Loading dataset"
    );
    let dataset = load_dataset(&config.data)?;

    let network = Network::build(dataset.stations, dataset.connections, &config.network)?;
    let stats = network.stats();
    if stats.rejected_connections > 0 {
        warn!(
            rejected = stats.rejected_connections,
            "Connections dropped during network build"
        );
    }

    let planner = Planner::new(Arc::new(network), config.plan.clone());
    let mut state = AppState::new(CachedPlanner::new(planner, &config.cache));
    if let Some(path) = &config.route_output {
        info!(path = %path.display(), "Writing found routes to file");
        state = state.with_route_output(path);
    }
    let app = create_router(state);

    let addr = config.bind_addr;
    let serve_err = |source: std::io::Error| StartupError::Serve { addr, source };

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(serve_err)?;
    info!(%addr, "Rail router listening");
    info!("  GET /health                            - Health check");
    info!("  GET /api/network                       - Network statistics");
    info!("  GET /api/stations/search?name=&line=   - Resolve a station name");
    info!("  GET /api/route?from=&to=               - Shortest route");

    axum::serve(listener, app).await.map_err(serve_err)
}
