use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tripcast::{
    AppState, CityCatalog, FjallTripStore, OpenMeteoClient, TripCastConfig, TripPlanner, telemetry,
    web,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Optional config path as the only argument
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = TripCastConfig::load_from_path(config_path)?;

    let _telemetry = telemetry::init(&config.logging)?;
    tracing::info!("Starting tripcast {}", tripcast::VERSION);

    let open_meteo = Arc::new(OpenMeteoClient::new(&config.forecast)?);
    let planner = TripPlanner::new(
        open_meteo.clone(),
        open_meteo,
        CityCatalog::default(),
        config.search.clone(),
    );

    let store_path = config.store.resolved_path();
    std::fs::create_dir_all(&store_path)
        .with_context(|| format!("Failed to create store directory {}", store_path.display()))?;
    let trips = FjallTripStore::open(&store_path)
        .with_context(|| format!("Failed to open trip store at {}", store_path.display()))?;
    tracing::info!("Trip store opened at {}", store_path.display());

    let state = AppState::new(planner, Arc::new(trips));
    web::run(&config.server, state).await
}
