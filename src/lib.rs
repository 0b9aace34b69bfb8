//! `TripCast` - weather-aware trip planning
//!
//! This library fetches daily forecasts for candidate destinations, scores
//! them against temperature and rain preferences, ranks the results and
//! keeps a list of saved trips.

pub mod api;
pub mod cities;
pub mod config;
pub mod error;
pub mod location_resolver;
pub mod models;
pub mod planner;
pub mod render;
pub mod telemetry;
pub mod trips;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use api::AppState;
pub use cities::{CityCandidate, CityCatalog, Continent};
pub use config::TripCastConfig;
pub use error::TripCastError;
pub use location_resolver::{LocationInput, LocationParser, LocationResolver};
pub use models::{DailyForecast, Location, TripRecord};
pub use planner::{
    Assessment, BatchTarget, DateRange, Preference, RankingPolicy, SearchForm, SearchOutcome,
    SearchRequest, SearchTarget, TripPlanner, WeatherSummary,
};
pub use render::{DestinationCard, SearchView, render};
pub use trips::{FjallTripStore, HttpTripStoreClient, TripStore};
pub use weather::{ForecastClient, GeocodingClient, OpenMeteoClient};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, TripCastError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
