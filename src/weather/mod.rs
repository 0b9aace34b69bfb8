//! Forecast and geocoding provider interfaces
//!
//! The planner only sees these traits, so tests can swap the Open-Meteo
//! client for in-memory fakes.

use async_trait::async_trait;

use crate::Result;
use crate::models::{DailyForecast, Location};
use crate::planner::DateRange;

pub mod open_meteo;

pub use open_meteo::OpenMeteoClient;

/// Source of daily temperature and precipitation series
#[async_trait]
pub trait ForecastClient: Send + Sync {
    /// Fetch one entry per day of `range` for `location`.
    ///
    /// Fails with `NoForecastData` when the provider answers without the
    /// expected daily fields.
    async fn daily_forecast(&self, location: &Location, range: &DateRange)
    -> Result<DailyForecast>;
}

/// Name to coordinate lookup
#[async_trait]
pub trait GeocodingClient: Send + Sync {
    /// Matches for `query`, best first. An empty list means not found.
    async fn geocode(&self, query: &str) -> Result<Vec<Location>>;
}
