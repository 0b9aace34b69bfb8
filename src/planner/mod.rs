//! Trip planning pipeline
//!
//! Validated dates and preferences go in; scored and ranked destinations
//! come out. The pipeline per destination is fetch, aggregate, score:
//! - single location: one request, any failure ends the search
//! - batch (continent or catalog name): one request per city issued
//!   concurrently, failed cities are logged and left out

pub mod aggregate;
pub mod dates;
pub mod ranking;
pub mod scoring;
pub mod search;

pub use aggregate::{DailyPoint, WeatherSummary, aggregate};
pub use dates::DateRange;
pub use ranking::RankingPolicy;
pub use scoring::{Preference, score};
pub use search::{BatchTarget, SearchForm, SearchOutcome, SearchRequest, SearchTarget};

use std::sync::Arc;

use futures::future::join_all;
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::Result;
use crate::cities::{CityCandidate, CityCatalog};
use crate::config::SearchConfig;
use crate::location_resolver::LocationResolver;
use crate::models::Location;
use crate::weather::{ForecastClient, GeocodingClient};

/// A destination with its trip weather and preference score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub name: String,
    pub weather: WeatherSummary,
    pub score: u8,
}

/// Runs searches against injected forecast and geocoding clients
pub struct TripPlanner {
    forecasts: Arc<dyn ForecastClient>,
    geocoder: Arc<dyn GeocodingClient>,
    catalog: CityCatalog,
    settings: SearchConfig,
}

impl TripPlanner {
    pub fn new(
        forecasts: Arc<dyn ForecastClient>,
        geocoder: Arc<dyn GeocodingClient>,
        catalog: CityCatalog,
        settings: SearchConfig,
    ) -> Self {
        Self {
            forecasts,
            geocoder,
            catalog,
            settings,
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &CityCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn settings(&self) -> &SearchConfig {
        &self.settings
    }

    /// Policy for a batch target: continents rank by score, name searches by warmth
    #[must_use]
    pub fn policy_for(&self, target: &BatchTarget, preference: &Preference) -> RankingPolicy {
        match target {
            BatchTarget::CityName(_) => RankingPolicy::TemperatureRanked {
                min_temp_f: preference.min_temp_f.unwrap_or(f64::NEG_INFINITY),
                exclude_rain: preference.exclude_rain,
                rain_limit_mm: self.settings.rain_limit_mm,
            },
            BatchTarget::Continent(_) => RankingPolicy::ScoreRanked,
        }
    }

    /// Run a validated search
    #[instrument(skip(self, request), fields(target = ?request.target))]
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchOutcome> {
        let target = match &request.target {
            SearchTarget::Location(input) => {
                let assessment = self
                    .assess_location(input, &request.range, &request.preference)
                    .await?;
                return Ok(SearchOutcome::Single {
                    range: request.range,
                    assessment,
                });
            }
            SearchTarget::CityName(query) => BatchTarget::CityName(query.clone()),
            SearchTarget::Continent(continent) => BatchTarget::Continent(*continent),
        };

        let candidates = match &target {
            BatchTarget::CityName(query) => self.catalog.matching_name(query),
            BatchTarget::Continent(continent) => self.catalog.in_continent(*continent),
        };

        let assessed = self
            .assess_batch(&candidates, &request.range, &request.preference)
            .await;
        let policy = self.policy_for(&target, &request.preference);
        let results = policy.rank(assessed, self.settings.max_results);

        info!(
            "Ranked {} of {} candidates with {:?}",
            results.len(),
            candidates.len(),
            policy
        );

        Ok(SearchOutcome::Ranked {
            range: request.range,
            target,
            results,
        })
    }

    /// Single-location path: resolve, fetch, aggregate, score. Errors are terminal.
    pub async fn assess_location(
        &self,
        input: &str,
        range: &DateRange,
        preference: &Preference,
    ) -> Result<Assessment> {
        let location = LocationResolver::resolve_location(self.geocoder.as_ref(), input).await?;
        self.assess(&location, range, preference).await
    }

    /// Assess every candidate concurrently; failures drop only that candidate.
    ///
    /// Output keeps candidate order.
    pub async fn assess_batch(
        &self,
        candidates: &[CityCandidate],
        range: &DateRange,
        preference: &Preference,
    ) -> Vec<Assessment> {
        let pending = candidates.iter().map(|candidate| async move {
            let location = candidate.location();
            match self.assess(&location, range, preference).await {
                Ok(assessment) => Some(assessment),
                Err(e) => {
                    warn!("Skipping {}: {}", candidate.name, e);
                    None
                }
            }
        });

        join_all(pending).await.into_iter().flatten().collect()
    }

    async fn assess(
        &self,
        location: &Location,
        range: &DateRange,
        preference: &Preference,
    ) -> Result<Assessment> {
        let forecast = self.forecasts.daily_forecast(location, range).await?;
        let weather = aggregate(&forecast)?;
        let score = score(preference, weather.avg_temp_f, weather.total_rain_mm);

        Ok(Assessment {
            name: location.name.clone(),
            weather,
            score,
        })
    }
}
