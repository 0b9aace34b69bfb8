//! Open-Meteo forecast and geocoding client
//!
//! Both APIs are key-free. Each request carries the configured timeout;
//! failed requests are not retried.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use super::{ForecastClient, GeocodingClient};
use crate::config::ForecastConfig;
use crate::models::{DailyForecast, Location};
use crate::planner::DateRange;
use crate::{Result, TripCastError};

const DAILY_FIELDS: &str = "temperature_2m_max,temperature_2m_min,precipitation_sum";

/// HTTP client for the Open-Meteo forecast and geocoding APIs
pub struct OpenMeteoClient {
    client: Client,
    forecast_url: String,
    geocoding_url: String,
}

impl OpenMeteoClient {
    /// Create a client for the URLs and timeout in `config`
    pub fn new(config: &ForecastConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.timeout_seconds.into());

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("TripCast/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TripCastError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            forecast_url: config.base_url.trim_end_matches('/').to_string(),
            geocoding_url: config.geocoding_url.trim_end_matches('/').to_string(),
        })
    }

    fn forecast_request_url(&self, location: &Location, range: &DateRange) -> String {
        format!(
            "{}/forecast?latitude={}&longitude={}&start_date={}&end_date={}&daily={}&timezone=auto",
            self.forecast_url,
            location.latitude,
            location.longitude,
            range.start_param(),
            range.end_param(),
            DAILY_FIELDS
        )
    }

    /// Send a GET and return status plus body; only transport failures are errors here
    async fn get(&self, url: &str) -> Result<(StatusCode, String)> {
        let start_time = Instant::now();
        let response = self.client.get(url).send().await.map_err(|e| {
            warn!("Request to Open-Meteo failed: {}", e);
            TripCastError::api(format!("Request failed: {e}"))
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TripCastError::api(format!("Failed to read response body: {e}")))?;

        debug!(
            "HTTP response received: {} in {:.3}s",
            status,
            start_time.elapsed().as_secs_f64()
        );
        Ok((status, body))
    }
}

#[async_trait]
impl ForecastClient for OpenMeteoClient {
    #[instrument(skip(self, location, range), fields(location = %location.name, start = %range.start(), end = %range.end()))]
    async fn daily_forecast(
        &self,
        location: &Location,
        range: &DateRange,
    ) -> Result<DailyForecast> {
        let url = self.forecast_request_url(location, range);
        debug!("Open-Meteo forecast request URL: {}", url);

        let (status, body) = self.get(&url).await?;
        if !status.is_success() {
            let reason = extract_reason(&body).unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            });
            return Err(TripCastError::no_forecast_data(
                &location.name,
                format!("HTTP {}: {}", status.as_u16(), reason),
            ));
        }

        let response: ForecastResponse = serde_json::from_str(&body).map_err(|e| {
            TripCastError::no_forecast_data(&location.name, format!("invalid response: {e}"))
        })?;

        let forecast = response
            .into_daily_forecast()
            .map_err(|reason| TripCastError::no_forecast_data(&location.name, reason))?;

        info!("Retrieved {} forecast days for {}", forecast.len(), location.name);
        Ok(forecast)
    }
}

#[async_trait]
impl GeocodingClient for OpenMeteoClient {
    #[instrument(skip(self))]
    async fn geocode(&self, query: &str) -> Result<Vec<Location>> {
        let url = format!(
            "{}/search?name={}",
            self.geocoding_url,
            urlencoding::encode(query)
        );

        let (status, body) = self.get(&url).await?;
        if !status.is_success() {
            let reason = extract_reason(&body).unwrap_or_else(|| status.to_string());
            return Err(TripCastError::api(format!("Geocoding failed: {reason}")));
        }

        let response: GeocodingResponse = serde_json::from_str(&body)
            .map_err(|e| TripCastError::api(format!("Invalid geocoding response: {e}")))?;

        let locations: Vec<Location> = response
            .results
            .unwrap_or_default()
            .into_iter()
            .map(Location::from)
            .collect();

        if locations.is_empty() {
            warn!("No results found for location '{}'", query);
        } else {
            debug!(
                "Geocoding results: {:?}",
                locations
                    .iter()
                    .map(|l| format!("{} ({:.4}, {:.4})", l.name, l.latitude, l.longitude))
                    .collect::<Vec<_>>()
            );
        }

        Ok(locations)
    }
}

/// Open-Meteo reports failures as `{"error": true, "reason": "..."}`
fn extract_reason(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("reason")
        .and_then(|reason| reason.as_str())
        .map(str::to_string)
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    daily: Option<DailyData>,
}

#[derive(Debug, Deserialize)]
struct DailyData {
    #[serde(default)]
    time: Vec<String>,
    #[serde(rename = "temperature_2m_max")]
    temperature_max: Option<Vec<Option<f64>>>,
    #[serde(rename = "temperature_2m_min")]
    temperature_min: Option<Vec<Option<f64>>>,
    #[serde(rename = "precipitation_sum")]
    precipitation: Option<Vec<Option<f64>>>,
}

impl ForecastResponse {
    fn into_daily_forecast(self) -> std::result::Result<DailyForecast, String> {
        let daily = self.daily.ok_or("response has no daily block")?;

        let days = daily
            .time
            .iter()
            .map(|day| {
                NaiveDate::parse_from_str(day, "%Y-%m-%d")
                    .map_err(|_| format!("unparseable day '{day}'"))
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let max_temp_c = required_series(daily.temperature_max, "temperature_2m_max")?;
        let min_temp_c = required_series(daily.temperature_min, "temperature_2m_min")?;
        // A missing precipitation value counts as a dry day
        let precipitation_mm: Vec<f64> = daily
            .precipitation
            .ok_or("missing precipitation_sum")?
            .into_iter()
            .map(|value| value.unwrap_or(0.0))
            .collect();

        let forecast = DailyForecast {
            days,
            max_temp_c,
            min_temp_c,
            precipitation_mm,
        };

        if !forecast.is_aligned() {
            return Err("daily series have different lengths".to_string());
        }
        Ok(forecast)
    }
}

fn required_series(
    series: Option<Vec<Option<f64>>>,
    field: &str,
) -> std::result::Result<Vec<f64>, String> {
    series
        .ok_or_else(|| format!("missing {field}"))?
        .into_iter()
        .enumerate()
        .map(|(index, value)| value.ok_or_else(|| format!("{field} has no value for day {index}")))
        .collect()
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    results: Option<Vec<GeocodingResult>>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResult {
    name: String,
    latitude: f64,
    longitude: f64,
    country: Option<String>,
}

impl From<GeocodingResult> for Location {
    fn from(result: GeocodingResult) -> Self {
        match result.country {
            Some(country) => {
                Location::with_country(result.latitude, result.longitude, result.name, country)
            }
            None => Location::new(result.latitude, result.longitude, result.name),
        }
    }
}
