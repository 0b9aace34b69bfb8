//! Location Resolution Module
//!
//! Turns free-text location input into coordinates: a literal "lat,lon"
//! pair is used as is, anything else goes through the geocoder.

use tracing::{debug, warn};

use crate::models::Location;
use crate::weather::GeocodingClient;
use crate::{Result, TripCastError};

/// Types of location input
#[derive(Debug, Clone, PartialEq)]
pub enum LocationInput {
    /// Coordinates (latitude, longitude) plus the text they came from
    Coordinates(f64, f64, String),
    /// Location name (city, region, etc.)
    Name(String),
}

/// Location parsing utilities
pub struct LocationParser;

impl LocationParser {
    /// Parse location input; empty input is rejected
    pub fn parse(input: &str) -> Result<LocationInput> {
        let input = input.trim();
        if input.is_empty() {
            return Err(TripCastError::missing_field("location"));
        }

        if let Some((lat, lon)) = Self::parse_coordinates(input) {
            return Ok(LocationInput::Coordinates(lat, lon, input.to_string()));
        }

        Ok(LocationInput::Name(input.to_string()))
    }

    /// Exactly two comma-separated finite numbers, e.g. "46.8182, 8.2275"
    fn parse_coordinates(input: &str) -> Option<(f64, f64)> {
        let (lat, lon) = input.split_once(',')?;
        let lat = lat.trim().parse::<f64>().ok()?;
        let lon = lon.trim().parse::<f64>().ok()?;

        (lat.is_finite() && lon.is_finite()).then_some((lat, lon))
    }
}

/// Service for resolving location inputs
pub struct LocationResolver;

impl LocationResolver {
    /// Resolve free text into a location, calling the geocoder only for names
    pub async fn resolve_location(geocoder: &dyn GeocodingClient, input: &str) -> Result<Location> {
        let location = match LocationParser::parse(input)? {
            LocationInput::Coordinates(lat, lon, text) => {
                debug!("Using literal coordinates: ({}, {})", lat, lon);
                Location::new(lat, lon, text)
            }
            LocationInput::Name(name) => Self::resolve_name(geocoder, name).await?,
        };

        debug!(
            "Resolved location: {} at ({}, {})",
            location.name, location.latitude, location.longitude
        );

        Ok(location)
    }

    /// Resolve a location name to coordinates via geocoding
    async fn resolve_name(geocoder: &dyn GeocodingClient, name: String) -> Result<Location> {
        debug!("Geocoding location name: {}", name);

        let results = match geocoder.geocode(&name).await {
            Ok(results) => results,
            Err(e) => {
                warn!("Geocoding '{}' failed: {}", name, e);
                return Err(TripCastError::location_not_found(name));
            }
        };

        // Use the first (best) result, shown as "<name>, <country>"
        let best = results
            .into_iter()
            .next()
            .ok_or_else(|| TripCastError::location_not_found(&name))?;

        Ok(Location::new(best.latitude, best.longitude, best.display_name()))
    }
}
