//! Location model for geographic coordinates and display names

use serde::{Deserialize, Serialize};

/// Location coordinates
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Location {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Location name (city, region, or the raw coordinate text)
    pub name: String,
    /// Country name as reported by the geocoder
    pub country: Option<String>,
}

impl Location {
    /// Create a new location
    #[must_use]
    pub fn new(latitude: f64, longitude: f64, name: String) -> Self {
        Self {
            latitude,
            longitude,
            name,
            country: None,
        }
    }

    /// Create location with country
    #[must_use]
    pub fn with_country(latitude: f64, longitude: f64, name: String, country: String) -> Self {
        Self {
            latitude,
            longitude,
            name,
            country: Some(country),
        }
    }

    /// Name shown to the user: "<name>, <country>" when the country is known
    #[must_use]
    pub fn display_name(&self) -> String {
        match &self.country {
            Some(country) if !country.is_empty() => format!("{}, {}", self.name, country),
            _ => self.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_with_country() {
        let location = Location::with_country(
            48.8566,
            2.3522,
            "Paris".to_string(),
            "France".to_string(),
        );
        assert_eq!(location.display_name(), "Paris, France");
    }

    #[test]
    fn test_display_name_without_country() {
        let location = Location::new(35.6762, 139.6503, "35.6762, 139.6503".to_string());
        assert_eq!(location.display_name(), "35.6762, 139.6503");
    }
}
