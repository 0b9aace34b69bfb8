//! Built-in destination catalog grouped by continent

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::TripCastError;
use crate::models::Location;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Continent {
    Europe,
    Asia,
    NorthAmerica,
    SouthAmerica,
    Africa,
}

impl Continent {
    pub const ALL: [Continent; 5] = [
        Continent::Europe,
        Continent::Asia,
        Continent::NorthAmerica,
        Continent::SouthAmerica,
        Continent::Africa,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Continent::Europe => "Europe",
            Continent::Asia => "Asia",
            Continent::NorthAmerica => "North America",
            Continent::SouthAmerica => "South America",
            Continent::Africa => "Africa",
        }
    }
}

impl fmt::Display for Continent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Continent {
    type Err = TripCastError;

    /// Accepts "NorthAmerica", "North America" or "north_america"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        Continent::ALL
            .into_iter()
            .find(|continent| {
                continent
                    .label()
                    .chars()
                    .filter(|c| c.is_ascii_alphanumeric())
                    .map(|c| c.to_ascii_lowercase())
                    .eq(normalized.chars())
            })
            .ok_or_else(|| TripCastError::unknown_continent(s))
    }
}

/// A destination the planner can evaluate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityCandidate {
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
    pub continent: Continent,
}

impl CityCandidate {
    #[must_use]
    pub fn location(&self) -> Location {
        Location::new(self.latitude, self.longitude, self.name.to_string())
    }
}

const fn city(
    name: &'static str,
    latitude: f64,
    longitude: f64,
    continent: Continent,
) -> CityCandidate {
    CityCandidate {
        name,
        latitude,
        longitude,
        continent,
    }
}

static DEFAULT_CITIES: [CityCandidate; 18] = [
    city("Paris", 48.8566, 2.3522, Continent::Europe),
    city("Rome", 41.9028, 12.4964, Continent::Europe),
    city("Berlin", 52.52, 13.405, Continent::Europe),
    city("Barcelona", 41.3851, 2.1734, Continent::Europe),
    city("Amsterdam", 52.3676, 4.9041, Continent::Europe),
    city("London", 51.5072, -0.1276, Continent::Europe),
    city("Tokyo", 35.6762, 139.6503, Continent::Asia),
    city("Seoul", 37.5665, 126.978, Continent::Asia),
    city("Bangkok", 13.7563, 100.5018, Continent::Asia),
    city("Singapore", 1.3521, 103.8198, Continent::Asia),
    city("Delhi", 28.6139, 77.209, Continent::Asia),
    city("New York", 40.7128, -74.006, Continent::NorthAmerica),
    city("Los Angeles", 34.0522, -118.2437, Continent::NorthAmerica),
    city("Toronto", 43.65107, -79.347015, Continent::NorthAmerica),
    city("Mexico City", 19.4326, -99.1332, Continent::NorthAmerica),
    city("Chicago", 41.8781, -87.6298, Continent::NorthAmerica),
    city("Rio de Janeiro", -22.9068, -43.1729, Continent::SouthAmerica),
    city("Cape Town", -33.9249, 18.4241, Continent::Africa),
];

/// Immutable list of candidate cities
#[derive(Debug, Clone)]
pub struct CityCatalog {
    cities: Vec<CityCandidate>,
}

impl Default for CityCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_CITIES.to_vec())
    }
}

impl CityCatalog {
    #[must_use]
    pub fn new(cities: Vec<CityCandidate>) -> Self {
        Self { cities }
    }

    /// Cities of `continent` in catalog order
    #[must_use]
    pub fn in_continent(&self, continent: Continent) -> Vec<CityCandidate> {
        self.cities
            .iter()
            .filter(|c| c.continent == continent)
            .cloned()
            .collect()
    }

    /// Cities whose name contains `query`, ignoring case
    #[must_use]
    pub fn matching_name(&self, query: &str) -> Vec<CityCandidate> {
        let query = query.trim().to_lowercase();
        self.cities
            .iter()
            .filter(|c| c.name.to_lowercase().contains(&query))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Europe", Continent::Europe)]
    #[case("NorthAmerica", Continent::NorthAmerica)]
    #[case("north america", Continent::NorthAmerica)]
    #[case("SOUTH_AMERICA", Continent::SouthAmerica)]
    #[case("africa", Continent::Africa)]
    fn test_continent_parsing(#[case] input: &str, #[case] expected: Continent) {
        assert_eq!(input.parse::<Continent>().unwrap(), expected);
    }

    #[test]
    fn test_unknown_continent() {
        let err = "Atlantis".parse::<Continent>().unwrap_err();
        assert!(matches!(err, TripCastError::UnknownContinent { .. }));
    }

    #[test]
    fn test_continent_groups_keep_catalog_order() {
        let catalog = CityCatalog::default();
        let names: Vec<_> = catalog
            .in_continent(Continent::Asia)
            .iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, ["Tokyo", "Seoul", "Bangkok", "Singapore", "Delhi"]);
    }

    #[test]
    fn test_every_continent_has_cities() {
        let catalog = CityCatalog::default();
        for continent in Continent::ALL {
            assert!(!catalog.in_continent(continent).is_empty(), "{continent}");
        }
    }

    #[test]
    fn test_name_matching_is_case_insensitive_substring() {
        let catalog = CityCatalog::default();
        let names: Vec<_> = catalog
            .matching_name("  ON ")
            .iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, ["Barcelona", "London", "Toronto"]);
        assert!(catalog.matching_name("Reykjavik").is_empty());
    }
}
