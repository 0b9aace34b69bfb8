//! Search requests: raw form input, validation, and the dispatch target

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

use super::{Assessment, DateRange, Preference};
use crate::cities::Continent;
use crate::{Result, TripCastError};

/// Raw search fields as submitted by the front end
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchForm {
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub continent: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub min_temp: Option<f64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub max_temp: Option<f64>,
    #[serde(default, deserialize_with = "checkbox")]
    pub exclude_rain: bool,
}

/// HTML forms send untouched inputs as empty strings
fn empty_string_as_none<'de, D, T>(de: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw: Option<String> = Option::deserialize(de)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => T::from_str(value)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Flag {
    Bool(bool),
    Text(String),
}

/// Checkboxes arrive as `on` (or `1`, `true`) from forms and as booleans from JSON
fn checkbox<'de, D>(de: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Flag>::deserialize(de)? {
        None => Ok(false),
        Some(Flag::Bool(value)) => Ok(value),
        Some(Flag::Text(text)) => match text.trim().to_ascii_lowercase().as_str() {
            "on" | "1" | "true" | "yes" => Ok(true),
            "" | "off" | "0" | "false" | "no" => Ok(false),
            other => Err(serde::de::Error::custom(format!(
                "invalid checkbox value '{other}'"
            ))),
        },
    }
}

/// What a search evaluates
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum SearchTarget {
    /// Free text resolved to one place (coordinates or geocoded name)
    Location(String),
    /// Catalog cities whose name contains the text
    CityName(String),
    /// All catalog cities of a continent
    Continent(Continent),
}

/// Targets answered with a ranked list of catalog cities
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum BatchTarget {
    CityName(String),
    Continent(Continent),
}

/// A validated search
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub range: DateRange,
    pub preference: Preference,
    pub target: SearchTarget,
}

impl SearchRequest {
    /// Validate dates first, then pick the target: location, city name, continent
    pub fn from_form(form: &SearchForm, today: NaiveDate, max_trip_days: u32) -> Result<Self> {
        let range = DateRange::parse(&form.start_date, &form.end_date, today, max_trip_days)?;

        let preference = Preference {
            min_temp_f: form.min_temp,
            max_temp_f: form.max_temp,
            exclude_rain: form.exclude_rain,
        };

        let target = if let Some(location) = &form.location {
            SearchTarget::Location(location.trim().to_string())
        } else if let Some(city) = &form.city {
            SearchTarget::CityName(city.trim().to_string())
        } else if let Some(continent) = &form.continent {
            SearchTarget::Continent(continent.parse()?)
        } else {
            return Err(TripCastError::missing_field("location or continent"));
        };

        Ok(Self {
            range,
            preference,
            target,
        })
    }
}

/// Result of a search before rendering
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Single {
        range: DateRange,
        assessment: Assessment,
    },
    Ranked {
        range: DateRange,
        target: BatchTarget,
        results: Vec<Assessment>,
    },
}
