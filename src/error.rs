//! Error types and handling for the `TripCast` service

use axum::http::StatusCode;
use chrono::NaiveDate;
use thiserror::Error;

/// Main error type for the `TripCast` service
#[derive(Error, Debug)]
pub enum TripCastError {
    /// A date field did not parse as `YYYY-MM-DD`
    #[error("Invalid date: '{input}'")]
    InvalidDate { input: String },

    /// A saved-trip time that is not RFC 3339
    #[error("Invalid timestamp: '{input}'")]
    InvalidTimestamp { input: String },

    #[error("Start date {start} is before today ({today})")]
    StartInPast { start: NaiveDate, today: NaiveDate },

    #[error("End date {end} is before start date {start}")]
    EndBeforeStart { start: NaiveDate, end: NaiveDate },

    /// Inclusive trip span exceeds what the forecast provider serves
    #[error("Trip spans {days} days, maximum is {max_days}")]
    RangeTooLong { days: i64, max_days: u32 },

    #[error("Location not found: {query}")]
    LocationNotFound { query: String },

    /// Provider answered without usable daily series
    #[error("No forecast data for {location}: {reason}")]
    NoForecastData { location: String, reason: String },

    #[error("Forecast series is empty")]
    EmptyForecastSeries,

    #[error("Failed to save trip: {message}")]
    StoreWriteFailure { message: String },

    #[error("Failed to list trips: {message}")]
    StoreReadFailure { message: String },

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Missing field: {field}")]
    MissingField { field: String },

    #[error("Unknown continent: {name}")]
    UnknownContinent { name: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Transport-level failures talking to an external service
    #[error("API error: {message}")]
    Api { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl TripCastError {
    pub fn invalid_date<S: Into<String>>(input: S) -> Self {
        Self::InvalidDate {
            input: input.into(),
        }
    }

    pub fn invalid_timestamp<S: Into<String>>(input: S) -> Self {
        Self::InvalidTimestamp {
            input: input.into(),
        }
    }

    pub fn location_not_found<S: Into<String>>(query: S) -> Self {
        Self::LocationNotFound {
            query: query.into(),
        }
    }

    pub fn no_forecast_data<L: Into<String>, R: Into<String>>(location: L, reason: R) -> Self {
        Self::NoForecastData {
            location: location.into(),
            reason: reason.into(),
        }
    }

    pub fn store_write<S: Into<String>>(message: S) -> Self {
        Self::StoreWriteFailure {
            message: message.into(),
        }
    }

    pub fn store_read<S: Into<String>>(message: S) -> Self {
        Self::StoreReadFailure {
            message: message.into(),
        }
    }

    pub fn missing_field<S: Into<String>>(field: S) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    pub fn unknown_continent<S: Into<String>>(name: S) -> Self {
        Self::UnknownContinent { name: name.into() }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            TripCastError::InvalidDate { .. } => "Please select a valid date range.".to_string(),
            TripCastError::InvalidTimestamp { .. } => {
                "Saved time must be an ISO-8601 timestamp.".to_string()
            }
            TripCastError::StartInPast { .. } => "Start date cannot be in the past.".to_string(),
            TripCastError::EndBeforeStart { .. } => {
                "End date cannot be before start date.".to_string()
            }
            TripCastError::RangeTooLong { max_days, .. } => {
                format!("Maximum trip length is {max_days} days.")
            }
            TripCastError::LocationNotFound { .. } => "Location not found.".to_string(),
            TripCastError::NoForecastData { .. } | TripCastError::EmptyForecastSeries => {
                "No weather data found for this location.".to_string()
            }
            TripCastError::StoreWriteFailure { message }
            | TripCastError::StoreReadFailure { message } => message.clone(),
            TripCastError::MethodNotAllowed => "Method not allowed".to_string(),
            TripCastError::MissingField { field } => format!("Missing {field}"),
            TripCastError::UnknownContinent { .. } => {
                "No cities found for selected continent.".to_string()
            }
            TripCastError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            TripCastError::Api { .. } => {
                "Unable to connect to external services. Please check your internet connection."
                    .to_string()
            }
            TripCastError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }

    /// HTTP status the API layer answers with for this error
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            TripCastError::InvalidDate { .. }
            | TripCastError::InvalidTimestamp { .. }
            | TripCastError::StartInPast { .. }
            | TripCastError::EndBeforeStart { .. }
            | TripCastError::RangeTooLong { .. }
            | TripCastError::MissingField { .. }
            | TripCastError::UnknownContinent { .. } => StatusCode::BAD_REQUEST,
            TripCastError::LocationNotFound { .. } => StatusCode::NOT_FOUND,
            TripCastError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            TripCastError::NoForecastData { .. }
            | TripCastError::EmptyForecastSeries
            | TripCastError::Api { .. } => StatusCode::BAD_GATEWAY,
            TripCastError::StoreWriteFailure { .. }
            | TripCastError::StoreReadFailure { .. }
            | TripCastError::Config { .. }
            | TripCastError::Io { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
