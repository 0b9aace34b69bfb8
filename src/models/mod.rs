//! Data models for the `TripCast` service
//!
//! This module contains the core domain models organized by concern:
//! - Location: Geographic coordinates and display names
//! - Forecast: Daily forecast series and unit conversion
//! - Trip: Saved trip records

pub mod forecast;
pub mod location;
pub mod trip;

// Re-export all public types for convenient access
pub use forecast::{DailyForecast, celsius_to_fahrenheit};
pub use location::Location;
pub use trip::TripRecord;
