//! Daily forecast series and unit conversion

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Convert a temperature from Celsius to Fahrenheit
#[must_use]
pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

/// Daily forecast for one location as parallel per-day series.
///
/// All four vectors describe the same days in the same order.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DailyForecast {
    pub days: Vec<NaiveDate>,
    /// Daily maximum temperature in Celsius
    pub max_temp_c: Vec<f64>,
    /// Daily minimum temperature in Celsius
    pub min_temp_c: Vec<f64>,
    /// Daily precipitation sum in millimeters
    pub precipitation_mm: Vec<f64>,
}

impl DailyForecast {
    /// Number of days covered
    #[must_use]
    pub fn len(&self) -> usize {
        self.days.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// True when every series has one entry per day
    #[must_use]
    pub fn is_aligned(&self) -> bool {
        let len = self.days.len();
        self.max_temp_c.len() == len
            && self.min_temp_c.len() == len
            && self.precipitation_mm.len() == len
    }
}
