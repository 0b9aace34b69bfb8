//! Preference matching

use serde::{Deserialize, Serialize};

/// What the traveller asked for. Missing bounds do not constrain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Preference {
    pub min_temp_f: Option<f64>,
    pub max_temp_f: Option<f64>,
    pub exclude_rain: bool,
}

impl Preference {
    /// True when `avg_temp_f` lies in the inclusive preferred band
    #[must_use]
    pub fn accepts_temperature(&self, avg_temp_f: f64) -> bool {
        let min = self.min_temp_f.unwrap_or(f64::NEG_INFINITY);
        let max = self.max_temp_f.unwrap_or(f64::INFINITY);
        avg_temp_f >= min && avg_temp_f <= max
    }

    /// With rain excluded only a total of exactly zero passes
    #[must_use]
    pub fn accepts_rain(&self, total_rain_mm: f64) -> bool {
        !self.exclude_rain || total_rain_mm == 0.0
    }
}

/// Score in `0..=2`: one point for temperature, one for rain
#[must_use]
pub fn score(preference: &Preference, avg_temp_f: f64, total_rain_mm: f64) -> u8 {
    u8::from(preference.accepts_temperature(avg_temp_f))
        + u8::from(preference.accepts_rain(total_rain_mm))
}
