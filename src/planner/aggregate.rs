//! Reduction of daily forecast series to trip-level summary values

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{DailyForecast, celsius_to_fahrenheit};
use crate::{Result, TripCastError};

/// One day of chart data
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub max_temp_f: f64,
}

/// Trip-wide weather summary for one location
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherSummary {
    /// Mean daily maximum in Fahrenheit
    pub avg_max_f: f64,
    /// Mean daily minimum in Fahrenheit
    pub avg_min_f: f64,
    /// Midpoint of `avg_min_f` and `avg_max_f`
    pub avg_temp_f: f64,
    /// Unrounded precipitation total in millimeters
    pub total_rain_mm: f64,
    pub daily: Vec<DailyPoint>,
}

/// Average the temperature series, sum precipitation.
///
/// Means are taken in Celsius and converted afterwards.
pub fn aggregate(forecast: &DailyForecast) -> Result<WeatherSummary> {
    if forecast.is_empty() || forecast.max_temp_c.is_empty() {
        return Err(TripCastError::EmptyForecastSeries);
    }
    if !forecast.is_aligned() {
        return Err(TripCastError::no_forecast_data(
            "forecast",
            "daily series have different lengths",
        ));
    }

    let avg_max_f = celsius_to_fahrenheit(mean(&forecast.max_temp_c));
    let avg_min_f = celsius_to_fahrenheit(mean(&forecast.min_temp_c));
    let total_rain_mm = forecast.precipitation_mm.iter().sum();

    let daily = forecast
        .days
        .iter()
        .zip(&forecast.max_temp_c)
        .map(|(date, max_c)| DailyPoint {
            date: *date,
            max_temp_f: celsius_to_fahrenheit(*max_c),
        })
        .collect();

    Ok(WeatherSummary {
        avg_max_f,
        avg_min_f,
        avg_temp_f: (avg_max_f + avg_min_f) / 2.0,
        total_rain_mm,
        daily,
    })
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forecast(max: &[f64], min: &[f64], rain: &[f64]) -> DailyForecast {
        let start = NaiveDate::from_ymd_opt(2026, 7, 1).unwrap();
        DailyForecast {
            days: (0..max.len())
                .map(|i| start + chrono::Duration::days(i as i64))
                .collect(),
            max_temp_c: max.to_vec(),
            min_temp_c: min.to_vec(),
            precipitation_mm: rain.to_vec(),
        }
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 0.05,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_averages_and_midpoint() {
        let summary = aggregate(&forecast(
            &[10.0, 20.0, 30.0],
            &[0.0, 5.0, 10.0],
            &[0.0, 0.0, 0.0],
        ))
        .unwrap();

        assert_close(summary.avg_max_f, 68.0);
        assert_close(summary.avg_min_f, 41.0);
        assert_close(summary.avg_temp_f, 54.5);
    }

    #[test]
    fn test_wider_min_series() {
        let summary = aggregate(&forecast(
            &[10.0, 20.0, 30.0],
            &[0.0, 10.0, 20.0],
            &[0.0, 0.0, 0.0],
        ))
        .unwrap();

        assert_close(summary.avg_min_f, 50.0);
        assert_close(summary.avg_temp_f, 59.0);
    }

    #[test]
    fn test_rain_is_summed_without_rounding() {
        let summary = aggregate(&forecast(
            &[20.0, 20.0, 20.0],
            &[10.0, 10.0, 10.0],
            &[0.04, 0.0, 0.03],
        ))
        .unwrap();

        assert!((summary.total_rain_mm - 0.07).abs() < 1e-12);
        assert!(summary.total_rain_mm > 0.0);
    }

    #[test]
    fn test_daily_points_in_fahrenheit() {
        let summary = aggregate(&forecast(&[0.0, 100.0], &[0.0, 0.0], &[0.0, 0.0])).unwrap();
        assert_eq!(summary.daily.len(), 2);
        assert_close(summary.daily[0].max_temp_f, 32.0);
        assert_close(summary.daily[1].max_temp_f, 212.0);
    }

    #[test]
    fn test_empty_series_is_rejected() {
        let err = aggregate(&forecast(&[], &[], &[])).unwrap_err();
        assert!(matches!(err, TripCastError::EmptyForecastSeries));
    }

    #[test]
    fn test_misaligned_series_is_rejected() {
        let mut input = forecast(&[20.0, 21.0], &[10.0, 11.0], &[0.0, 0.0]);
        input.min_temp_c.pop();
        let err = aggregate(&input).unwrap_err();
        assert!(matches!(err, TripCastError::NoForecastData { .. }));
    }
}
