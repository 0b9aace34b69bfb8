//! Configuration management for the `TripCast` service
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::TripCastError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the `TripCast` service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripCastConfig {
    /// Forecast and geocoding provider settings
    #[serde(default)]
    pub forecast: ForecastConfig,
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Saved trip storage
    #[serde(default)]
    pub store: StoreConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Ranking and validation limits
    #[serde(default)]
    pub search: SearchConfig,
}

/// Forecast provider configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Base URL for the forecast API
    #[serde(default = "default_forecast_base_url")]
    pub base_url: String,
    /// Base URL for the geocoding API
    #[serde(default = "default_geocoding_url")]
    pub geocoding_url: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_forecast_timeout")]
    pub timeout_seconds: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    /// Directory with the static front end, served as fallback when set
    #[serde(default)]
    pub static_dir: Option<String>,
    /// Timeout for a whole inbound request in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u32,
    /// Maximum request body size in KB
    #[serde(default = "default_body_limit")]
    pub body_limit_kb: u32,
    /// PEM certificate, enables TLS together with `tls_key_path`
    #[serde(default)]
    pub tls_cert_path: Option<String>,
    #[serde(default)]
    pub tls_key_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory of the trip database
    #[serde(default = "default_store_location")]
    pub location: String,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
    /// OTLP/HTTP collector endpoint, span export is off when unset
    #[serde(default)]
    pub otlp_endpoint: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Number of destinations kept after ranking
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    /// Longest inclusive trip span in days
    #[serde(default = "default_max_trip_days")]
    pub max_trip_days: u32,
    /// Rain total (mm) at or above which temperature-ranked search drops a city
    #[serde(default = "default_rain_limit")]
    pub rain_limit_mm: f64,
}

// Default value functions
fn default_forecast_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

fn default_geocoding_url() -> String {
    "https://geocoding-api.open-meteo.com/v1".to_string()
}

fn default_forecast_timeout() -> u32 {
    10
}

fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
    3000
}

fn default_request_timeout() -> u32 {
    30
}

fn default_body_limit() -> u32 {
    64
}

fn default_store_location() -> String {
    "~/.local/share/tripcast/trips".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_max_results() -> usize {
    5
}

fn default_max_trip_days() -> u32 {
    16
}

fn default_rain_limit() -> f64 {
    5.0
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            base_url: default_forecast_base_url(),
            geocoding_url: default_geocoding_url(),
            timeout_seconds: default_forecast_timeout(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            static_dir: None,
            request_timeout_seconds: default_request_timeout(),
            body_limit_kb: default_body_limit(),
            tls_cert_path: None,
            tls_key_path: None,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            location: default_store_location(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            otlp_endpoint: None,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
            max_trip_days: default_max_trip_days(),
            rain_limit_mm: default_rain_limit(),
        }
    }
}

impl Default for TripCastConfig {
    fn default() -> Self {
        Self {
            forecast: ForecastConfig::default(),
            server: ServerConfig::default(),
            store: StoreConfig::default(),
            logging: LoggingConfig::default(),
            search: SearchConfig::default(),
        }
    }
}

impl StoreConfig {
    /// Store location with a leading `~` expanded to the home directory
    #[must_use]
    pub fn resolved_path(&self) -> PathBuf {
        match self.location.strip_prefix("~/") {
            Some(rest) => dirs::home_dir()
                .map(|home| home.join(rest))
                .unwrap_or_else(|| PathBuf::from(rest)),
            None => PathBuf::from(&self.location),
        }
    }
}

impl TripCastConfig {
    /// Load configuration from `config_path` (or the default location) plus environment variables
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // TRIPCAST_SERVER__PORT=9000 overrides server.port
        builder = builder.add_source(
            Environment::with_prefix("TRIPCAST")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: TripCastConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tripcast").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.forecast.base_url.is_empty() {
            self.forecast.base_url = default_forecast_base_url();
        }
        if self.forecast.geocoding_url.is_empty() {
            self.forecast.geocoding_url = default_geocoding_url();
        }
        if self.forecast.timeout_seconds == 0 {
            self.forecast.timeout_seconds = default_forecast_timeout();
        }
        if self.server.host.is_empty() {
            self.server.host = default_server_host();
        }
        if self.server.request_timeout_seconds == 0 {
            self.server.request_timeout_seconds = default_request_timeout();
        }
        if self.server.body_limit_kb == 0 {
            self.server.body_limit_kb = default_body_limit();
        }
        if self.store.location.is_empty() {
            self.store.location = default_store_location();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self.search.max_results == 0 {
            self.search.max_results = default_max_results();
        }
        if self.search.max_trip_days == 0 {
            self.search.max_trip_days = default_max_trip_days();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.forecast.timeout_seconds > 300 {
            return Err(
                TripCastError::config("Forecast API timeout cannot exceed 300 seconds").into(),
            );
        }

        if self.server.request_timeout_seconds > 600 {
            return Err(
                TripCastError::config("Request timeout cannot exceed 600 seconds").into(),
            );
        }

        // batch searches drop a slow city only if its request gives up first
        if self.forecast.timeout_seconds >= self.server.request_timeout_seconds {
            return Err(TripCastError::config(format!(
                "Forecast API timeout ({}s) must be shorter than the request timeout ({}s)",
                self.forecast.timeout_seconds, self.server.request_timeout_seconds
            ))
            .into());
        }

        if self.search.max_results > 50 {
            return Err(TripCastError::config("Maximum results cannot exceed 50").into());
        }

        // Open-Meteo serves at most 16 forecast days
        if self.search.max_trip_days > 16 {
            return Err(TripCastError::config("Maximum trip length cannot exceed 16 days").into());
        }

        if !self.search.rain_limit_mm.is_finite() || self.search.rain_limit_mm < 0.0 {
            return Err(
                TripCastError::config("Rain limit must be a non-negative number").into(),
            );
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(TripCastError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(TripCastError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        for (label, url) in [
            ("Forecast API base URL", &self.forecast.base_url),
            ("Geocoding API base URL", &self.forecast.geocoding_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(TripCastError::config(format!(
                    "{label} must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        if self.server.tls_cert_path.is_some() != self.server.tls_key_path.is_some() {
            return Err(TripCastError::config(
                "TLS needs both tls_cert_path and tls_key_path",
            )
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = TripCastConfig::default();
        assert_eq!(config.forecast.base_url, "https://api.open-meteo.com/v1");
        assert_eq!(
            config.forecast.geocoding_url,
            "https://geocoding-api.open-meteo.com/v1"
        );
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.search.max_results, 5);
        assert_eq!(config.search.max_trip_days, 16);
        assert_eq!(config.search.rain_limit_mm, 5.0);
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = TripCastConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = TripCastConfig::default();
        config.forecast.timeout_seconds = 500;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("timeout cannot exceed"));

        let mut config = TripCastConfig::default();
        config.search.max_trip_days = 30;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_forecast_timeout_must_undercut_request_timeout() {
        let mut config = TripCastConfig::default();
        config.forecast.timeout_seconds = 60;
        config.server.request_timeout_seconds = 30;
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("must be shorter"));

        config.forecast.timeout_seconds = 30;
        assert!(config.validate().is_err());

        config.forecast.timeout_seconds = 29;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_tls_pair() {
        let mut config = TripCastConfig::default();
        config.server.tls_cert_path = Some("cert.pem".to_string());
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("tls_key_path"));
    }

    #[test]
    fn test_apply_defaults_fills_empty_values() {
        let mut config = TripCastConfig::default();
        config.forecast.base_url.clear();
        config.search.max_results = 0;
        config.apply_defaults();
        assert_eq!(config.forecast.base_url, "https://api.open-meteo.com/v1");
        assert_eq!(config.search.max_results, 5);
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[server]\nport = 8088\n\n[search]\nmax_results = 3\n\n[logging]\nformat = \"json\""
        )
        .unwrap();

        let config = TripCastConfig::load_from_path(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(config.server.port, 8088);
        assert_eq!(config.search.max_results, 3);
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.forecast.timeout_seconds, 10);
    }

    #[test]
    fn test_store_path_expansion() {
        let store = StoreConfig {
            location: "/var/lib/tripcast".to_string(),
        };
        assert_eq!(store.resolved_path(), PathBuf::from("/var/lib/tripcast"));

        let store = StoreConfig::default();
        assert!(store.resolved_path().ends_with(".local/share/tripcast/trips"));
    }

    #[test]
    fn test_config_path_generation() {
        let path = TripCastConfig::get_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("tripcast"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }
}
