//! Tracing subscriber setup with optional OTLP span export

use anyhow::Context;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::Resource;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::{EnvFilter, Layer, Registry, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;

const SERVICE_NAME: &str = "tripcast";

/// Flushes exported spans when dropped
pub struct TelemetryGuard {
    provider: Option<SdkTracerProvider>,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        if let Some(provider) = self.provider.take() {
            if let Err(e) = provider.shutdown() {
                eprintln!("Failed to shut down tracer provider: {e}");
            }
        }
    }
}

fn env_filter(config: &LoggingConfig) -> EnvFilter {
    // RUST_LOG wins over the configured level
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("{SERVICE_NAME}={},tower_http=info", config.level))
    })
}

fn fmt_layer(config: &LoggingConfig) -> Box<dyn Layer<Registry> + Send + Sync> {
    if config.format == "json" {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer().pretty().boxed()
    }
}

fn tracer_provider(endpoint: &str) -> anyhow::Result<SdkTracerProvider> {
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_http()
        .with_endpoint(endpoint)
        .build()
        .context("Failed to build OTLP span exporter")?;

    Ok(SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .with_resource(Resource::builder().with_service_name(SERVICE_NAME).build())
        .build())
}

/// Install the global subscriber. Keep the guard alive until shutdown.
pub fn init(config: &LoggingConfig) -> anyhow::Result<TelemetryGuard> {
    let mut layers = vec![fmt_layer(config)];

    let provider = match &config.otlp_endpoint {
        Some(endpoint) => {
            let provider = tracer_provider(endpoint)?;
            let tracer = provider.tracer(SERVICE_NAME);
            layers.push(tracing_opentelemetry::layer().with_tracer(tracer).boxed());
            Some(provider)
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(layers)
        .with(env_filter(config))
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(TelemetryGuard { provider })
}
