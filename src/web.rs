use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;
use axum::{Router, http::StatusCode};
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::api::{self, AppState};
use crate::config::ServerConfig;

/// Build the application router: API under `/api`, optional static front end
pub fn app(state: AppState, config: &ServerConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new().nest("/api", api::router());
    if let Some(dir) = &config.static_dir {
        router = router.fallback_service(ServeDir::new(dir));
    }

    router
        .with_state(state)
        .layer(RequestBodyLimitLayer::new(config.body_limit_kb as usize * 1024))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.request_timeout_seconds.into()),
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

pub async fn run(config: &ServerConfig, state: AppState) -> anyhow::Result<()> {
    let app = app(state, config);
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", config.host, config.port))?;

    #[cfg(feature = "tls")]
    if let (Some(cert), Some(key)) = (&config.tls_cert_path, &config.tls_key_path) {
        return run_tls(addr, app, cert, key).await;
    }

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Web server running at http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

#[cfg(feature = "tls")]
async fn run_tls(addr: SocketAddr, app: Router, cert: &str, key: &str) -> anyhow::Result<()> {
    use axum_server::{Handle, tls_rustls::RustlsConfig};

    // Only the first install wins; later calls are harmless
    let _ = rustls::crypto::ring::default_provider().install_default();

    let tls = RustlsConfig::from_pem_file(cert, key)
        .await
        .with_context(|| format!("Failed to load TLS certificate {cert} / key {key}"))?;

    let handle = Handle::new();
    let shutdown = handle.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        shutdown.graceful_shutdown(Some(Duration::from_secs(10)));
    });

    tracing::info!("Web server running at https://{}", addr);
    axum_server::bind_rustls(addr, tls)
        .handle(handle)
        .serve(app.into_make_service())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received");
}
