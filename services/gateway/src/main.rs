//! Session gateway
//!
//! Startup for the chat-completions compatibility proxy core:
//! 1. Populates the environment from `.env` if present
//! 2. Loads configuration and reports it
//! 3. Builds the session pool and model registry
//! 4. Serves health, metrics and the model listing that transport
//!    collaborators expose to clients

mod config;
mod metrics;

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use axum::Router;
use axum::extract::{MatchedPath, Request, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use metrics_exporter_prometheus::PrometheusHandle;
use model_registry::ModelRegistry;
use session_pool::SessionPool;
use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

/// Shared application state accessible from all handlers
#[derive(Clone)]
struct AppState {
    config: Arc<Config>,
    pool: Arc<SessionPool>,
    models: Arc<ModelRegistry>,
    started_at: Instant,
    prometheus: PrometheusHandle,
}

impl AppState {
    fn new(config: Config, prometheus: PrometheusHandle) -> Self {
        let pool = SessionPool::new(config.sessions.clone());
        let models = ModelRegistry::new(config.is_max_subscribe);
        Self {
            config: Arc::new(config),
            pool: Arc::new(pool),
            models: Arc::new(models),
            started_at: Instant::now(),
            prometheus,
        }
    }
}

fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route("/v1/models", get(models_handler))
        .route_layer(middleware::from_fn(track_requests))
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Must run before the subscriber reads LOG_LEVEL.
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_env("LOG_LEVEL")
                .or_else(|_| EnvFilter::try_from_default_env())
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    match dotenv {
        Ok(path) => info!(path = %path.display(), "loaded environment file"),
        Err(e) if e.not_found() => debug!("no .env file, using process environment"),
        Err(e) => warn!(error = %e, "ignoring unreadable .env file"),
    }

    info!("starting session-gateway");

    let prometheus = metrics::install_recorder()?;

    let config = Config::from_env();
    config.log_summary();
    if config.sessions.is_empty() {
        warn!("SESSIONS is empty, every upstream request will fail");
    }

    let address = config.address.clone();
    let app = build_router(AppState::new(config, prometheus));

    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind to {address}"))?;
    info!(addr = %address, "accepting requests");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("shutdown complete");
    Ok(())
}

/// Record count and latency for every matched route.
async fn track_requests(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_default();
    let response = next.run(request).await;
    metrics::record_request(&route, response.status().as_u16(), start.elapsed().as_secs_f64());
    response
}

fn json_response(status: StatusCode, body: serde_json::Value) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        body.to_string(),
    )
        .into_response()
}

/// 200 when at least one session is configured, 503 otherwise.
async fn health_handler(State(state): State<AppState>) -> Response {
    let sessions = state.pool.len();
    let (status, label) = if sessions > 0 {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
    };
    json_response(
        status,
        serde_json::json!({
            "status": label,
            "sessions": sessions,
            "retry_budget": state.pool.retry_budget(),
            "models_advertised": state.models.advertised_models().len(),
            "uptime_seconds": state.started_at.elapsed().as_secs(),
        }),
    )
}

/// Prometheus metrics endpoint in text exposition format.
async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(
            header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        state.prometheus.render(),
    )
}

/// Model listing. Requires `Authorization: Bearer <APIKEY>` when an API key
/// is configured.
async fn models_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if !authorized(&state.config, &headers) {
        return json_response(
            StatusCode::UNAUTHORIZED,
            serde_json::json!({
                "error": {
                    "type": "authentication_error",
                    "message": "invalid or missing API key",
                }
            }),
        );
    }

    json_response(
        StatusCode::OK,
        serde_json::json!({
            "object": "list",
            "data": state.models.advertised_models(),
        }),
    )
}

fn authorized(config: &Config, headers: &HeaderMap) -> bool {
    let Some(expected) = &config.api_key else {
        return true;
    };
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .is_some_and(|presented| presented == expected.expose())
}

/// Wait for SIGTERM or SIGINT.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received SIGINT, shutting down"),
        _ = terminate => info!("received SIGTERM, shutting down"),
    }
}
