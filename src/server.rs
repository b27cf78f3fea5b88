//! HTTP Server and Startup Sequencing
//!
//! This module implements the exporter HTTP server and wires together the
//! session renewal task and the per-scrape collection pipeline.
//!
//! # Endpoints
//!
//! - `GET /` - HTML landing page with links to metrics and health
//! - `GET /metrics` - Prometheus metrics, collected on demand for this request
//! - `GET /health` - Health check (200 when a session ticket is held, 503 otherwise)
//!
//! # Startup Sequencing
//!
//! `start` spawns the ticket renewal loop, then blocks on the session
//! manager's ready gate before binding the listener: no scrape traffic is
//! accepted until the first successful authentication.
//!
//! # Scrape Model
//!
//! Every `/metrics` request runs the collector synchronously against the
//! Proxmox API and renders the result. Partial failures are handled inside
//! the collector; only a metrics rendering failure produces a 500.

use crate::collector;
use crate::config::Config;
use crate::proxmox::{CredentialStore, ProxmoxClient, SessionManager};
use axum::{
    extract::State,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

#[derive(Clone)]
struct AppState {
    config: Config,
    client: Arc<ProxmoxClient>,
    store: Arc<CredentialStore>,
}

pub async fn start(config: Config) -> anyhow::Result<()> {
    let store = Arc::new(CredentialStore::new());
    let client = Arc::new(ProxmoxClient::new(&config.proxmox, store.clone())?);

    let session = SessionManager::new(
        client.clone(),
        store.clone(),
        Duration::from_secs(config.proxmox.renewal_interval_seconds),
    );

    // Start background ticket renewal
    tokio::spawn(session.clone().run());

    info!("Waiting for the first Proxmox session ticket...");
    session.ready().await;
    info!("Session ticket acquired");

    let state = AppState {
        config: config.clone(),
        client,
        store,
    };

    // Build the router
    let app = Router::new()
        .route("/", get(root_handler))
        .route("/metrics", get(metrics_handler))
        .route("/health", get(health_handler))
        .with_state(state);

    // Start the server
    let addr = format!("{}:{}", config.server.addr, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Metrics server listening on {}", addr);
    info!("Metrics available at http://{}/metrics", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn root_handler() -> impl IntoResponse {
    r#"<html>
<head><title>Proxmox ZFS Exporter</title></head>
<body>
<h1>Proxmox ZFS Prometheus Exporter</h1>
<p><a href="/metrics">Metrics</a></p>
<p><a href="/health">Health</a></p>
</body>
</html>"#
}

async fn metrics_handler(State(state): State<AppState>) -> Response {
    let metrics =
        match collector::collect_pool_metrics(state.client.as_ref(), &state.config.metrics).await {
            Ok(metrics) => metrics,
            Err(e) => {
                error!("Failed to collect metrics: {}", e);
                return (
                    axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Error collecting metrics: {}", e),
                )
                    .into_response();
            }
        };

    match metrics.render() {
        Ok(rendered) => rendered.into_response(),
        Err(e) => {
            error!("Failed to render metrics: {}", e);
            (
                axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error rendering metrics: {}", e),
            )
                .into_response()
        }
    }
}

async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    if state.store.has_ticket() {
        (axum::http::StatusCode::OK, "OK")
    } else {
        (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            "No Proxmox session ticket",
        )
    }
}
