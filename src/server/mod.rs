//! HTTP dashboard server
//!
//! Serves the interactive dashboard, its JSON summary, and a liveness
//! probe. The dataset is loaded once and shared read-only between requests.

pub mod error;
pub mod handlers;

use axum::Router;
use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use log::{info, warn};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;

use crate::analysis::Dataset;
use crate::core::constants::{defaults, limits};
use crate::core::error::{Result, SalesboardError};
use crate::core::types::Granularity;
use crate::reporting::FilterOptions;
use crate::reporting::logging::log_request;

pub use error::ApiError;
pub use handlers::{DashboardQuery, DashboardRequest};

/// Shared, read-only state of the server
#[derive(Debug, Clone)]
pub struct AppState {
    pub dataset: Arc<Dataset>,
    /// Filter control values, computed once from the dataset
    pub options: Arc<FilterOptions>,
    pub data_source: Arc<str>,
    pub default_granularity: Granularity,
    pub default_top: usize,
}

impl AppState {
    pub fn new(dataset: Dataset, data_source: impl Into<Arc<str>>) -> Self {
        let options = FilterOptions::from_dataset(&dataset);
        Self {
            dataset: Arc::new(dataset),
            options: Arc::new(options),
            data_source: data_source.into(),
            default_granularity: Granularity::default(),
            default_top: defaults::TOP_PRODUCTS,
        }
    }

    pub fn with_defaults(mut self, granularity: Granularity, top: usize) -> Self {
        self.default_granularity = granularity;
        self.default_top = top.clamp(limits::DASHBOARD_TOP_MIN, limits::DASHBOARD_TOP_MAX);
        self
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::dashboard_page))
        .route("/api/summary", get(handlers::summary_json))
        .route("/health", get(handlers::health))
        .layer(middleware::from_fn(log_requests))
        .with_state(state)
}

async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let path = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_default();
    let started = Instant::now();

    let response = next.run(request).await;
    log_request(
        &method,
        &path,
        response.status().as_u16(),
        started.elapsed().as_millis(),
    );
    response
}

pub async fn bind(addr: SocketAddr) -> Result<TcpListener> {
    TcpListener::bind(addr).await.map_err(|e| {
        SalesboardError::Server(format!("Failed to bind {addr}: {e}"))
    })
}

/// Serve until Ctrl+C or SIGTERM
pub async fn serve(listener: TcpListener, state: AppState) -> Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!("listening on {addr}");
    }
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| SalesboardError::Server(e.to_string()))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutting down");
}
