//! API Server Module
//!
//! This module contains the server setup functionality for the analysis API.

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::handlers::{analyze, health_check, ApiState};
use crate::models::ApiConfig;
use crate::upstream::UpstreamClient;

/// Main API server
pub struct ApiServer {
    /// Server configuration
    config: ApiConfig,
    /// Shared state
    state: Arc<ApiState>,
}

impl ApiServer {
    /// Create a new API server
    pub fn new(config: ApiConfig, upstream: UpstreamClient) -> Self {
        let state = Arc::new(ApiState { upstream });
        Self { config, state }
    }

    /// Build the router (separate from start for testing)
    pub fn router(&self) -> Router {
        Router::new()
            .route("/api/analyze", post(analyze))
            .route("/health", get(health_check))
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Start the API server
    pub async fn start(&self) -> Result<()> {
        info!(
            "Starting Smart Engine API server on {}:{}",
            self.config.host, self.config.port
        );

        let app = self.router();

        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port).parse()?;
        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!("Smart Engine API server listening on {}", addr);

        axum::serve(listener, app)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to start API server: {}", e))?;

        Ok(())
    }
}
