//! API Handlers Module
//!
//! This module contains the request handlers for the analysis API.

use axum::{extract::State, http::StatusCode, response::Json};
use std::collections::HashMap;
use std::sync::Arc;

use smart_engine_core::{AnalysisEnvelope, AnalyzeRequest};

use crate::models::ErrorResponse;
use crate::upstream::UpstreamClient;

/// Represents the state of the API server
pub struct ApiState {
    /// Upstream generation client
    pub upstream: UpstreamClient,
}

/// Health check endpoint
pub async fn health_check() -> Json<HashMap<String, String>> {
    let mut response = HashMap::new();
    response.insert("status".to_string(), "healthy".to_string());
    response.insert("service".to_string(), "smart-engine-api".to_string());
    Json(response)
}

/// Analyze a query
///
/// Empty queries are the only rejection (400). Everything else answers 200
/// with an analysis envelope; upstream problems arrive as analysis-shaped
/// content rather than error statuses, so clients have a single success
/// path.
pub async fn analyze(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalysisEnvelope>, (StatusCode, Json<ErrorResponse>)> {
    if request.query.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "No query".to_string(),
            }),
        ));
    }

    tracing::debug!("analyzing query ({} chars)", request.query.len());

    let analysis = state.upstream.generate_analysis(&request.query).await;
    Ok(Json(AnalysisEnvelope { analysis }))
}
