//! Analysis endpoint client
//!
//! Posts `{"query": ...}` to the analysis endpoint and parses the
//! `{"analysis": ...}` envelope. Network failures, non-2xx statuses, and
//! malformed bodies all collapse into [`ClientError`]; the controller folds
//! every one of them into the same settlement outcome.

use tracing::debug;

use crate::analysis::{Analysis, AnalysisEnvelope, AnalyzeRequest};
use crate::config::EngineConfig;
use crate::transport::{SyncTransport, Transport, TransportError, UreqTransport};

/// Client errors
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Transport-level failure (network, non-2xx, IO)
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Response body did not parse as an analysis envelope
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Client for the analysis endpoint
#[derive(Debug)]
pub struct AnalysisClient {
    /// Full URL of the analysis endpoint
    endpoint: String,
    /// HTTP transport
    transport: Transport,
}

impl AnalysisClient {
    /// Create client with the real HTTP transport
    pub fn new(endpoint: String) -> Self {
        Self {
            endpoint,
            transport: Transport::default(),
        }
    }

    /// Create client with custom transport (for testing)
    pub fn with_transport(endpoint: String, transport: Transport) -> Self {
        Self {
            endpoint,
            transport,
        }
    }

    /// Create client from engine configuration
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            endpoint: config.endpoint.clone(),
            transport: Transport::Real(UreqTransport::with_timeout(config.timeout_seconds)),
        }
    }

    /// Get endpoint URL
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Get transport (for call-count assertions in tests)
    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    /// Submit a query snapshot for analysis
    pub fn analyze(&self, query: &str) -> Result<Analysis, ClientError> {
        let body = serde_json::to_string(&AnalyzeRequest {
            query: query.to_string(),
        })
        .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;

        debug!("POST {} (body_len={})", self.endpoint, body.len());

        let response = self.transport.post_json(
            &self.endpoint,
            &[("Content-Type", "application/json")],
            &body,
        )?;

        let envelope: AnalysisEnvelope = serde_json::from_str(&response)
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;

        Ok(envelope.analysis)
    }
}
