//! API Models Module
//!
//! Server configuration and the error body returned for rejected requests.
//! The analyze request/response bodies are the core crate's wire types.

use serde::{Deserialize, Serialize};

/// Configuration for the API server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// Error body for rejected requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_config_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_error_response_shape() {
        let body = ErrorResponse {
            error: "No query".to_string(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["error"], "No query");
    }
}
