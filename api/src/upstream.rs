//! Upstream LLM integration
//!
//! Forwards the query to a Gemini-style `generateContent` endpoint and shapes
//! whatever comes back into an [`Analysis`]. This call never surfaces an
//! error to the handler: missing configuration, upstream failures, and
//! malformed bodies all fold into analysis-shaped content, so the endpoint
//! always answers with the same envelope.

use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, warn};

use smart_engine_core::Analysis;

/// Default Gemini API base URL
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model for analysis generation
const DEFAULT_MODEL: &str = "gemini-2.5-flash-preview-09-2025";

/// System instruction forcing the four-key JSON shape
const SYSTEM_INSTRUCTION: &str =
    "Return ONLY a JSON object with keys: summary, ghost_truth, context, actions (list).";

/// Upstream request timeout
const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the upstream generation endpoint
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    /// API base URL
    base_url: String,
    /// Model name
    model: String,
    /// API key (empty means unconfigured)
    api_key: String,
    /// Shared HTTP client
    http: reqwest::Client,
}

impl UpstreamClient {
    /// Create client with explicit settings
    pub fn new(base_url: String, model: String, api_key: String) -> Self {
        Self {
            base_url,
            model,
            api_key,
            http: reqwest::Client::new(),
        }
    }

    /// Create client from the `GEMINI_API_KEY` environment variable
    pub fn from_env() -> Self {
        let api_key = std::env::var("GEMINI_API_KEY").unwrap_or_default();
        Self::new(
            DEFAULT_BASE_URL.to_string(),
            DEFAULT_MODEL.to_string(),
            api_key,
        )
    }

    /// Generate an analysis for the query
    ///
    /// Infallible by design: every failure class becomes analysis-shaped
    /// content, matching what the interface expects to render.
    pub async fn generate_analysis(&self, query: &str) -> Analysis {
        if self.api_key.is_empty() {
            warn!("GEMINI_API_KEY not configured");
            return missing_key_analysis();
        }

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let payload = json!({
            "contents": [{"parts": [{"text": query}]}],
            "systemInstruction": {"parts": [{"text": SYSTEM_INSTRUCTION}]},
            "generationConfig": {"responseMimeType": "application/json"}
        });

        debug!("forwarding query to upstream model {}", self.model);

        let response = self
            .http
            .post(&url)
            .timeout(UPSTREAM_TIMEOUT)
            .json(&payload)
            .send()
            .await;

        let body = match response {
            Ok(response) => match response.json::<Value>().await {
                Ok(body) => body,
                Err(e) => {
                    warn!("upstream body read failed: {}", e);
                    return connection_error_analysis(&e.to_string());
                }
            },
            Err(e) => {
                warn!("upstream request failed: {}", e);
                return connection_error_analysis(&e.to_string());
            }
        };

        parse_generate_response(&body)
    }
}

/// Extract an analysis from a `generateContent` response body
///
/// The model is instructed to emit a bare JSON object as its text part; that
/// text is parsed as the analysis. A body without candidates (an upstream
/// error report) is surfaced verbatim in the ghost_truth field.
pub fn parse_generate_response(body: &Value) -> Analysis {
    let raw_text = body
        .get("candidates")
        .and_then(|c| c.get(0))
        .and_then(|c| c.pointer("/content/parts/0/text"))
        .and_then(Value::as_str);

    match raw_text {
        Some(text) => match serde_json::from_str(text) {
            Ok(analysis) => analysis,
            Err(e) => {
                warn!("model emitted unparseable analysis: {}", e);
                api_error_analysis(&body.to_string())
            }
        },
        None => api_error_analysis(&body.to_string()),
    }
}

fn missing_key_analysis() -> Analysis {
    Analysis {
        summary: "API Key Missing.".to_string(),
        ghost_truth: "The system requires an identity to process this request.".to_string(),
        context: "Configuration Error".to_string(),
        actions: vec!["Set GEMINI_API_KEY in the server environment".to_string()],
    }
}

fn api_error_analysis(detail: &str) -> Analysis {
    Analysis {
        summary: "API Error".to_string(),
        ghost_truth: detail.to_string(),
        context: "Error".to_string(),
        actions: vec!["Retry".to_string()],
    }
}

fn connection_error_analysis(detail: &str) -> Analysis {
    Analysis {
        summary: "Connection Error".to_string(),
        ghost_truth: detail.to_string(),
        context: "Error".to_string(),
        actions: vec!["Retry".to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_candidate() {
        let body = json!({
            "candidates": [{
                "content": {"parts": [{
                    "text": r#"{"summary":"S","ghost_truth":"G","context":"C","actions":["a"]}"#
                }]}
            }]
        });

        let analysis = parse_generate_response(&body);
        assert_eq!(analysis.summary, "S");
        assert_eq!(analysis.actions, vec!["a"]);
    }

    #[test]
    fn test_parse_missing_candidates_is_api_error() {
        let body = json!({"error": {"code": 429, "message": "quota"}});
        let analysis = parse_generate_response(&body);
        assert_eq!(analysis.summary, "API Error");
        assert!(analysis.ghost_truth.contains("quota"));
        assert_eq!(analysis.actions, vec!["Retry"]);
    }

    #[test]
    fn test_parse_non_json_model_text_is_api_error() {
        let body = json!({
            "candidates": [{
                "content": {"parts": [{"text": "I cannot comply."}]}
            }]
        });
        let analysis = parse_generate_response(&body);
        assert_eq!(analysis.summary, "API Error");
    }

    #[tokio::test]
    async fn test_missing_key_short_circuits() {
        let client = UpstreamClient::new(
            DEFAULT_BASE_URL.to_string(),
            DEFAULT_MODEL.to_string(),
            String::new(),
        );
        let analysis = client.generate_analysis("q").await;
        assert_eq!(analysis.summary, "API Key Missing.");
    }
}
