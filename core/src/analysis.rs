//! Analysis result model
//!
//! The structured result returned by the analysis endpoint, plus the fixed
//! fallback value substituted when the remote call fails.
//!
//! Wire tolerance: the service is not trusted to be well-shaped. Every field
//! defaults when absent, and `actions` accepts absent or non-array values as
//! an empty list instead of failing deserialization.

use serde::de::Deserializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Structured analysis of a query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    /// Primary synthesis text
    #[serde(default)]
    pub summary: String,
    /// Contrasting or skeptical perspective on the input
    #[serde(default)]
    pub ghost_truth: String,
    /// Background / situating information
    #[serde(default)]
    pub context: String,
    /// Ordered action items (empty is valid, rendered as an empty list)
    #[serde(default, deserialize_with = "actions_or_empty")]
    pub actions: Vec<String>,
}

impl Analysis {
    /// Fixed fallback substituted when the remote call fails
    pub fn fallback() -> Self {
        Self {
            summary: "Connection interrupted.".to_string(),
            ghost_truth: "Network timeout.".to_string(),
            context: "The request exceeded the processing window.".to_string(),
            actions: vec![
                "Try pasting the raw text".to_string(),
                "Check the URL accessibility".to_string(),
            ],
        }
    }
}

/// Success response body from the analysis endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisEnvelope {
    pub analysis: Analysis,
}

/// Outbound request body to the analysis endpoint
///
/// `query` defaults when absent so the server answers a missing key the
/// same way as an empty one (400, not a deserialization rejection).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub query: String,
}

/// Deserialize `actions` leniently.
///
/// Absent or non-array values become an empty list. Array elements that are
/// not strings are stringified rather than dropped.
fn actions_or_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let items = match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => s,
                other => other.to_string(),
            })
            .collect(),
        _ => Vec::new(),
    };
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_envelope() {
        let body = r#"{"analysis":{"summary":"S","ghost_truth":"G","context":"C","actions":["a","b"]}}"#;
        let envelope: AnalysisEnvelope = serde_json::from_str(body).unwrap();
        assert_eq!(envelope.analysis.summary, "S");
        assert_eq!(envelope.analysis.ghost_truth, "G");
        assert_eq!(envelope.analysis.context, "C");
        assert_eq!(envelope.analysis.actions, vec!["a", "b"]);
    }

    #[test]
    fn test_missing_actions_is_empty() {
        let body = r#"{"summary":"S","ghost_truth":"G","context":"C"}"#;
        let analysis: Analysis = serde_json::from_str(body).unwrap();
        assert!(analysis.actions.is_empty());
    }

    #[test]
    fn test_non_array_actions_is_empty() {
        let body = r#"{"summary":"S","actions":"not a list"}"#;
        let analysis: Analysis = serde_json::from_str(body).unwrap();
        assert!(analysis.actions.is_empty());

        let body = r#"{"summary":"S","actions":{"0":"a"}}"#;
        let analysis: Analysis = serde_json::from_str(body).unwrap();
        assert!(analysis.actions.is_empty());
    }

    #[test]
    fn test_non_string_action_items_are_stringified() {
        let body = r#"{"actions":["check sources",42,true]}"#;
        let analysis: Analysis = serde_json::from_str(body).unwrap();
        assert_eq!(analysis.actions, vec!["check sources", "42", "true"]);
    }

    #[test]
    fn test_missing_fields_default_empty() {
        let analysis: Analysis = serde_json::from_str("{}").unwrap();
        assert!(analysis.summary.is_empty());
        assert!(analysis.ghost_truth.is_empty());
        assert!(analysis.context.is_empty());
        assert!(analysis.actions.is_empty());
    }

    #[test]
    fn test_fallback_is_deterministic() {
        assert_eq!(Analysis::fallback(), Analysis::fallback());
        assert_eq!(Analysis::fallback().summary, "Connection interrupted.");
        assert_eq!(Analysis::fallback().actions.len(), 2);
    }

    #[test]
    fn test_request_without_query_key_defaults_empty() {
        let request: AnalyzeRequest = serde_json::from_str("{}").unwrap();
        assert!(request.query.is_empty());
    }

    #[test]
    fn test_request_body_shape() {
        let request = AnalyzeRequest {
            query: "https://example.com/article".to_string(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["query"], "https://example.com/article");
    }
}
