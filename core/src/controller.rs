//! Interaction controller — the request/response lifecycle state machine
//!
//! Owns the single state triple (query text, request state, last analysis)
//! and mediates every transition. The submission gate lives here: a submit
//! attempt is accepted only when the trimmed query is non-empty and no
//! request is already in flight, so at most one outbound request ever
//! exists and settlements can never race.
//!
//! Failure handling is configurable, not duplicated: with
//! `use_fallback_content` on (the default) a failed request settles into the
//! fixed fallback analysis, indistinguishable in shape from a real result;
//! with it off the failure is logged and the settlement leaves no result.

use tracing::{debug, warn};

use crate::analysis::Analysis;
use crate::client::{AnalysisClient, ClientError};

/// Lifecycle state of the single outstanding request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestState {
    /// No request has been issued since the last reset
    Idle,
    /// Exactly one request is in flight
    Pending,
    /// The last request reached a final outcome
    Settled,
}

/// Owns the query text, request state, and last analysis
#[derive(Debug)]
pub struct InteractionController {
    /// Raw text currently held by the input control
    query: String,
    /// Lifecycle state
    request_state: RequestState,
    /// Result of the last settled request, if any
    analysis: Option<Analysis>,
    /// Substitute the fixed fallback analysis on failure (vs. silent drop)
    use_fallback_content: bool,
}

impl InteractionController {
    /// Create controller with fallback content on failure (the default)
    pub fn new() -> Self {
        Self::with_fallback_content(true)
    }

    /// Create controller selecting the failure behavior
    pub fn with_fallback_content(use_fallback_content: bool) -> Self {
        Self {
            query: String::new(),
            request_state: RequestState::Idle,
            analysis: None,
            use_fallback_content,
        }
    }

    /// Current input text
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Current lifecycle state
    pub fn request_state(&self) -> RequestState {
        self.request_state
    }

    /// Result of the last settled request
    pub fn analysis(&self) -> Option<&Analysis> {
        self.analysis.as_ref()
    }

    /// Replace the held input text
    ///
    /// Unconditional, no side effects. Allowed while Pending; the in-flight
    /// request carries its own snapshot and is unaffected.
    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query = text.into();
    }

    /// Run the submission gate and open a request
    ///
    /// Accepts iff the trimmed query is non-empty and no request is in
    /// flight. On acceptance the state moves to Pending, the previous
    /// analysis is discarded, and an immutable snapshot of the query is
    /// returned for the caller to send. A rejected attempt returns None
    /// with no observable state change.
    pub fn begin_submit(&mut self) -> Option<String> {
        if self.query.trim().is_empty() {
            debug!("submit rejected: empty query");
            return None;
        }
        if self.request_state == RequestState::Pending {
            debug!("submit rejected: request already in flight");
            return None;
        }

        self.request_state = RequestState::Pending;
        self.analysis = None;
        Some(self.query.clone())
    }

    /// Settle the in-flight request
    ///
    /// Always exits Pending into Settled, whichever branch. A failure never
    /// surfaces as a distinct error state: it either becomes the fixed
    /// fallback analysis or (silent-drop variant) is logged and leaves no
    /// result.
    pub fn settle(&mut self, outcome: Result<Analysis, ClientError>) {
        match outcome {
            Ok(analysis) => {
                self.analysis = Some(analysis);
            }
            Err(err) => {
                if self.use_fallback_content {
                    warn!("analysis request failed, using fallback: {}", err);
                    self.analysis = Some(Analysis::fallback());
                } else {
                    warn!("analysis request failed: {}", err);
                    self.analysis = None;
                }
            }
        }
        self.request_state = RequestState::Settled;
    }

    /// Gate, send, and settle in one blocking call
    ///
    /// Convenience for one-shot use (CLI mode, tests). Returns true if the
    /// gate accepted and a request was issued.
    pub fn submit(&mut self, client: &AnalysisClient) -> bool {
        let Some(snapshot) = self.begin_submit() else {
            return false;
        };
        let outcome = client.analyze(&snapshot);
        self.settle(outcome);
        true
    }
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{FakeTransport, SyncTransport, Transport};

    const OK_BODY: &str =
        r#"{"analysis":{"summary":"S","ghost_truth":"G","context":"C","actions":["a","b"]}}"#;

    fn fake_client(body: &str) -> AnalysisClient {
        AnalysisClient::with_transport(
            "http://localhost/api/analyze".to_string(),
            Transport::Fake(FakeTransport::new(body)),
        )
    }

    fn failing_client() -> AnalysisClient {
        AnalysisClient::with_transport(
            "http://localhost/api/analyze".to_string(),
            Transport::Fake(FakeTransport::with_error("connection refused")),
        )
    }

    fn call_count(client: &AnalysisClient) -> usize {
        match client.transport() {
            Transport::Fake(t) => t.call_count(),
            Transport::Real(_) => panic!("expected fake transport"),
        }
    }

    #[test]
    fn test_empty_query_is_rejected() {
        let client = fake_client(OK_BODY);
        let mut controller = InteractionController::new();

        assert!(!controller.submit(&client));
        assert_eq!(controller.request_state(), RequestState::Idle);
        assert!(controller.analysis().is_none());
        assert_eq!(call_count(&client), 0);
    }

    #[test]
    fn test_whitespace_query_is_rejected() {
        let client = fake_client(OK_BODY);
        let mut controller = InteractionController::new();
        controller.set_query("   \t  ");

        assert!(!controller.submit(&client));
        assert_eq!(controller.request_state(), RequestState::Idle);
        assert_eq!(call_count(&client), 0);
    }

    #[test]
    fn test_duplicate_submit_while_pending_is_noop() {
        let mut controller = InteractionController::new();
        controller.set_query("topic");

        let snapshot = controller.begin_submit();
        assert_eq!(snapshot.as_deref(), Some("topic"));
        assert_eq!(controller.request_state(), RequestState::Pending);

        // Second attempt while the first is still in flight: dropped.
        assert!(controller.begin_submit().is_none());
        assert_eq!(controller.request_state(), RequestState::Pending);
        assert!(controller.analysis().is_none());
    }

    #[test]
    fn test_single_flight_issues_one_request() {
        let client = fake_client(OK_BODY);
        let mut controller = InteractionController::new();
        controller.set_query("topic");

        let snapshot = controller.begin_submit().unwrap();
        // Rapid second submit before settlement: no second request.
        assert!(controller.begin_submit().is_none());

        controller.settle(client.analyze(&snapshot));
        assert_eq!(call_count(&client), 1);
    }

    #[test]
    fn test_pending_clears_previous_analysis() {
        let client = fake_client(OK_BODY);
        let mut controller = InteractionController::new();
        controller.set_query("topic");
        assert!(controller.submit(&client));
        assert!(controller.analysis().is_some());

        // Next accepted submission discards the old result before sending.
        let snapshot = controller.begin_submit();
        assert!(snapshot.is_some());
        assert_eq!(controller.request_state(), RequestState::Pending);
        assert!(controller.analysis().is_none());
    }

    #[test]
    fn test_success_settles_with_analysis() {
        let client = fake_client(OK_BODY);
        let mut controller = InteractionController::new();
        controller.set_query("https://example.com/article");

        assert!(controller.submit(&client));
        assert_eq!(controller.request_state(), RequestState::Settled);
        let analysis = controller.analysis().unwrap();
        assert_eq!(analysis.summary, "S");
        assert_eq!(analysis.actions, vec!["a", "b"]);
    }

    #[test]
    fn test_failure_settles_with_fallback() {
        let client = failing_client();
        let mut controller = InteractionController::new();
        controller.set_query("topic");

        assert!(controller.submit(&client));
        assert_eq!(controller.request_state(), RequestState::Settled);
        let analysis = controller.analysis().unwrap();
        assert_eq!(analysis.summary, "Connection interrupted.");
    }

    #[test]
    fn test_fallback_is_idempotent_across_failures() {
        let client = failing_client();
        let mut controller = InteractionController::new();
        controller.set_query("topic");

        assert!(controller.submit(&client));
        let first = controller.analysis().cloned().unwrap();

        assert!(controller.submit(&client));
        let second = controller.analysis().cloned().unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_silent_drop_variant_settles_without_analysis() {
        let client = failing_client();
        let mut controller = InteractionController::with_fallback_content(false);
        controller.set_query("topic");

        assert!(controller.submit(&client));
        assert_eq!(controller.request_state(), RequestState::Settled);
        assert!(controller.analysis().is_none());
    }

    #[test]
    fn test_parse_failure_settles_with_fallback() {
        let client = fake_client("<html>gateway error</html>");
        let mut controller = InteractionController::new();
        controller.set_query("topic");

        assert!(controller.submit(&client));
        assert_eq!(controller.request_state(), RequestState::Settled);
        assert_eq!(
            controller.analysis().unwrap().summary,
            "Connection interrupted."
        );
    }

    #[test]
    fn test_edits_while_pending_do_not_touch_snapshot() {
        let mut controller = InteractionController::new();
        controller.set_query("original");

        let snapshot = controller.begin_submit().unwrap();
        controller.set_query("edited while in flight");

        assert_eq!(snapshot, "original");
        assert_eq!(controller.query(), "edited while in flight");
        assert_eq!(controller.request_state(), RequestState::Pending);
    }

    #[test]
    fn test_input_usable_after_failure() {
        let failing = failing_client();
        let ok = fake_client(OK_BODY);
        let mut controller = InteractionController::new();

        controller.set_query("topic");
        assert!(controller.submit(&failing));

        // Pending has cleared, a new submission goes through.
        controller.set_query("second try");
        assert!(controller.submit(&ok));
        assert_eq!(controller.analysis().unwrap().summary, "S");
    }

    #[test]
    fn test_fake_transport_records_outbound_body() {
        // The snapshot text is what travels, not the edited query.
        let transport = FakeTransport::new(OK_BODY);
        let result = transport.post_json("http://test", &[], r#"{"query":"snap"}"#);
        assert!(result.is_ok());
        assert_eq!(transport.call_count(), 1);
    }
}
