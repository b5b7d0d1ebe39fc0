//! Result projection
//!
//! Pure function from `(request_state, analysis)` to what the presentation
//! layer should show. No state of its own; frontends draw whichever view
//! comes back and nothing else.

use crate::analysis::Analysis;
use crate::controller::RequestState;

/// What the presentation layer should show below the input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultView {
    /// Nothing below the input
    Empty,
    /// Placeholder/skeleton while a request is in flight
    Loading,
    /// Settled result panels
    Report(Report),
}

/// Display-ready settled result
///
/// Panels in fixed presentation order: summary, then the two-up
/// perspective/context pair, then the action list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub summary: String,
    pub ghost_truth: String,
    pub context: String,
    /// Action items already numbered for display ("1. ...")
    pub actions: Vec<String>,
}

/// Project the current state into a view
///
/// Settled without an analysis (the silent-drop failure variant) renders the
/// same as Idle.
pub fn project(request_state: RequestState, analysis: Option<&Analysis>) -> ResultView {
    match request_state {
        RequestState::Idle => ResultView::Empty,
        RequestState::Pending => ResultView::Loading,
        RequestState::Settled => match analysis {
            Some(analysis) => ResultView::Report(Report::from_analysis(analysis)),
            None => ResultView::Empty,
        },
    }
}

impl Report {
    fn from_analysis(analysis: &Analysis) -> Self {
        Self {
            summary: analysis.summary.clone(),
            ghost_truth: analysis.ghost_truth.clone(),
            context: analysis.context.clone(),
            actions: analysis
                .actions
                .iter()
                .enumerate()
                .map(|(i, item)| format!("{}. {}", i + 1, item))
                .collect(),
        }
    }
}
