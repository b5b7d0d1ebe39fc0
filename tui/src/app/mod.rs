//! TUI App Module
//!
//! This module contains the main TUI application logic.
//!
//! All state mutation happens on the main thread through the interaction
//! controller. The network call is the only off-thread work: an accepted
//! submission spawns a fire-and-forget worker that performs the blocking
//! request and reports the settlement back over an mpsc channel, which the
//! main loop drains every tick.

use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread::{self, JoinHandle};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use smart_engine_core::{
    Analysis, AnalysisClient, ClientError, EngineConfig, InteractionController,
};

/// Settlement event from the worker thread
#[derive(Debug)]
pub enum AnalysisEvent {
    /// The in-flight request reached its final outcome
    Settled(Result<Analysis, ClientError>),
}

/// Represents the main TUI application
pub struct TuiApp {
    /// Interaction controller (query, request state, analysis)
    pub controller: InteractionController,
    /// Application title
    pub title: String,
    /// Application tagline
    pub tagline: String,
    /// Engine configuration (endpoint, timeout, failure behavior)
    config: EngineConfig,
    /// Settlement event channel
    event_tx: Sender<AnalysisEvent>,
    event_rx: Receiver<AnalysisEvent>,
    /// Active worker thread, if a request is in flight
    worker: Option<JoinHandle<()>>,
}

impl TuiApp {
    /// Create a new TUI application
    pub fn new(config: EngineConfig) -> Self {
        let controller = InteractionController::with_fallback_content(config.use_fallback_content);
        let (event_tx, event_rx) = channel();
        Self {
            controller,
            title: "Smart Engine".to_string(),
            tagline: "High-fidelity intelligence & synthesis".to_string(),
            config,
            event_tx,
            event_rx,
            worker: None,
        }
    }

    /// Handle key events
    ///
    /// Returns true if the application should continue running.
    pub fn handle_key_event(&mut self, key_event: KeyEvent) -> bool {
        if key_event.code == KeyCode::Char('c')
            && key_event.modifiers.contains(KeyModifiers::CONTROL)
        {
            return false;
        }

        match key_event.code {
            KeyCode::Esc => return false,
            KeyCode::Enter => self.dispatch_submit(),
            KeyCode::Backspace => {
                let mut query = self.controller.query().to_string();
                query.pop();
                self.controller.set_query(query);
            }
            // Plain typing only; Ctrl/Alt chords are not input.
            KeyCode::Char(c)
                if key_event.modifiers.is_empty()
                    || key_event.modifiers == KeyModifiers::SHIFT =>
            {
                let mut query = self.controller.query().to_string();
                query.push(c);
                self.controller.set_query(query);
            }
            _ => {}
        }

        true
    }

    /// Run the submission gate and spawn the worker on acceptance
    ///
    /// The worker does only the network call; the settlement is applied on
    /// the main thread when the event is drained.
    pub fn dispatch_submit(&mut self) {
        let Some(snapshot) = self.controller.begin_submit() else {
            return;
        };

        debug!("dispatching analysis request ({} chars)", snapshot.len());

        let tx = self.event_tx.clone();
        let config = self.config.clone();
        self.worker = Some(thread::spawn(move || {
            let client = AnalysisClient::from_config(&config);
            let outcome = client.analyze(&snapshot);
            let _ = tx.send(AnalysisEvent::Settled(outcome));
        }));
    }

    /// Drain settlement events from the worker thread
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            match event {
                AnalysisEvent::Settled(outcome) => {
                    self.controller.settle(outcome);
                    self.worker = None;
                }
            }
        }
    }

    /// Sender for settlement events (tests inject settlements through this)
    #[cfg(test)]
    fn event_sender(&self) -> Sender<AnalysisEvent> {
        self.event_tx.clone()
    }
}
