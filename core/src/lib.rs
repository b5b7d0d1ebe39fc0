//! Smart Engine Core Module
//!
//! The core module holds the request/response lifecycle for the single
//! analysis input: the interaction controller and its submission gate, the
//! analysis data model, the HTTP client behind a swappable transport, the
//! pure result projection, and engine configuration.
//!
//! Presentation layers consume exactly the controller surface (request
//! state, analysis, query, set_query, submit) plus [`render::project`];
//! nothing else is exposed for them to read.

pub mod analysis;
pub mod client;
pub mod config;
pub mod controller;
pub mod render;
pub mod transport;

pub use analysis::{Analysis, AnalysisEnvelope, AnalyzeRequest};
pub use client::{AnalysisClient, ClientError};
pub use config::EngineConfig;
pub use controller::{InteractionController, RequestState};
pub use render::{project, Report, ResultView};
pub use transport::{FakeTransport, SyncTransport, Transport, TransportError, UreqTransport};
