//! Smart Engine API Module
//!
//! The API module provides the analysis HTTP endpoint: it accepts a query,
//! forwards it to the upstream generation model, and answers with the
//! analysis envelope the interface renders.

pub mod handlers;
pub mod models;
pub mod server;
pub mod upstream;

pub use handlers::*;
pub use models::*;
pub use server::*;
pub use upstream::UpstreamClient;
