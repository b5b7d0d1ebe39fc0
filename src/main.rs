//! Smart Engine CLI
//!
//! Mode routing:
//! - `tui` (default) — interactive terminal interface
//! - `serve` — run the analysis API server
//! - `analyze <query>` — one-shot analysis printed to stdout

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use smart_engine_api::{ApiConfig, ApiServer, UpstreamClient};
use smart_engine_core::{
    project, AnalysisClient, EngineConfig, InteractionController, ResultView,
};
use smart_engine_tui::TuiRunner;

#[derive(Parser)]
#[command(name = "smart-engine", version, about = "High-fidelity intelligence & synthesis")]
struct Cli {
    /// Path to config file (default: <config_dir>/smart-engine/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the interactive terminal interface (default)
    Tui,
    /// Run the analysis API server
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        /// Port to listen on
        #[arg(long, default_value_t = 8080)]
        port: u16,
    },
    /// Analyze a single query and print the result
    Analyze {
        /// Free text or a URL
        query: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = EngineConfig::load(cli.config.as_deref())?;

    match cli.command.unwrap_or(Command::Tui) {
        Command::Tui => TuiRunner::new(config).run(),
        Command::Serve { host, port } => run_serve(host, port),
        Command::Analyze { query } => run_analyze(config, &query),
    }
}

/// Run the API server on a fresh runtime
fn run_serve(host: String, port: u16) -> Result<()> {
    let server = ApiServer::new(ApiConfig { host, port }, UpstreamClient::from_env());
    tokio::runtime::Runtime::new()?.block_on(server.start())
}

/// One-shot analysis: gate, blocking request, print the projected report
fn run_analyze(config: EngineConfig, query: &str) -> Result<()> {
    let client = AnalysisClient::from_config(&config);
    let mut controller = InteractionController::with_fallback_content(config.use_fallback_content);
    controller.set_query(query);

    if !controller.submit(&client) {
        anyhow::bail!("Nothing to analyze: query is empty");
    }

    match project(controller.request_state(), controller.analysis()) {
        ResultView::Report(report) => {
            println!("Synthesis: {}", report.summary);
            println!("Perspective: \"{}\"", report.ghost_truth);
            println!("Context: {}", report.context);
            println!("Actionable Items:");
            for item in &report.actions {
                println!("  {}", item);
            }
        }
        _ => {
            // Silent-drop configuration settled without a result.
            println!("No result.");
        }
    }

    Ok(())
}
