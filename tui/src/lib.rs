//! Smart Engine TUI Module
//!
//! The TUI module provides the terminal interface for Smart Engine: a single
//! input bar over the analysis result panels, driven entirely by the core
//! interaction controller.

pub mod app;
pub mod ui;

pub use app::TuiApp;
pub use ui::render;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::Terminal;
use std::io;
use tracing::info;

use smart_engine_core::EngineConfig;

/// Main TUI application runner
pub struct TuiRunner {
    /// Engine configuration
    config: EngineConfig,
}

impl TuiRunner {
    /// Create a new TUI runner
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Run the TUI application
    pub fn run(&self) -> Result<()> {
        info!("Starting Smart Engine TUI...");

        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = ratatui::backend::CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let mut app = TuiApp::new(self.config.clone());

        // Run the application
        let mut continue_running = true;
        while continue_running {
            app.drain_events();

            terminal.draw(|f| render(&app, f))?;

            if event::poll(std::time::Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    continue_running = app.handle_key_event(key);
                }
            }
        }

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        info!("Smart Engine TUI finished");
        Ok(())
    }
}
