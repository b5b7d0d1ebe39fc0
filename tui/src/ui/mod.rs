//! TUI UI Module
//!
//! This module contains the UI rendering functionality for the interface.
//! It draws only what the core projection hands back: nothing while idle,
//! a skeleton while loading, the result panels once settled.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use smart_engine_core::{project, Report, RequestState, ResultView};

use crate::app::TuiApp;

/// Render the UI
pub fn render(app: &TuiApp, frame: &mut Frame) {
    let size = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Length(3), // Input bar
            Constraint::Min(0),    // Results
            Constraint::Length(1), // Status line
        ])
        .split(size);

    render_title(app, frame, chunks[0]);
    render_input(app, frame, chunks[1]);

    let view = project(app.controller.request_state(), app.controller.analysis());
    match view {
        ResultView::Empty => {}
        ResultView::Loading => render_skeleton(frame, chunks[2]),
        ResultView::Report(report) => render_report(&report, frame, chunks[2]),
    }

    render_status(app, frame, chunks[3]);
}

fn render_title(app: &TuiApp, frame: &mut Frame, area: Rect) {
    let title = Paragraph::new(format!("{} - {}", app.title, app.tagline))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(title, area);
}

fn render_input(app: &TuiApp, frame: &mut Frame, area: Rect) {
    let query = app.controller.query();
    let (text, style) = if query.is_empty() {
        (
            "Paste a URL or ask anything...".to_string(),
            Style::default().fg(Color::DarkGray),
        )
    } else {
        (format!("{}_", query), Style::default().fg(Color::White))
    };

    let input = Paragraph::new(text)
        .style(style)
        .block(Block::default().borders(Borders::ALL).title("Query"));
    frame.render_widget(input, area);
}

/// Placeholder blocks while a request is in flight
fn render_skeleton(frame: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let top = Block::default()
        .borders(Borders::ALL)
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(top, chunks[0]);

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);
    for half in halves.iter() {
        let block = Block::default()
            .borders(Borders::ALL)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(block, *half);
    }
}

/// Settled result: summary, two-up perspective/context, action list
fn render_report(report: &Report, frame: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(35),
            Constraint::Percentage(30),
            Constraint::Percentage(35),
        ])
        .split(area);

    let summary = Paragraph::new(report.summary.as_str())
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Synthesis"))
        .style(Style::default().fg(Color::White));
    frame.render_widget(summary, chunks[0]);

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    let perspective = Paragraph::new(format!("\"{}\"", report.ghost_truth))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Perspective"))
        .style(
            Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::ITALIC),
        );
    frame.render_widget(perspective, halves[0]);

    let context = Paragraph::new(report.context.as_str())
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Context"))
        .style(Style::default().fg(Color::Green));
    frame.render_widget(context, halves[1]);

    let items: Vec<ListItem> = report
        .actions
        .iter()
        .map(|item| ListItem::new(item.as_str()).style(Style::default().fg(Color::White)))
        .collect();
    let actions = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Actionable Items"),
    );
    frame.render_widget(actions, chunks[2]);
}

fn render_status(app: &TuiApp, frame: &mut Frame, area: Rect) {
    let text = match app.controller.request_state() {
        RequestState::Pending => "Analyzing... (submit disabled)",
        _ => "Enter to analyze, Esc to quit",
    };
    let status = Paragraph::new(text).style(Style::default().fg(Color::Gray));
    frame.render_widget(status, area);
}
