//! A paginated two-axis page grid for the terminal.
//!
//! Rows stack vertically; each row holds a main page followed by cards to
//! its right. Navigate with the keyboard, the mouse wheel, or by dragging
//! with the left button; pages snap into place with a spring.

mod app;
mod config;
mod core;
mod ui;

use std::fs::File;
use std::io::{self, stderr, Stderr};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing_subscriber::EnvFilter;

use crate::app::{
    event::{self, AppEvent},
    handler,
    state::{ActiveView, AppState},
};
use crate::core::{axis::Axis, grid::Grid};
use crate::ui::{grid_widget::GridWidget, layout::AppLayout, popup, theme::Theme};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Swipeable page grid for the terminal")]
struct Cli {
    /// Layout file (`Row = Card A, Card B` per line). Uses the built-in
    /// layout when omitted.
    #[arg(long)]
    layout: Option<PathBuf>,

    /// Release speed (px/s) above which a drag flings to the next page.
    #[arg(long)]
    threshold: Option<f64>,

    /// Animation frame rate.
    #[arg(long)]
    fps: Option<u32>,

    /// Write logs here instead of stderr.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_tracing(log_file: Option<&PathBuf>) -> Result<()> {
    let builder = tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env());
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating log file {}", path.display()))?;
            builder.with_writer(Mutex::new(file)).with_ansi(false).init();
        }
        None => builder.with_writer(io::stderr).init(),
    }
    Ok(())
}

fn load_grid(path: Option<&PathBuf>) -> Result<Grid> {
    let Some(path) = path else {
        return Ok(Grid::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading layout {}", path.display()))?;
    let grid = Grid::parse(&text).with_context(|| format!("parsing layout {}", path.display()))?;
    Ok(grid)
}

// ───────────────────────────────────────── drawing ───────────

/// `"Swap - Card B  3/7 · 3/6"`: current page title and position.
fn position_label(state: &AppState) -> String {
    let (row, column) = state.nav.active_cell();
    let title = state
        .grid
        .cell(row, column)
        .map(|c| c.title())
        .unwrap_or_default();
    format!(
        "{title}  {}/{} · {}/{}",
        row + 1,
        state.nav.count(Axis::Vertical),
        column + 1,
        state.nav.count(Axis::Horizontal),
    )
}

fn draw(frame: &mut Frame, state: &AppState) {
    let layout = AppLayout::from_area(frame.area());

    let grid = GridWidget::new(
        &state.grid,
        state.metrics(),
        state.nav.offsets(),
        state.nav.active_cell(),
    );
    frame.render_widget(grid, layout.pages_area);

    let hint = state.config.status_bar_hint();
    let status = match state.active_view {
        ActiveView::Pages => Line::from(vec![
            Span::styled(format!(" {} ", position_label(state)), Theme::status_position_style()),
            Span::raw(" "),
            Span::raw(state.status_message.as_deref().unwrap_or(&hint)),
        ]),
        ActiveView::SettingsMenu | ActiveView::ControlsSubmenu => {
            Line::raw(state.status_message.as_deref().unwrap_or(""))
        }
    };
    frame.render_widget(
        Paragraph::new(status).style(Theme::status_bar_style()),
        layout.status_area,
    );

    match state.active_view {
        ActiveView::SettingsMenu => {
            frame.render_widget(popup::SettingsPopup { state }, frame.area());
        }
        ActiveView::ControlsSubmenu => {
            frame.render_widget(
                popup::ControlsPopup {
                    config: &state.config,
                    selected: state.controls_selected,
                    awaiting_rebind: state.awaiting_rebind,
                },
                frame.area(),
            );
        }
        ActiveView::Pages => {}
    }
}

// ───────────────────────────────────────── main ─────────────

/// Drain events until quit. Redraws only after something changed.
async fn run(
    terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    state: &mut AppState,
    events: &mut UnboundedReceiver<AppEvent>,
) -> Result<()> {
    loop {
        if state.needs_redraw {
            terminal.draw(|frame| draw(frame, state))?;
            state.needs_redraw = false;
        }

        let Some(event) = events.recv().await else {
            return Ok(());
        };
        match event {
            AppEvent::Key(k) => handler::handle_key(state, k),
            AppEvent::Mouse(m) => handler::handle_mouse(state, m),
            AppEvent::Resize(w, h) => handler::handle_resize(state, w, h),
            AppEvent::Frame(dt) => handler::handle_frame(state, dt),
        }

        if state.should_quit {
            return Ok(());
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_ref())?;

    let grid = load_grid(cli.layout.as_ref())?;
    let mut user_config = config::AppConfig::load();
    if let Some(threshold) = cli.threshold {
        user_config.velocity_threshold = threshold.abs().clamp(50.0, 10_000.0);
    }
    if let Some(fps) = cli.fps {
        user_config.fps = fps.clamp(10, 240);
    }
    tracing::info!(
        rows = grid.row_count(),
        columns = grid.column_count(),
        threshold = user_config.velocity_threshold,
        fps = user_config.fps,
        "starting"
    );

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode().context("enabling raw mode")?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    let size = terminal.size()?;
    let fps = user_config.fps;
    let mut state = AppState::new(grid, user_config, Rect::new(0, 0, size.width, size.height));

    // ── event sources ─────────────────────────────────────────
    let (tx, mut events) = event::channel();
    event::spawn_event_reader(tx.clone(), Duration::from_millis(100));
    event::spawn_frame_clock(tx, fps);

    // ── event loop ────────────────────────────────────────────
    let result = run(&mut terminal, &mut state, &mut events).await;

    // Closing the channel stops both producers.
    drop(events);

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    let (row, column) = state.nav.active_cell();
    tracing::info!(row, column, "exiting");
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[test]
    fn position_label_tracks_active_cell() {
        let mut state = AppState::new(Grid::default(), AppConfig::default(), Rect::new(0, 0, 80, 25));
        assert_eq!(position_label(&state), "Dashboard  1/7 · 1/6");
        state.nav.go_to(Axis::Vertical, 2);
        state.nav.go_to(Axis::Horizontal, 2);
        assert_eq!(position_label(&state), "Swap - Card B  3/7 · 3/6");
    }

    #[test]
    fn cli_accepts_all_flags() {
        let cli = Cli::try_parse_from([
            "page-grid",
            "--layout",
            "pages.txt",
            "--threshold",
            "800",
            "--fps",
            "30",
            "--log-file",
            "nav.log",
        ])
        .unwrap();
        assert_eq!(cli.layout, Some(PathBuf::from("pages.txt")));
        assert_eq!(cli.threshold, Some(800.0));
        assert_eq!(cli.fps, Some(30));
        assert_eq!(cli.log_file, Some(PathBuf::from("nav.log")));
    }
}
