//! Central application state.
//!
//! All mutable state lives here so that rendering is a pure function over
//! `&AppState` and event handling a function over `&mut AppState`. The
//! navigation controller inside is the only writer of the active page.

use std::time::Instant;

use ratatui::layout::Rect;

use crate::config::AppConfig;
use crate::core::{
    gesture::VelocityTracker,
    grid::Grid,
    nav::{NavEvent, NavigationController},
    projection::CellMetrics,
    snap::SnapResolver,
};
use crate::ui::layout::AppLayout;

/// Which view / overlay is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Pages,
    SettingsMenu,
    ControlsSubmenu,
}

/// Pointer-side bookkeeping for an in-progress mouse drag.
#[derive(Debug, Clone)]
pub struct PointerDrag {
    /// Terminal cell where the button went down.
    pub origin: (u16, u16),
    pub tracker: VelocityTracker,
}

impl PointerDrag {
    pub fn new(column: u16, row: u16, at: Instant) -> Self {
        let mut tracker = VelocityTracker::new();
        tracker.record(at, 0.0, 0.0);
        Self {
            origin: (column, row),
            tracker,
        }
    }
}

/// Top-level application state.
pub struct AppState {
    pub grid: Grid,
    pub nav: NavigationController,
    pub config: AppConfig,
    /// Full terminal area (last known size).
    pub terminal_area: Rect,
    /// Mouse drag in progress, if any.
    pub pointer: Option<PointerDrag>,
    pub should_quit: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    pub active_view: ActiveView,
    pub settings_selected: usize,
    pub controls_selected: usize,
    /// When `true`, the controls submenu is waiting for a key to bind.
    pub awaiting_rebind: bool,
    /// Set by handlers when the next loop iteration must redraw.
    pub needs_redraw: bool,
}

impl AppState {
    pub fn new(grid: Grid, config: AppConfig, terminal_area: Rect) -> Self {
        let viewport = page_viewport(terminal_area, config.cell_metrics);
        let nav = NavigationController::new(
            grid.row_count(),
            grid.column_count(),
            viewport,
            SnapResolver::new(config.velocity_threshold),
        );
        Self {
            grid,
            nav,
            config,
            terminal_area,
            pointer: None,
            should_quit: false,
            status_message: None,
            active_view: ActiveView::default(),
            settings_selected: 0,
            controls_selected: 0,
            awaiting_rebind: false,
            needs_redraw: true,
        }
    }

    pub fn layout(&self) -> AppLayout {
        AppLayout::from_area(self.terminal_area)
    }

    pub fn metrics(&self) -> CellMetrics {
        self.config.cell_metrics
    }

    /// Drop the pointer drag and close the controller's gesture with it.
    pub fn cancel_drag(&mut self) {
        self.pointer = None;
        if self.nav.is_dragging() {
            self.nav.handle(NavEvent::DragCancel);
            self.needs_redraw = true;
        }
    }

    /// Re-derive the pixel viewport after a terminal resize or a cell-metric
    /// change. Any pointer drag in flight is abandoned with it.
    pub fn sync_viewport(&mut self) {
        self.cancel_drag();
        let viewport = page_viewport(self.terminal_area, self.config.cell_metrics);
        self.nav.handle(NavEvent::ResizeNotify(viewport));
        self.needs_redraw = true;
    }
}

/// Pixel viewport of the page pane inside `terminal_area`.
pub fn page_viewport(terminal_area: Rect, metrics: CellMetrics) -> crate::core::axis::Viewport {
    let pages = AppLayout::from_area(terminal_area).pages_area;
    metrics.viewport(pages.width, pages.height)
}
