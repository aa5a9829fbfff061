//! Input handling: maps key and mouse events to navigation events.
//!
//! Three adapters feed the controller: discrete key steps, discrete wheel
//! steps, and continuous pointer drags. Each event is consumed here, so
//! nothing falls through to the terminal's own scrolling.

use std::time::{Duration, Instant};

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::config::{Action, KeyBind};
use crate::core::axis::Axis;
use crate::core::nav::NavEvent;

use super::settings::{SettingsItem, SETTINGS_ITEMS};
use super::state::{ActiveView, AppState, PointerDrag};

/// Total selectable rows in the controls submenu (actions + "Reset").
pub fn controls_item_count() -> usize {
    Action::ALL.len() + 1
}

/// Feed one event to the controller and note whether anything moved.
fn navigate(state: &mut AppState, event: NavEvent) {
    if let Some(commit) = state.nav.handle(event) {
        if commit.changed() {
            tracing::debug!(
                axis = commit.axis.label(),
                to = commit.to,
                target = commit.target,
                "page committed"
            );
            state.status_message = None;
        }
    }
    state.needs_redraw = true;
}

/// Process a key event, dispatching based on the active view.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    // Ctrl+c always quits, regardless of view.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }
    if key.kind == KeyEventKind::Release {
        return;
    }

    match state.active_view {
        ActiveView::Pages => handle_pages_key(state, key),
        ActiveView::SettingsMenu => handle_settings_key(state, key),
        ActiveView::ControlsSubmenu => {
            if state.awaiting_rebind {
                handle_rebind_key(state, key);
            } else {
                handle_controls_key(state, key);
            }
        }
    }
    state.needs_redraw = true;
}

// ── Page view (configurable bindings) ───────────────────────────

fn handle_pages_key(state: &mut AppState, key: KeyEvent) {
    let Some(action) = state.config.match_key(key) else {
        return;
    };

    let event = match action {
        Action::Quit => {
            state.should_quit = true;
            return;
        }
        Action::OpenSettings => {
            state.cancel_drag();
            state.active_view = ActiveView::SettingsMenu;
            state.settings_selected = 0;
            return;
        }
        Action::PrevPage => NavEvent::StepRequest { axis: Axis::Vertical, delta: -1 },
        Action::NextPage => NavEvent::StepRequest { axis: Axis::Vertical, delta: 1 },
        Action::PrevCard => NavEvent::StepRequest { axis: Axis::Horizontal, delta: -1 },
        Action::NextCard => NavEvent::StepRequest { axis: Axis::Horizontal, delta: 1 },
        Action::FirstPage => NavEvent::GoTo { axis: Axis::Vertical, index: 0 },
        Action::LastPage => NavEvent::GoTo {
            axis: Axis::Vertical,
            index: state.nav.clamp_index(Axis::Vertical, i64::MAX),
        },
        Action::MainCard => NavEvent::GoTo { axis: Axis::Horizontal, index: 0 },
    };
    navigate(state, event);
}

// ── Settings menu (hardcoded keys) ──────────────────────────────

fn handle_settings_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
            state.active_view = ActiveView::Pages;
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.settings_selected = state.settings_selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if state.settings_selected + 1 < SETTINGS_ITEMS.len() {
                state.settings_selected += 1;
            }
        }
        KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') => {
            match SETTINGS_ITEMS.get(state.settings_selected) {
                Some(SettingsItem::Submenu { view, .. }) => {
                    state.active_view = *view;
                    state.controls_selected = 0;
                }
                Some(SettingsItem::Cycle { cycle, .. }) => cycle(state),
                None => {}
            }
        }
        _ => {}
    }
}

// ── Controls submenu (hardcoded navigation, interactive rebinding) ──

fn handle_controls_key(state: &mut AppState, key: KeyEvent) {
    let item_count = controls_item_count();

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => {
            state.active_view = ActiveView::Pages;
        }
        KeyCode::Left | KeyCode::Char('h') => {
            state.active_view = ActiveView::SettingsMenu;
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.controls_selected = state.controls_selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if state.controls_selected + 1 < item_count {
                state.controls_selected += 1;
            }
        }
        KeyCode::Enter => {
            if state.controls_selected < Action::ALL.len() {
                state.awaiting_rebind = true;
            } else {
                state.config.reset_defaults();
                save_config(state);
            }
        }
        KeyCode::Delete | KeyCode::Backspace => {
            if let Some(&action) = Action::ALL.get(state.controls_selected) {
                state.config.bindings.insert(action, Vec::new());
                save_config(state);
            }
        }
        _ => {}
    }
}

/// Capture the next key press as a new binding.
fn handle_rebind_key(state: &mut AppState, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    if key.code == KeyCode::Esc {
        state.awaiting_rebind = false;
        return;
    }
    let Some(&action) = Action::ALL.get(state.controls_selected) else {
        state.awaiting_rebind = false;
        return;
    };
    state.config.add_binding(action, KeyBind::from_key_event(key));
    save_config(state);
    state.awaiting_rebind = false;
}

fn save_config(state: &mut AppState) {
    if let Err(e) = state.config.save() {
        tracing::warn!("saving config failed: {e:#}");
        state.status_message = Some("Could not save controls".to_string());
    }
}

// ── Mouse ───────────────────────────────────────────────────────

/// Process a mouse event.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    handle_mouse_at(state, mouse, Instant::now());
}

/// [`handle_mouse`] with an explicit timestamp for velocity tracking.
pub fn handle_mouse_at(state: &mut AppState, mouse: MouseEvent, now: Instant) {
    if state.active_view != ActiveView::Pages {
        return;
    }

    match mouse.kind {
        MouseEventKind::ScrollDown => wheel_step(state, Axis::Vertical, 1, mouse.modifiers),
        MouseEventKind::ScrollUp => wheel_step(state, Axis::Vertical, -1, mouse.modifiers),
        MouseEventKind::ScrollRight => wheel_step(state, Axis::Horizontal, 1, mouse.modifiers),
        MouseEventKind::ScrollLeft => wheel_step(state, Axis::Horizontal, -1, mouse.modifiers),
        MouseEventKind::Down(MouseButton::Left) => {
            if !state.layout().in_pages(mouse.column, mouse.row) {
                return;
            }
            state.pointer = Some(PointerDrag::new(mouse.column, mouse.row, now));
            navigate(state, NavEvent::DragStart);
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            let Some((dx, dy)) = record_pointer(state, mouse, now) else {
                return;
            };
            navigate(state, NavEvent::DragUpdate { dx, dy });
        }
        MouseEventKind::Up(MouseButton::Left) => {
            let Some((dx, dy)) = record_pointer(state, mouse, now) else {
                return;
            };
            let velocity = state.pointer.take().and_then(|p| p.tracker.velocity());
            navigate(
                state,
                NavEvent::DragEnd {
                    dx,
                    dy,
                    vx: velocity.map(|v| v.0),
                    vy: velocity.map(|v| v.1),
                },
            );
        }
        _ => {}
    }
}

/// One wheel notch is one page. Shift redirects vertical wheels sideways.
fn wheel_step(state: &mut AppState, axis: Axis, delta: i64, modifiers: KeyModifiers) {
    if state.nav.is_dragging() {
        return;
    }
    let axis = if modifiers.contains(KeyModifiers::SHIFT) {
        Axis::Horizontal
    } else {
        axis
    };
    navigate(state, NavEvent::StepRequest { axis, delta });
}

/// Record the pointer position and return the px translation since press.
fn record_pointer(state: &mut AppState, mouse: MouseEvent, now: Instant) -> Option<(f64, f64)> {
    let metrics = state.metrics();
    let pointer = state.pointer.as_mut()?;
    let (ox, oy) = pointer.origin;
    let (dx, dy) = metrics.to_px(
        mouse.column as i32 - ox as i32,
        mouse.row as i32 - oy as i32,
    );
    pointer.tracker.record(now, dx, dy);
    Some((dx, dy))
}

// ── Lifecycle ───────────────────────────────────────────────────

pub fn handle_resize(state: &mut AppState, width: u16, height: u16) {
    state.terminal_area = ratatui::layout::Rect::new(0, 0, width, height);
    state.sync_viewport();
}

/// Advance animations by one frame.
pub fn handle_frame(state: &mut AppState, dt: Duration) {
    let was_animating = state.nav.is_animating();
    for axis in state.nav.advance(dt) {
        tracing::trace!(axis = axis.label(), "settled");
    }
    if was_animating {
        state.needs_redraw = true;
    }
}
