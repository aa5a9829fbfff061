//! Popup overlay widgets for the settings menu and controls submenu.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use crate::app::settings::{SettingsItem, SETTINGS_ITEMS};
use crate::app::state::AppState;
use crate::config::{Action, AppConfig};

use super::theme::Theme;

// ───────────────────────────────────────── settings popup ────

/// Settings menu popup overlay.
pub struct SettingsPopup<'a> {
    pub state: &'a AppState,
}

impl Widget for SettingsPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = (SETTINGS_ITEMS.len() as u16) + 6;
        let popup = centered_fixed(44, height, area);
        let inner = popup_frame(" Settings ", popup, buf);

        let mut lines = vec![Line::raw("")];
        for (i, item) in SETTINGS_ITEMS.iter().enumerate() {
            let (prefix, style) = if i == self.state.settings_selected {
                (" ▸ ", Theme::menu_selected_style())
            } else {
                ("   ", Theme::menu_item_style())
            };

            let mut spans = vec![Span::styled(format!("{prefix}{:<18}", item.label()), style)];
            match item {
                SettingsItem::Cycle { value, .. } => {
                    spans.push(Span::styled(value(self.state), Theme::menu_value_style()));
                }
                SettingsItem::Submenu { .. } => spans.push(Span::styled("›", Theme::dim_style())),
            }
            lines.push(Line::from(spans));
        }
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            "  Enter/Space: change  Esc: close",
            Theme::dim_style(),
        )));

        Paragraph::new(lines).render(inner, buf);
    }
}

// ───────────────────────────────────────── controls popup ────

/// Interactive controls / keybinding popup overlay.
pub struct ControlsPopup<'a> {
    pub config: &'a AppConfig,
    pub selected: usize,
    pub awaiting_rebind: bool,
}

impl Widget for ControlsPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // actions + blank/reset/blank/hint + top padding + borders
        let height = (Action::ALL.len() as u16) + 7;
        let popup = centered_fixed(52, height, area);
        let inner = popup_frame(" Controls ", popup, buf);

        let mut lines = vec![Line::raw("")];

        for (i, &action) in Action::ALL.iter().enumerate() {
            let is_selected = i == self.selected;
            let prefix = if is_selected { " ▸ " } else { "   " };

            let keys_display = if is_selected && self.awaiting_rebind {
                "Press a key…".to_string()
            } else {
                self.config.display_bindings(action)
            };

            let base_style = if is_selected {
                Theme::menu_selected_style()
            } else {
                Theme::menu_item_style()
            };
            let key_style = if is_selected {
                Theme::menu_value_style().bg(ratatui::style::Color::DarkGray)
            } else {
                Theme::menu_value_style()
            };

            // Label left-aligned, keys right-aligned.
            let label_col = format!("{prefix}{:<22}", action.label());
            let keys_width = (inner.width as usize)
                .saturating_sub(label_col.chars().count())
                .max(1);
            let keys_col = format!("{keys_display:>keys_width$}");

            lines.push(Line::from(vec![
                Span::styled(label_col, base_style),
                Span::styled(keys_col, key_style),
            ]));
        }

        let reset_selected = self.selected == Action::ALL.len();
        lines.push(Line::raw(""));
        let (reset_prefix, reset_style) = if reset_selected {
            (" ▸ ", Theme::menu_selected_style())
        } else {
            ("   ", Theme::menu_item_style())
        };
        lines.push(Line::from(Span::styled(
            format!("{reset_prefix}⟳ Reset to defaults"),
            reset_style,
        )));

        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            "  Enter: add key  Del: clear  Esc: back",
            Theme::dim_style(),
        )));

        Paragraph::new(lines).render(inner, buf);
    }
}

// ───────────────────────────────────────── helpers ───────────

/// Clear `popup`, draw the rounded frame and return its inner area.
fn popup_frame(title: &str, popup: Rect, buf: &mut Buffer) -> Rect {
    Clear.render(popup, buf);
    let block = Block::default()
        .title(title)
        .title_style(Theme::popup_title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::popup_border_style());
    let inner = block.inner(popup);
    block.render(popup, buf);
    inner
}

/// Create a centered rectangle with fixed dimensions, clamped to the available area.
fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::grid::Grid;

    fn text(buf: &Buffer) -> String {
        let area = buf.area;
        (0..area.height)
            .map(|y| (0..area.width).map(|x| buf[(x, y)].symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn centered_fixed_clamps_to_area() {
        let r = centered_fixed(52, 16, Rect::new(0, 0, 30, 10));
        assert_eq!(r, Rect::new(0, 0, 30, 10));
        let r = centered_fixed(10, 4, Rect::new(0, 0, 30, 10));
        assert_eq!(r, Rect::new(10, 3, 10, 4));
    }

    #[test]
    fn settings_popup_shows_current_values() {
        let state = AppState::new(Grid::default(), AppConfig::default(), Rect::new(0, 0, 80, 25));
        let area = Rect::new(0, 0, 80, 25);
        let mut buf = Buffer::empty(area);
        SettingsPopup { state: &state }.render(area, &mut buf);
        let out = text(&buf);
        assert!(out.contains("Fling Threshold"));
        assert!(out.contains("500 px/s"));
        assert!(out.contains("8×16 px"));
    }

    #[test]
    fn controls_popup_prompts_during_rebind() {
        let config = AppConfig::default();
        let area = Rect::new(0, 0, 80, 25);
        let mut buf = Buffer::empty(area);
        ControlsPopup {
            config: &config,
            selected: 0,
            awaiting_rebind: true,
        }
        .render(area, &mut buf);
        let out = text(&buf);
        assert!(out.contains("Press a key…"));
        assert!(out.contains("Next Page"));
    }
}
