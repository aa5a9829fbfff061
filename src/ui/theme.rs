//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

/// Central theme — change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    // ── pages ──────────────────────────────────────────────────
    /// Background shade for every page of grid row `row`; darkest at the top.
    pub fn row_shade(row: usize) -> Color {
        let level = (0x1a + 0x10 * row.min(12)) as u8;
        Color::Rgb(level, level, level)
    }

    pub fn page_style(row: usize) -> Style {
        Style::default().bg(Self::row_shade(row)).fg(Color::White)
    }

    pub fn page_border_style(row: usize) -> Style {
        Self::page_style(row).fg(Color::Gray)
    }

    pub fn active_border_style(row: usize) -> Style {
        Self::page_style(row).fg(Color::Cyan)
    }

    pub fn page_title_style(row: usize) -> Style {
        Self::page_style(row).add_modifier(Modifier::BOLD)
    }

    pub fn vacant_title_style(row: usize) -> Style {
        Self::page_style(row)
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC)
    }

    pub fn hint_style(row: usize) -> Style {
        Self::page_style(row).fg(Color::Gray)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }

    pub fn status_position_style() -> Style {
        Self::status_bar_style().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    }

    // ── popups ─────────────────────────────────────────────────
    pub fn popup_title_style() -> Style {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    }

    pub fn popup_border_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn menu_item_style() -> Style {
        Style::default().fg(Color::White)
    }

    pub fn menu_selected_style() -> Style {
        Style::default()
            .fg(Color::White)
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD)
    }

    pub fn menu_value_style() -> Style {
        Style::default().fg(Color::Yellow)
    }

    pub fn dim_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }
}
