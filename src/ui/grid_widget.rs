//! Custom Ratatui widget that draws the page grid at the controller's
//! continuous offsets.
//!
//! Every page is exactly the size of the viewport. Pages are translated
//! whole-cell by the projection and clipped to the render area, so during a
//! transition two neighbours are visible side by side.

use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::Style,
    widgets::Widget,
};

use crate::core::{
    grid::{Cell, Grid},
    projection::{is_active, CellMetrics, PlacedPage, Projection},
};

use super::theme::Theme;

const NAV_HINT: &str = "Use ↑↓ arrows, mouse wheel, or drag to navigate";
const ACTIVE_MARKER: &str = " • Current Page";

/// Renders every page that overlaps the area.
pub struct GridWidget<'a> {
    grid: &'a Grid,
    metrics: CellMetrics,
    /// `(x, y)` px offsets from the navigation controller.
    offsets: (f64, f64),
    /// Committed `(row, column)`.
    active: (usize, usize),
}

impl<'a> GridWidget<'a> {
    pub fn new(grid: &'a Grid, metrics: CellMetrics, offsets: (f64, f64), active: (usize, usize)) -> Self {
        Self {
            grid,
            metrics,
            offsets,
            active,
        }
    }
}

impl Widget for GridWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let projection = Projection::new(self.metrics, area.width, area.height);
        let placed = projection.visible_pages(self.grid.row_count(), self.grid.column_count(), self.offsets);
        for page in placed {
            let Some(cell) = self.grid.cell(page.row, page.column) else {
                continue;
            };
            let active = is_active(page.row, page.column, self.active);
            render_page(area, page, cell, active, buf);
        }
    }
}

// ───────────────────────────────────────── page ──────────────

fn render_page(area: Rect, page: PlacedPage, cell: Cell<'_>, active: bool, buf: &mut Buffer) {
    let left = area.x as i32 + page.x;
    let top = area.y as i32 + page.y;
    let w = area.width as i32;
    let h = area.height as i32;
    let row = page.row;

    let border = if active {
        Theme::active_border_style(row)
    } else {
        Theme::page_border_style(row)
    };

    for dy in 0..h {
        for dx in 0..w {
            let (ch, style) = match border_char(dx, dy, w, h) {
                Some(ch) => (ch, border),
                None => (' ', Theme::page_style(row)),
            };
            put(buf, area, left + dx, top + dy, ch, style);
        }
    }

    let inner_width = (w - 2).max(0) as usize;
    let title_y = if h >= 5 { top + h / 2 - 1 } else { top + h / 2 };
    let title_style = match cell {
        Cell::Vacant { .. } => Theme::vacant_title_style(row),
        _ => Theme::page_title_style(row),
    };
    put_centered(buf, area, left, w, title_y, &cell.title(), inner_width, title_style);

    let hint_y = title_y + 2;
    if hint_y < top + h - 1 {
        let hint = if active {
            format!("{NAV_HINT}{ACTIVE_MARKER}")
        } else {
            NAV_HINT.to_string()
        };
        put_centered(buf, area, left, w, hint_y, &hint, inner_width, Theme::hint_style(row));
    }
}

/// Rounded box-drawing border, or `None` for the interior.
fn border_char(dx: i32, dy: i32, w: i32, h: i32) -> Option<char> {
    if w < 2 || h < 2 {
        return None;
    }
    let (left, right) = (dx == 0, dx == w - 1);
    let (top, bottom) = (dy == 0, dy == h - 1);
    match (left, right, top, bottom) {
        (true, _, true, _) => Some('╭'),
        (_, true, true, _) => Some('╮'),
        (true, _, _, true) => Some('╰'),
        (_, true, _, true) => Some('╯'),
        (_, _, true, _) | (_, _, _, true) => Some('─'),
        (true, _, _, _) | (_, true, _, _) => Some('│'),
        _ => None,
    }
}

#[allow(clippy::too_many_arguments)]
fn put_centered(
    buf: &mut Buffer,
    area: Rect,
    left: i32,
    width: i32,
    y: i32,
    text: &str,
    max_chars: usize,
    style: Style,
) {
    let shown: Vec<char> = text.chars().take(max_chars).collect();
    let x = left + (width - shown.len() as i32) / 2;
    for (i, ch) in shown.into_iter().enumerate() {
        put(buf, area, x + i as i32, y, ch, style);
    }
}

/// Write one cell, discarding anything outside `area`.
fn put(buf: &mut Buffer, area: Rect, x: i32, y: i32, ch: char, style: Style) {
    let inside = x >= area.x as i32
        && x < area.right() as i32
        && y >= area.y as i32
        && y < area.bottom() as i32;
    if !inside {
        return;
    }
    if let Some(cell) = buf.cell_mut(Position::new(x as u16, y as u16)) {
        cell.set_char(ch).set_style(style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 80×12 cells = 640×192 px with default metrics.
    fn render(grid: &Grid, offsets: (f64, f64), active: (usize, usize)) -> Buffer {
        let area = Rect::new(0, 0, 80, 12);
        let mut buf = Buffer::empty(area);
        GridWidget::new(grid, CellMetrics::default(), offsets, active).render(area, &mut buf);
        buf
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect()
    }

    fn rows_containing(buf: &Buffer, needle: &str) -> Vec<u16> {
        (0..buf.area.height)
            .filter(|&y| row_text(buf, y).contains(needle))
            .collect()
    }

    #[test]
    fn settled_page_fills_viewport() {
        let grid = Grid::default();
        let buf = render(&grid, (0.0, 0.0), (0, 0));
        assert_eq!(rows_containing(&buf, "Dashboard"), vec![5]);
        assert_eq!(rows_containing(&buf, "Current Page"), vec![7]);
        assert!(row_text(&buf, 0).starts_with('╭'));
        assert_eq!(buf[(40, 3)].bg, Theme::row_shade(0));
    }

    #[test]
    fn card_title_names_row_and_card() {
        let grid = Grid::default();
        // Row 1, card 2.
        let buf = render(&grid, (-1280.0, -192.0), (1, 2));
        assert_eq!(rows_containing(&buf, "Launch - Card B"), vec![5]);
    }

    #[test]
    fn transition_shows_both_neighbours() {
        let grid = Grid::default();
        // Half way between rows 0 and 1: 96 px = 6 cells.
        let buf = render(&grid, (0.0, -96.0), (0, 0));
        assert_eq!(buf[(10, 2)].bg, Theme::row_shade(0));
        assert_eq!(buf[(10, 8)].bg, Theme::row_shade(1));
        assert_eq!(rows_containing(&buf, "Launch"), vec![11]);
        // Only the committed page carries the marker.
        assert_eq!(rows_containing(&buf, "Current Page"), vec![1]);
    }

    #[test]
    fn ragged_row_renders_vacant_page() {
        let grid = Grid::parse("Alpha = One, Two\nBeta = Solo").unwrap();
        let buf = render(&grid, (-1280.0, -192.0), (1, 2));
        assert_eq!(rows_containing(&buf, "Beta - (no card)"), vec![5]);
    }

    #[test]
    fn tiny_area_does_not_panic() {
        let grid = Grid::default();
        let area = Rect::new(0, 0, 1, 1);
        let mut buf = Buffer::empty(area);
        GridWidget::new(&grid, CellMetrics::default(), (-3.0, -5.0), (0, 0)).render(area, &mut buf);
        let empty = Rect::new(0, 0, 0, 0);
        let mut buf = Buffer::empty(empty);
        GridWidget::new(&grid, CellMetrics::default(), (0.0, 0.0), (0, 0)).render(empty, &mut buf);
    }
}
