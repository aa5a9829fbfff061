//! Layout helpers — split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Primary screen layout: page viewport plus a bottom status bar.
pub struct AppLayout {
    pub pages_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),    // page viewport (takes all remaining space)
                Constraint::Length(1), // status bar
            ])
            .split(area);

        Self {
            pages_area: chunks[0],
            status_area: chunks[1],
        }
    }

    /// Whether terminal cell `(col, row)` lies on the page viewport.
    pub fn in_pages(&self, col: u16, row: u16) -> bool {
        let a = self.pages_area;
        col >= a.x
            && col < a.x.saturating_add(a.width)
            && row >= a.y
            && row < a.y.saturating_add(a.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_bar_takes_last_row() {
        let layout = AppLayout::from_area(Rect::new(0, 0, 80, 25));
        assert_eq!(layout.pages_area, Rect::new(0, 0, 80, 24));
        assert_eq!(layout.status_area, Rect::new(0, 24, 80, 1));
        assert!(layout.in_pages(79, 23));
        assert!(!layout.in_pages(10, 24));
    }
}
