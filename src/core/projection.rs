//! Render projection: continuous px offsets to terminal-cell placement.
//!
//! Pure read-only math over the controller's outputs; nothing here mutates
//! navigation state.

use super::axis::Viewport;

/// Size of one terminal cell in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMetrics {
    pub width_px: f64,
    pub height_px: f64,
}

impl Default for CellMetrics {
    fn default() -> Self {
        Self {
            width_px: 8.0,
            height_px: 16.0,
        }
    }
}

impl CellMetrics {
    pub fn new(width_px: f64, height_px: f64) -> Self {
        Self {
            width_px: width_px.max(1.0),
            height_px: height_px.max(1.0),
        }
    }

    /// Pixel viewport for a page area of `cols × rows` cells.
    pub fn viewport(&self, cols: u16, rows: u16) -> Viewport {
        Viewport::new(cols as f64 * self.width_px, rows as f64 * self.height_px)
    }

    /// Cell delta → px delta.
    pub fn to_px(&self, dcol: i32, drow: i32) -> (f64, f64) {
        (dcol as f64 * self.width_px, drow as f64 * self.height_px)
    }

    /// px offset → whole-cell translation.
    pub fn translate(&self, offset_x: f64, offset_y: f64) -> (i32, i32) {
        (
            (offset_x / self.width_px).round() as i32,
            (offset_y / self.height_px).round() as i32,
        )
    }
}

/// A page placed relative to the page area's top-left corner (cells).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedPage {
    pub row: usize,
    pub column: usize,
    pub x: i32,
    pub y: i32,
}

/// Maps the grid onto a `width × height` cell viewport.
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    pub metrics: CellMetrics,
    /// Page size in cells (equal to the viewport).
    pub page_width: u16,
    pub page_height: u16,
}

impl Projection {
    pub fn new(metrics: CellMetrics, page_width: u16, page_height: u16) -> Self {
        Self {
            metrics,
            page_width,
            page_height,
        }
    }

    pub fn page_origin(&self, row: usize, column: usize, offsets: (f64, f64)) -> (i32, i32) {
        let (tx, ty) = self.metrics.translate(offsets.0, offsets.1);
        (
            column as i32 * self.page_width as i32 + tx,
            row as i32 * self.page_height as i32 + ty,
        )
    }

    /// Pages of a `rows × columns` grid that overlap the viewport.
    pub fn visible_pages(&self, rows: usize, columns: usize, offsets: (f64, f64)) -> Vec<PlacedPage> {
        let (w, h) = (self.page_width as i32, self.page_height as i32);
        if w == 0 || h == 0 {
            return Vec::new();
        }
        let mut out = Vec::new();
        for row in 0..rows {
            for column in 0..columns {
                let (x, y) = self.page_origin(row, column, offsets);
                if x < w && x + w > 0 && y < h && y + h > 0 {
                    out.push(PlacedPage { row, column, x, y });
                }
            }
        }
        out
    }
}

/// Exactly one cell is active: the committed `(row, column)`.
pub fn is_active(row: usize, column: usize, active: (usize, usize)) -> bool {
    (row, column) == active
}

#[cfg(test)]
mod tests {
    use super::*;

    fn projection() -> Projection {
        Projection::new(CellMetrics::default(), 80, 24)
    }

    #[test]
    fn viewport_scales_cells_to_px() {
        let vp = CellMetrics::default().viewport(80, 24);
        assert_eq!((vp.width, vp.height), (640.0, 384.0));
    }

    #[test]
    fn settled_offset_shows_single_page() {
        let p = projection();
        // Row 2, card 1 at rest.
        let pages = p.visible_pages(7, 6, (-640.0, -768.0));
        assert_eq!(pages, vec![PlacedPage { row: 2, column: 1, x: 0, y: 0 }]);
    }

    #[test]
    fn mid_transition_shows_two_pages() {
        let p = projection();
        let pages = p.visible_pages(7, 6, (0.0, -192.0));
        let cells: Vec<_> = pages.iter().map(|pg| (pg.row, pg.column, pg.y)).collect();
        assert_eq!(cells, vec![(0, 0, -12), (1, 0, 12)]);
    }

    #[test]
    fn empty_viewport_shows_nothing() {
        let p = Projection::new(CellMetrics::default(), 0, 24);
        assert!(p.visible_pages(3, 3, (0.0, 0.0)).is_empty());
    }

    #[test]
    fn exactly_one_active_cell() {
        let active = (3, 2);
        let count = (0..7)
            .flat_map(|r| (0..6).map(move |c| (r, c)))
            .filter(|&(r, c)| is_active(r, c, active))
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn cell_deltas_to_px() {
        let m = CellMetrics::new(10.0, 20.0);
        assert_eq!(m.to_px(-3, 2), (-30.0, 40.0));
        assert_eq!(m.translate(-25.0, 31.0), (-3, 2));
    }

    #[test]
    fn metrics_never_zero() {
        let m = CellMetrics::new(0.0, -4.0);
        assert_eq!((m.width_px, m.height_px), (1.0, 1.0));
    }
}
