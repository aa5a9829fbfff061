//! Axis model: discrete positions along one navigation dimension and the
//! pixel offset ("snap point") each position settles at.
//!
//! Forward navigation is negative-going: index `i` sits at `i * -extent`,
//! so the content slides up / left as the index grows.

/// One of the two independent navigation dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Between main pages (rows).
    Vertical,
    /// Between cards within a row (columns).
    Horizontal,
}

impl Axis {
    pub const BOTH: [Axis; 2] = [Axis::Vertical, Axis::Horizontal];

    pub fn label(self) -> &'static str {
        match self {
            Axis::Vertical => "vertical",
            Axis::Horizontal => "horizontal",
        }
    }

    /// The other axis.
    pub fn cross(self) -> Axis {
        match self {
            Axis::Vertical => Axis::Horizontal,
            Axis::Horizontal => Axis::Vertical,
        }
    }
}

/// Viewport dimensions in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Size of one page along `axis`.
    pub fn extent(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Vertical => self.height,
            Axis::Horizontal => self.width,
        }
    }
}

/// Discrete positions along one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisModel {
    count: usize,
    unit_extent: f64,
}

impl AxisModel {
    pub fn new(count: usize, unit_extent: f64) -> Self {
        Self {
            count,
            unit_extent: unit_extent.max(0.0),
        }
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn set_unit_extent(&mut self, extent: f64) {
        self.unit_extent = extent.max(0.0);
    }

    /// Highest valid index (0 for an empty axis).
    pub fn last_index(&self) -> usize {
        self.count.saturating_sub(1)
    }

    pub fn contains(&self, index: i64) -> bool {
        index >= 0 && (index as u64) < self.count as u64
    }

    /// Offset at which `index` is fully settled.
    pub fn snap_point(&self, index: usize) -> f64 {
        index as f64 * -self.unit_extent
    }

    pub fn clamp_index(&self, index: i64) -> usize {
        index.clamp(0, self.last_index() as i64) as usize
    }

    /// All snap points, derived from the current extent.
    pub fn snap_points(&self) -> Vec<f64> {
        (0..self.count).map(|i| self.snap_point(i)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snap_points_decrease_from_zero() {
        let axis = AxisModel::new(4, 800.0);
        assert_eq!(axis.snap_points(), vec![0.0, -800.0, -1600.0, -2400.0]);
    }

    #[test]
    fn clamp_index_handles_both_edges() {
        let axis = AxisModel::new(7, 100.0);
        assert_eq!(axis.clamp_index(-3), 0);
        assert_eq!(axis.clamp_index(3), 3);
        assert_eq!(axis.clamp_index(99), 6);
    }

    #[test]
    fn empty_axis_clamps_to_zero() {
        let axis = AxisModel::new(0, 100.0);
        assert_eq!(axis.clamp_index(5), 0);
        assert!(!axis.contains(0));
        assert!(axis.snap_points().is_empty());
    }

    #[test]
    fn contains_rejects_negative_and_past_end() {
        let axis = AxisModel::new(3, 10.0);
        assert!(!axis.contains(-1));
        assert!(axis.contains(0));
        assert!(axis.contains(2));
        assert!(!axis.contains(3));
    }

    #[test]
    fn viewport_extent_per_axis() {
        let vp = Viewport::new(640.0, 480.0);
        assert_eq!(vp.extent(Axis::Horizontal), 640.0);
        assert_eq!(vp.extent(Axis::Vertical), 480.0);
        assert_eq!(Axis::Vertical.cross(), Axis::Horizontal);
    }
}
