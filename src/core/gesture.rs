//! Gesture classification and pointer velocity tracking.
//!
//! A drag belongs to whichever axis has the larger absolute displacement.
//! The decision is re-made on every movement sample, so a gesture can
//! change axis mid-drag.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use super::axis::Axis;

/// Samples older than this are dropped before computing a release velocity.
const VELOCITY_WINDOW: Duration = Duration::from_millis(100);

/// Velocities beyond this are treated as sensor noise (px/s).
const MAX_VELOCITY: f64 = 8000.0;

/// Shortest sample span that produces a velocity.
const MIN_SPAN_SECS: f64 = 0.001;

/// Which axis a cumulative translation belongs to.
///
/// Ties go to [`Axis::Vertical`] (strict `|dx| > |dy|` comparison).
pub fn classify(dx: f64, dy: f64) -> Axis {
    if dx.abs() > dy.abs() {
        Axis::Horizontal
    } else {
        Axis::Vertical
    }
}

/// Classification state of an in-flight drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DominantAxis {
    Vertical,
    Horizontal,
    /// No movement sample seen yet.
    #[default]
    Undetermined,
}

impl From<Axis> for DominantAxis {
    fn from(axis: Axis) -> Self {
        match axis {
            Axis::Vertical => DominantAxis::Vertical,
            Axis::Horizontal => DominantAxis::Horizontal,
        }
    }
}

/// Ephemeral per-gesture record. Lives from drag start to drag end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub start_offset_x: f64,
    pub start_offset_y: f64,
    pub dominant: DominantAxis,
}

impl DragSession {
    pub fn new(start_offset_x: f64, start_offset_y: f64) -> Self {
        Self {
            start_offset_x,
            start_offset_y,
            dominant: DominantAxis::Undetermined,
        }
    }

    /// Gesture-start offset for `axis`.
    pub fn start(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Vertical => self.start_offset_y,
            Axis::Horizontal => self.start_offset_x,
        }
    }

    /// Reclassify from the cumulative translation and return the winner.
    pub fn reclassify(&mut self, dx: f64, dy: f64) -> Axis {
        let axis = classify(dx, dy);
        self.dominant = axis.into();
        axis
    }
}

/// Pointer velocity estimated from recent position samples.
///
/// Positions are in px; only samples inside a short trailing window count,
/// so a pointer that stops before release produces little or no velocity.
#[derive(Debug, Clone, Default)]
pub struct VelocityTracker {
    samples: VecDeque<(Instant, f64, f64)>,
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, at: Instant, x: f64, y: f64) {
        self.samples.push_back((at, x, y));
        while let Some(&(t, _, _)) = self.samples.front() {
            if at.saturating_duration_since(t) > VELOCITY_WINDOW {
                self.samples.pop_front();
            } else {
                break;
            }
        }
    }

    /// `(vx, vy)` in px/s, or `None` when there is not enough signal.
    pub fn velocity(&self) -> Option<(f64, f64)> {
        let (&(t0, x0, y0), &(t1, x1, y1)) = (self.samples.front()?, self.samples.back()?);
        let span = t1.saturating_duration_since(t0).as_secs_f64();
        if self.samples.len() < 2 || span < MIN_SPAN_SECS {
            return None;
        }
        let vx = ((x1 - x0) / span).clamp(-MAX_VELOCITY, MAX_VELOCITY);
        let vy = ((y1 - y0) / span).clamp(-MAX_VELOCITY, MAX_VELOCITY);
        Some((vx, vy))
    }
}
