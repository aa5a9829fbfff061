//! Snap resolution: where a released gesture comes to rest.
//!
//! A decisive fling moves exactly one step in the fling direction. Anything
//! weaker (or a fling pushing past an edge) settles on the nearest snap point.

/// Default fling threshold in px/s.
pub const DEFAULT_VELOCITY_THRESHOLD: f64 = 500.0;

/// Everything the resolver needs to know about one axis at release time.
#[derive(Debug, Clone, Copy)]
pub struct SnapInput<'a> {
    /// Signed release velocity along the axis (px/s).
    pub velocity: f64,
    pub active_index: usize,
    /// Continuous offset at release; only consulted without a decisive fling.
    pub offset: f64,
    pub snap_points: &'a [f64],
}

/// Resolved destination of a gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapDecision {
    pub index: usize,
    /// Spring target (`snap_points[index]`).
    pub target: f64,
    /// Initial spring velocity; equals the release velocity.
    pub velocity: f64,
}

/// Velocity-then-distance snap resolver.
#[derive(Debug, Clone, Copy)]
pub struct SnapResolver {
    velocity_threshold: f64,
}

impl Default for SnapResolver {
    fn default() -> Self {
        Self::new(DEFAULT_VELOCITY_THRESHOLD)
    }
}

impl SnapResolver {
    pub fn new(velocity_threshold: f64) -> Self {
        Self {
            velocity_threshold: velocity_threshold.abs(),
        }
    }

    pub fn velocity_threshold(&self) -> f64 {
        self.velocity_threshold
    }

    pub fn set_velocity_threshold(&mut self, threshold: f64) {
        self.velocity_threshold = threshold.abs();
    }

    /// Pick the next index for a released gesture.
    ///
    /// Returns `None` only for an axis with no snap points.
    pub fn resolve(&self, input: SnapInput<'_>) -> Option<SnapDecision> {
        let count = input.snap_points.len();
        if count == 0 {
            return None;
        }
        let active = input.active_index.min(count - 1);
        // NaN velocity falls through to the distance rule.
        let velocity = if input.velocity.is_finite() { input.velocity } else { 0.0 };

        let index = if velocity < -self.velocity_threshold && active < count - 1 {
            active + 1
        } else if velocity > self.velocity_threshold && active > 0 {
            active - 1
        } else {
            nearest_index(input.snap_points, input.offset)?
        };

        Some(SnapDecision {
            index,
            target: input.snap_points[index],
            velocity,
        })
    }
}

/// Index of the snap point closest to `offset`; ties keep the first match.
pub fn nearest_index(snap_points: &[f64], offset: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &point) in snap_points.iter().enumerate() {
        let distance = (point - offset).abs();
        match best {
            Some((_, d)) if distance >= d => {}
            _ => best = Some((i, distance)),
        }
    }
    best.map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(count: usize, extent: f64) -> Vec<f64> {
        (0..count).map(|i| i as f64 * -extent).collect()
    }

    #[test]
    fn fast_upward_fling_advances() {
        let sp = points(7, 800.0);
        let decision = SnapResolver::default()
            .resolve(SnapInput {
                velocity: -600.0,
                active_index: 2,
                offset: -1650.0,
                snap_points: &sp,
            })
            .unwrap();
        assert_eq!(decision.index, 3);
        assert_eq!(decision.target, -2400.0);
        assert_eq!(decision.velocity, -600.0);
    }

    #[test]
    fn fast_downward_fling_goes_back() {
        let sp = points(7, 800.0);
        let decision = SnapResolver::default()
            .resolve(SnapInput {
                velocity: 900.0,
                active_index: 4,
                offset: -3150.0,
                snap_points: &sp,
            })
            .unwrap();
        assert_eq!(decision.index, 3);
    }

    #[test]
    fn fling_past_first_page_stays_put() {
        let sp = points(7, 800.0);
        let decision = SnapResolver::default()
            .resolve(SnapInput {
                velocity: 600.0,
                active_index: 0,
                offset: 120.0,
                snap_points: &sp,
            })
            .unwrap();
        assert_eq!(decision.index, 0);
        assert_eq!(decision.target, 0.0);
    }

    #[test]
    fn fling_past_last_page_stays_put() {
        let sp = points(3, 100.0);
        let decision = SnapResolver::default()
            .resolve(SnapInput {
                velocity: -5000.0,
                active_index: 2,
                offset: -230.0,
                snap_points: &sp,
            })
            .unwrap();
        assert_eq!(decision.index, 2);
    }

    #[test]
    fn weak_release_snaps_to_nearest() {
        let sp = points(7, 800.0);
        let decision = SnapResolver::default()
            .resolve(SnapInput {
                velocity: 50.0,
                active_index: 2,
                offset: -3300.0,
                snap_points: &sp,
            })
            .unwrap();
        assert_eq!(decision.index, 4);
        assert_eq!(decision.target, -3200.0);
    }

    #[test]
    fn threshold_is_exclusive() {
        let sp = points(5, 100.0);
        let decision = SnapResolver::default()
            .resolve(SnapInput {
                velocity: -500.0,
                active_index: 1,
                offset: -100.0,
                snap_points: &sp,
            })
            .unwrap();
        assert_eq!(decision.index, 1);
    }

    #[test]
    fn nearest_tie_prefers_lower_index() {
        let sp = points(3, 100.0);
        assert_eq!(nearest_index(&sp, -50.0), Some(0));
        assert_eq!(nearest_index(&sp, -150.0), Some(1));
        assert_eq!(nearest_index(&sp, -151.0), Some(2));
        assert_eq!(nearest_index(&[], 0.0), None);
    }

    #[test]
    fn nan_velocity_uses_distance() {
        let sp = points(4, 100.0);
        let decision = SnapResolver::default()
            .resolve(SnapInput {
                velocity: f64::NAN,
                active_index: 0,
                offset: -190.0,
                snap_points: &sp,
            })
            .unwrap();
        assert_eq!(decision.index, 2);
        assert_eq!(decision.velocity, 0.0);
    }

    #[test]
    fn custom_threshold() {
        let sp = points(4, 100.0);
        let resolver = SnapResolver::new(1200.0);
        let decision = resolver
            .resolve(SnapInput {
                velocity: -900.0,
                active_index: 0,
                offset: -10.0,
                snap_points: &sp,
            })
            .unwrap();
        assert_eq!(decision.index, 0);
    }
}
