//! Damped spring driving one continuous offset toward its snap point.
//!
//!   a = -stiffness × (position - target) - damping × velocity
//!
//! Stiffness and damping are fixed (critically damped: `c = 2√k`, unit
//! mass); callers only choose the target and, on release, the initial
//! velocity. Integration is semi-implicit Euler with large frames split into
//! 4 ms sub-steps.

use std::time::Duration;

const STIFFNESS: f64 = 100.0;
const DAMPING: f64 = 20.0;

/// Maximum dt per integration step.
const MAX_STEP_SECS: f64 = 0.004;

/// Position delta (px) below which the spring may settle.
const REST_DISPLACEMENT: f64 = 0.01;

/// Speed (px/s) below which the spring may settle.
const REST_SPEED: f64 = 2.0;

/// Spring-animated scalar. Starting a new target overrides the previous one;
/// there is no other cancellation.
#[derive(Debug, Clone)]
pub struct Spring {
    position: f64,
    velocity: f64,
    target: f64,
    at_rest: bool,
}

impl Spring {
    /// A spring resting at `position`.
    pub fn at(position: f64) -> Self {
        Self {
            position,
            velocity: 0.0,
            target: position,
            at_rest: true,
        }
    }

    #[inline]
    pub fn position(&self) -> f64 {
        self.position
    }

    #[cfg(test)]
    pub fn target(&self) -> f64 {
        self.target
    }

    #[inline]
    pub fn is_at_rest(&self) -> bool {
        self.at_rest
    }

    /// Aim at `target` keeping the current momentum.
    pub fn set_target(&mut self, target: f64) {
        self.target = target;
        self.wake();
    }

    /// Aim at `target` starting from `velocity` (release momentum).
    pub fn launch(&mut self, target: f64, velocity: f64) {
        self.target = target;
        self.velocity = velocity;
        self.wake();
    }

    /// Pin the spring at `position` with no motion (pointer-held).
    pub fn hold(&mut self, position: f64) {
        self.position = position;
        self.target = position;
        self.velocity = 0.0;
        self.at_rest = true;
    }

    fn wake(&mut self) {
        self.at_rest = self.is_settled();
    }

    fn is_settled(&self) -> bool {
        (self.position - self.target).abs() < REST_DISPLACEMENT && self.velocity.abs() < REST_SPEED
    }

    fn step(&mut self, dt: f64) {
        let displacement = self.position - self.target;
        let acceleration = -STIFFNESS * displacement - DAMPING * self.velocity;
        self.velocity += acceleration * dt;
        self.position += self.velocity * dt;
    }

    /// Advance by `dt`. Returns `true` if the spring came to rest during
    /// this call.
    pub fn advance(&mut self, dt: Duration) -> bool {
        if self.at_rest {
            return false;
        }
        let mut remaining = dt.as_secs_f64();
        if remaining <= 0.0 {
            return false;
        }
        while remaining > 0.0 {
            let step = remaining.min(MAX_STEP_SECS);
            self.step(step);
            remaining -= step;
        }
        if self.is_settled() {
            self.position = self.target;
            self.velocity = 0.0;
            self.at_rest = true;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_16: Duration = Duration::from_millis(16);

    fn simulate(spring: &mut Spring, frames: usize) {
        for _ in 0..frames {
            spring.advance(MS_16);
        }
    }

    #[test]
    fn reaches_negative_target() {
        let mut spring = Spring::at(0.0);
        spring.set_target(-1600.0);
        assert!(!spring.is_at_rest());
        simulate(&mut spring, 300);
        assert!(spring.is_at_rest());
        assert_eq!(spring.position(), -1600.0);
    }

    #[test]
    fn critically_damped_does_not_overshoot_much() {
        let mut spring = Spring::at(0.0);
        spring.set_target(-800.0);
        let mut lowest = 0.0_f64;
        for _ in 0..300 {
            spring.advance(MS_16);
            lowest = lowest.min(spring.position());
        }
        assert!(lowest > -801.0, "overshoot to {lowest}");
    }

    #[test]
    fn launch_seeds_velocity() {
        let mut spring = Spring::at(-900.0);
        spring.launch(-1600.0, -600.0);
        assert_eq!(spring.velocity, -600.0);
        spring.advance(Duration::from_millis(4));
        // Momentum carries it toward the target immediately.
        assert!(spring.position() < -900.0);
    }

    #[test]
    fn advance_reports_settling_once() {
        let mut spring = Spring::at(0.0);
        spring.set_target(-100.0);
        let mut settled = 0;
        for _ in 0..300 {
            if spring.advance(MS_16) {
                settled += 1;
            }
        }
        assert_eq!(settled, 1);
    }

    #[test]
    fn same_target_stays_at_rest() {
        let mut spring = Spring::at(-800.0);
        spring.set_target(-800.0);
        assert!(spring.is_at_rest());
        assert!(!spring.advance(MS_16));
    }

    #[test]
    fn hold_freezes_motion() {
        let mut spring = Spring::at(0.0);
        spring.set_target(-800.0);
        simulate(&mut spring, 3);
        let mid = spring.position();
        spring.hold(mid);
        simulate(&mut spring, 10);
        assert_eq!(spring.position(), mid);
        assert_eq!(spring.velocity, 0.0);
    }

    #[test]
    fn large_dt_is_subdivided() {
        let mut spring = Spring::at(0.0);
        spring.set_target(-500.0);
        assert!(spring.advance(Duration::from_secs(5)));
        assert_eq!(spring.position(), -500.0);
    }

    #[test]
    fn zero_dt_is_noop() {
        let mut spring = Spring::at(0.0);
        spring.set_target(10.0);
        spring.advance(Duration::ZERO);
        assert_eq!(spring.position(), 0.0);
    }
}
