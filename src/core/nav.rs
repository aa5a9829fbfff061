//! Navigation controller: the single owner of both axes' committed index
//! and continuous offset.
//!
//! Every input source (pointer drag, key steps, wheel steps, viewport
//! resizes) arrives as a [`NavEvent`] and goes through
//! [`NavigationController::handle`]. Animation frames go through
//! [`NavigationController::advance`], which moves offsets but never touches
//! the committed indices.
//!
//! Commits are optimistic: `go_to` records the destination index as soon as
//! the transition is requested, so a burst of steps issued before the spring
//! settles keeps counting from the destination, not from where the content
//! happens to be on screen.

use std::time::Duration;

use super::axis::{Axis, AxisModel, Viewport};
use super::gesture::DragSession;
use super::snap::{SnapInput, SnapResolver};
use super::spring::Spring;

/// Inbound navigation vocabulary shared by all input adapters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NavEvent {
    /// Pointer pressed; the gesture starts from the current offsets.
    DragStart,
    /// Cumulative translation (px) since `DragStart`.
    DragUpdate { dx: f64, dy: f64 },
    /// Pointer released. Missing velocities count as zero.
    DragEnd {
        dx: f64,
        dy: f64,
        vx: Option<f64>,
        vy: Option<f64>,
    },
    /// The pointer went away without a release (view change, resize).
    /// Both axes spring back to their committed pages.
    DragCancel,
    /// Discrete relative move (keyboard, wheel).
    StepRequest { axis: Axis, delta: i64 },
    /// Discrete absolute move.
    GoTo { axis: Axis, index: usize },
    ResizeNotify(Viewport),
}

/// A committed index transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Commit {
    pub axis: Axis,
    pub from: usize,
    pub to: usize,
    /// Spring target for `to`.
    pub target: f64,
}

impl Commit {
    pub fn changed(&self) -> bool {
        self.from != self.to
    }
}

#[derive(Debug, Clone)]
struct AxisState {
    model: AxisModel,
    active: usize,
    offset: Spring,
}

impl AxisState {
    fn new(model: AxisModel) -> Self {
        Self {
            model,
            active: 0,
            offset: Spring::at(model.snap_point(0)),
        }
    }

    fn commit(&mut self, axis: Axis, index: usize, velocity: Option<f64>) -> Commit {
        let from = self.active;
        let target = self.model.snap_point(index);
        match velocity {
            Some(v) => self.offset.launch(target, v),
            None => self.offset.set_target(target),
        }
        self.active = index;
        Commit {
            axis,
            from,
            to: index,
            target,
        }
    }
}

/// Both axes plus the in-flight gesture, if any.
#[derive(Debug, Clone)]
pub struct NavigationState {
    vertical: AxisState,
    horizontal: AxisState,
    drag: Option<DragSession>,
    viewport: Viewport,
}

impl NavigationState {
    fn axis(&self, axis: Axis) -> &AxisState {
        match axis {
            Axis::Vertical => &self.vertical,
            Axis::Horizontal => &self.horizontal,
        }
    }

    fn axis_mut(&mut self, axis: Axis) -> &mut AxisState {
        match axis {
            Axis::Vertical => &mut self.vertical,
            Axis::Horizontal => &mut self.horizontal,
        }
    }
}

/// Stateful two-axis paginator.
#[derive(Debug, Clone)]
pub struct NavigationController {
    state: NavigationState,
    resolver: SnapResolver,
}

impl NavigationController {
    /// Start at page `(0, 0)` for a grid of `rows × columns`.
    pub fn new(rows: usize, columns: usize, viewport: Viewport, resolver: SnapResolver) -> Self {
        Self {
            state: NavigationState {
                vertical: AxisState::new(AxisModel::new(rows, viewport.height)),
                horizontal: AxisState::new(AxisModel::new(columns, viewport.width)),
                drag: None,
                viewport,
            },
            resolver,
        }
    }

    // ── queries ────────────────────────────────────────────────

    pub fn active_index(&self, axis: Axis) -> usize {
        self.state.axis(axis).active
    }

    /// Committed `(row, column)`.
    pub fn active_cell(&self) -> (usize, usize) {
        (self.state.vertical.active, self.state.horizontal.active)
    }

    pub fn count(&self, axis: Axis) -> usize {
        self.state.axis(axis).model.count()
    }

    /// `(x, y)` continuous offsets for the renderer.
    pub fn offsets(&self) -> (f64, f64) {
        (
            self.state.horizontal.offset.position(),
            self.state.vertical.offset.position(),
        )
    }

    /// Nearest valid index on `axis` for a possibly out-of-range request.
    pub fn clamp_index(&self, axis: Axis, index: i64) -> usize {
        self.state.axis(axis).model.clamp_index(index)
    }

    pub fn is_dragging(&self) -> bool {
        self.state.drag.is_some()
    }

    pub fn is_animating(&self) -> bool {
        !(self.state.vertical.offset.is_at_rest() && self.state.horizontal.offset.is_at_rest())
    }

    pub fn resolver(&self) -> &SnapResolver {
        &self.resolver
    }

    pub fn set_velocity_threshold(&mut self, threshold: f64) {
        self.resolver.set_velocity_threshold(threshold);
    }

    // ── transitions ────────────────────────────────────────────

    /// Apply one inbound event. Returns the index commit it produced, if any.
    pub fn handle(&mut self, event: NavEvent) -> Option<Commit> {
        match event {
            NavEvent::DragStart => {
                self.drag_start();
                None
            }
            NavEvent::DragUpdate { dx, dy } => {
                self.drag_update(dx, dy);
                None
            }
            NavEvent::DragEnd { dx, dy, vx, vy } => self.drag_end(dx, dy, vx, vy),
            NavEvent::DragCancel => {
                self.drag_cancel();
                None
            }
            NavEvent::StepRequest { axis, delta } => self.step(axis, delta),
            NavEvent::GoTo { axis, index } => self.go_to(axis, index as i64),
            NavEvent::ResizeNotify(viewport) => {
                self.resize(viewport);
                None
            }
        }
    }

    /// Animate `axis` to `index`. Out-of-range indices, and requests made
    /// while a gesture owns the offsets, are ignored.
    pub fn go_to(&mut self, axis: Axis, index: i64) -> Option<Commit> {
        if self.state.drag.is_some() {
            return None;
        }
        let state = self.state.axis_mut(axis);
        if !state.model.contains(index) {
            return None;
        }
        let commit = state.commit(axis, index as usize, None);
        if commit.changed() {
            tracing::debug!(axis = axis.label(), from = commit.from, to = commit.to, "go_to");
        }
        Some(commit)
    }

    pub fn step(&mut self, axis: Axis, delta: i64) -> Option<Commit> {
        let active = self.active_index(axis) as i64;
        self.go_to(axis, active.saturating_add(delta))
    }

    fn drag_start(&mut self) {
        let x = self.state.horizontal.offset.position();
        let y = self.state.vertical.offset.position();
        // Grabbing the content stops whatever animation was running.
        self.state.horizontal.offset.hold(x);
        self.state.vertical.offset.hold(y);
        if self.state.drag.is_some() {
            tracing::debug!("drag restarted before release");
        }
        self.state.drag = Some(DragSession::new(x, y));
    }

    fn drag_update(&mut self, dx: f64, dy: f64) {
        let Some(session) = self.state.drag.as_mut() else {
            return;
        };
        let dominant = session.reclassify(dx, dy);
        let session = *session;

        let delta = match dominant {
            Axis::Vertical => dy,
            Axis::Horizontal => dx,
        };
        let cross = dominant.cross();
        self.state
            .axis_mut(dominant)
            .offset
            .hold(session.start(dominant) + delta);
        self.state.axis_mut(cross).offset.hold(session.start(cross));
    }

    fn drag_end(&mut self, dx: f64, dy: f64, vx: Option<f64>, vy: Option<f64>) -> Option<Commit> {
        let mut session = self.state.drag.take()?;
        let dominant = session.reclassify(dx, dy);
        let (delta, velocity) = match dominant {
            Axis::Vertical => (dy, vy.unwrap_or(0.0)),
            Axis::Horizontal => (dx, vx.unwrap_or(0.0)),
        };

        let cross = dominant.cross();
        {
            // The released-but-not-dominant axis goes home to its committed page.
            let cross_state = self.state.axis_mut(cross);
            cross_state.offset.hold(session.start(cross));
            let home = cross_state.model.snap_point(cross_state.active);
            cross_state.offset.set_target(home);
        }

        let state = self.state.axis_mut(dominant);
        let offset = session.start(dominant) + delta;
        state.offset.hold(offset);
        let snap_points = state.model.snap_points();
        let decision = self.resolver.resolve(SnapInput {
            velocity,
            active_index: state.active,
            offset,
            snap_points: &snap_points,
        })?;

        let commit = state.commit(dominant, decision.index, Some(decision.velocity));
        tracing::debug!(
            axis = dominant.label(),
            from = commit.from,
            to = commit.to,
            velocity,
            offset,
            "drag resolved"
        );
        Some(commit)
    }

    fn drag_cancel(&mut self) {
        if self.state.drag.take().is_none() {
            return;
        }
        for axis in Axis::BOTH {
            let state = self.state.axis_mut(axis);
            let home = state.model.snap_point(state.active);
            state.offset.set_target(home);
        }
        tracing::debug!("drag cancelled");
    }

    fn resize(&mut self, viewport: Viewport) {
        if self.state.viewport == viewport {
            return;
        }
        self.state.viewport = viewport;
        if self.state.drag.take().is_some() {
            tracing::debug!("resize cancelled in-flight drag");
        }
        for axis in Axis::BOTH {
            let state = self.state.axis_mut(axis);
            state.model.set_unit_extent(viewport.extent(axis));
            let home = state.model.snap_point(state.active);
            state.offset.hold(home);
        }
        tracing::debug!(width = viewport.width, height = viewport.height, "viewport resized");
    }

    /// Step both springs by `dt`; returns the axes that settled this frame.
    pub fn advance(&mut self, dt: Duration) -> Vec<Axis> {
        Axis::BOTH
            .into_iter()
            .filter(|&axis| self.state.axis_mut(axis).offset.advance(dt))
            .collect()
    }
}

#[cfg(test)]
impl NavigationController {
    pub fn offset(&self, axis: Axis) -> f64 {
        self.state.axis(axis).offset.position()
    }

    /// Current animation target for `axis`.
    pub fn target(&self, axis: Axis) -> f64 {
        self.state.axis(axis).offset.target()
    }

    pub fn snap_point(&self, axis: Axis, index: usize) -> f64 {
        self.state.axis(axis).model.snap_point(index)
    }

    pub fn viewport(&self) -> Viewport {
        self.state.viewport
    }

    pub fn drag_session(&self) -> Option<&DragSession> {
        self.state.drag.as_ref()
    }
}
