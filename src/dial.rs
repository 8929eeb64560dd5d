// dial.rs - Circular Duration Dial
//
// Converts pointer-drag gestures around a ring into a minute count.
// Angles are measured from twelve o'clock, clockwise, in [0, 360).
// The count is unbounded: several revolutions keep adding minutes while
// only the visual ring wraps every sixty.

use log::debug;

use crate::constants::dial::{
    CONTAINER_SIZE, DEFAULT_MINUTES, DEGREES_PER_MINUTE, MINUTES_PER_REVOLUTION, RING_RADIUS,
};

/// A pointer position in the dial's own coordinate space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Mutable gesture state of the dial
#[derive(Debug, Clone, PartialEq)]
pub struct DialState {
    pub is_dragging: bool,
    pub previous_angle_degrees: f64,
    /// Unclamped running total; may exceed 60 or drop below 0
    pub accumulated_minutes: f64,
    pub minutes: u32,
}

impl Default for DialState {
    fn default() -> Self {
        Self {
            is_dragging: false,
            previous_angle_degrees: 0.0,
            accumulated_minutes: DEFAULT_MINUTES as f64,
            minutes: DEFAULT_MINUTES,
        }
    }
}

/// Geometry the renderer needs to draw the knob and the active arc
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DialVisual {
    /// Minutes folded onto the 0-60 ring (60, not 0, for whole hours)
    pub visual_minutes: u32,
    pub knob_angle_degrees: f64,
    pub large_arc: bool,
    pub full_circle: bool,
}

impl DialVisual {
    pub fn for_minutes(minutes: u32) -> Self {
        let visual_minutes = if minutes == 0 {
            0
        } else {
            ((minutes - 1) % MINUTES_PER_REVOLUTION) + 1
        };
        Self {
            visual_minutes,
            knob_angle_degrees: visual_minutes as f64 / MINUTES_PER_REVOLUTION as f64 * 360.0,
            large_arc: visual_minutes > MINUTES_PER_REVOLUTION / 2,
            full_circle: visual_minutes >= MINUTES_PER_REVOLUTION,
        }
    }

    /// Knob position on a ring of `radius` around `center`
    pub fn knob_point(&self, center: Point, radius: f64) -> Point {
        let radians = (self.knob_angle_degrees - 90.0).to_radians();
        Point::new(
            center.x + radius * radians.cos(),
            center.y + radius * radians.sin(),
        )
    }
}

/// Angle of `point` around `center`: 0 at twelve o'clock, clockwise, [0, 360)
pub fn angle_degrees(center: Point, point: Point) -> f64 {
    let dx = point.x - center.x;
    let dy = point.y - center.y;
    let degrees = dy.atan2(dx).to_degrees() + 90.0;
    degrees.rem_euclid(360.0)
}

/// Shortest signed rotation from `from` to `to`, in (-180, 180]
pub fn wrapped_delta(from: f64, to: f64) -> f64 {
    let mut delta = to - from;
    if delta > 180.0 {
        delta -= 360.0;
    }
    if delta < -180.0 {
        delta += 360.0;
    }
    delta
}

/// The circular drag control used to pick a duration
#[derive(Debug, Clone)]
pub struct DurationDial {
    center: Point,
    radius: f64,
    state: DialState,
}

impl Default for DurationDial {
    fn default() -> Self {
        Self::new(
            Point::new(CONTAINER_SIZE / 2.0, CONTAINER_SIZE / 2.0),
            RING_RADIUS,
        )
    }
}

impl DurationDial {
    pub fn new(center: Point, radius: f64) -> Self {
        Self {
            center,
            radius,
            state: DialState::default(),
        }
    }

    pub fn center(&self) -> Point {
        self.center
    }

    /// Move the dial center, e.g. after the hosting window was resized
    pub fn set_center(&mut self, center: Point) {
        self.center = center;
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn set_radius(&mut self, radius: f64) {
        self.radius = radius;
    }

    pub fn state(&self) -> &DialState {
        &self.state
    }

    pub fn minutes(&self) -> u32 {
        self.state.minutes
    }

    pub fn is_dragging(&self) -> bool {
        self.state.is_dragging
    }

    /// Set minutes from a numeric field; negative input clamps to zero
    pub fn set_minutes(&mut self, minutes: i64) {
        let minutes = minutes.clamp(0, u32::MAX as i64) as u32;
        self.state.minutes = minutes;
        self.state.accumulated_minutes = minutes as f64;
    }

    /// Pointer pressed. Captures the baseline for this gesture.
    ///
    /// Pressing again while a drag is active restarts the gesture from the
    /// current minutes, so no stale angle is carried over.
    pub fn on_drag_start(&mut self, point: Point) {
        if self.state.is_dragging {
            debug!("Dial drag restarted while active");
        }
        self.state.is_dragging = true;
        self.state.previous_angle_degrees = angle_degrees(self.center, point);
        self.state.accumulated_minutes = self.state.minutes as f64;
    }

    /// Pointer moved. Returns true when the displayed minutes changed.
    pub fn on_drag_move(&mut self, point: Point) -> bool {
        if !self.state.is_dragging {
            return false;
        }

        let angle = angle_degrees(self.center, point);
        let delta = wrapped_delta(self.state.previous_angle_degrees, angle);

        self.state.accumulated_minutes += delta / DEGREES_PER_MINUTE;
        self.state.previous_angle_degrees = angle;

        let rounded = self.state.accumulated_minutes.round().max(0.0);
        let minutes = rounded.min(u32::MAX as f64) as u32;
        let changed = minutes != self.state.minutes;
        self.state.minutes = minutes;
        changed
    }

    /// Pointer released. Minutes stay where the gesture left them.
    pub fn on_drag_end(&mut self) {
        self.state.is_dragging = false;
    }

    pub fn visual(&self) -> DialVisual {
        DialVisual::for_minutes(self.state.minutes)
    }

    pub fn knob_point(&self) -> Point {
        self.visual().knob_point(self.center, self.radius)
    }
}
