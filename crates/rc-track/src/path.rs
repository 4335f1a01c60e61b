//! Turtle-style generator of control points from straights and arcs.
//!
//! Handy for synthetic circuits (tests, demos, procedurally generated
//! layouts) where writing control points by hand is error-prone.  The
//! tracer keeps a running distance so callers can place corner and sector
//! definitions at the arc lengths they just laid down.

use rc_core::Vec2;

use crate::{ControlPoint, Surface};

/// Lays down control points along straights and circular arcs.
///
/// ```
/// use rc_core::Vec2;
/// use rc_track::PathTracer;
///
/// let mut p = PathTracer::new(Vec2::ZERO, 0.0, 6.0, 5.0);
/// p.straight(100.0).arc(20.0, 180.0).straight(100.0).arc(20.0, 180.0);
/// assert!((p.distance() - (200.0 + 40.0 * std::f32::consts::PI)).abs() < 1e-2);
/// let points = p.finish();
/// assert!(points.len() > 40);
/// ```
pub struct PathTracer {
    position: Vec2,
    heading: Vec2,
    half_width: f32,
    surface: Surface,
    spacing: f32,
    distance: f32,
    points: Vec<ControlPoint>,
}

impl PathTracer {
    /// Start at `position` facing `heading_rad` (CCW from +x), emitting a
    /// control point roughly every `spacing` metres.
    pub fn new(position: Vec2, heading_rad: f32, half_width: f32, spacing: f32) -> Self {
        let mut tracer = Self {
            position,
            heading: Vec2::from_angle(heading_rad),
            half_width,
            surface: Surface::Asphalt,
            spacing: spacing.max(0.1),
            distance: 0.0,
            points: Vec::new(),
        };
        tracer.emit();
        tracer
    }

    /// Half-width applied to points emitted from now on.
    pub fn half_width(&mut self, half_width: f32) -> &mut Self {
        self.half_width = half_width;
        self
    }

    /// Surface applied to points emitted from now on.
    pub fn surface(&mut self, surface: Surface) -> &mut Self {
        self.surface = surface;
        self
    }

    /// Arc length laid down so far.
    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn straight(&mut self, length: f32) -> &mut Self {
        let steps = (length / self.spacing).ceil().max(1.0) as usize;
        let start = self.position;
        for k in 1..=steps {
            self.position = start + self.heading * (length * k as f32 / steps as f32);
            self.emit();
        }
        self.distance += length;
        self
    }

    /// Circular arc of `radius` turning `degrees` (positive = left).
    pub fn arc(&mut self, radius: f32, degrees: f32) -> &mut Self {
        let sweep = degrees.to_radians();
        let length = radius * sweep.abs();
        let steps = (length / self.spacing).ceil().max(2.0) as usize;
        let side = if sweep >= 0.0 { self.heading.perp() } else { -self.heading.perp() };
        let center = self.position + side * radius;
        let start_angle = (self.position - center).to_angle();
        let start_heading = self.heading.to_angle();
        for k in 1..=steps {
            let a = sweep * k as f32 / steps as f32;
            self.position = center + Vec2::from_angle(start_angle + a) * radius;
            self.heading = Vec2::from_angle(start_heading + a);
            self.emit();
        }
        self.distance += length;
        self
    }

    /// Consume the tracer.  A final point that lands back on the start is
    /// dropped, since the spline closes the loop on its own.
    pub fn finish(mut self) -> Vec<ControlPoint> {
        if self.points.len() > 3 {
            let first = self.points[0].position;
            let last = self.points[self.points.len() - 1].position;
            if first.distance(last) < 0.5 * self.spacing {
                self.points.pop();
            }
        }
        self.points
    }

    fn emit(&mut self) {
        self.points.push(ControlPoint::new(self.position, self.half_width).with_surface(self.surface));
    }
}
