//! Build a [`TrackGeometry`] from sparse control points.
//!
//! # Sampling
//!
//! The centerline is a closed uniform Catmull-Rom spline through the control
//! points.  Each segment `P1 → P2` (with neighbours `P0`, `P3`, all indices
//! wrapping) is evaluated at `steps_per_segment` evenly spaced parameter
//! values; position and tangent both come straight from the cubic basis:
//!
//! ```text
//! P(t)  = ½ [ 2P1 + (P2−P0)t + (2P0−5P1+4P2−P3)t² + (−P0+3P1−3P2+P3)t³ ]
//! P'(t) = ½ [ (P2−P0) + 2(2P0−5P1+4P2−P3)t + 3(−P0+3P1−3P2+P3)t² ]
//! ```
//!
//! Arc length accumulates the chord length between consecutive samples, so
//! samples are close to, but not exactly, equidistant in `s`.

use rc_core::{TrackId, Vec2};
use tracing::info;

use crate::geometry::lerp;
use crate::{
    Corner, SRange, Sector, Surface, TrackError, TrackGeometry, TrackResult, TrackSample,
    TurnDirection,
};

/// Spline evaluations per control segment unless overridden.
pub const DEFAULT_STEPS_PER_SEGMENT: usize = 16;

/// Steps used to integrate tangent rotation across a corner.
const CORNER_TURN_STEPS: usize = 32;

// ── Inputs ────────────────────────────────────────────────────────────────────

/// A sparse centerline point with its local track width and surface.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ControlPoint {
    pub position: Vec2,
    pub half_width_left: f32,
    pub half_width_right: f32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub surface: Surface,
}

impl ControlPoint {
    /// Asphalt point with equal half-widths on both sides.
    pub fn new(position: Vec2, half_width: f32) -> Self {
        Self {
            position,
            half_width_left: half_width,
            half_width_right: half_width,
            surface: Surface::Asphalt,
        }
    }

    pub fn with_widths(mut self, left: f32, right: f32) -> Self {
        self.half_width_left = left;
        self.half_width_right = right;
        self
    }

    pub fn with_surface(mut self, surface: Surface) -> Self {
        self.surface = surface;
        self
    }
}

/// Corner definition in arc length.  Values are wrapped into `[0, L)` once
/// the loop length is known; `start_s > end_s` is a corner spanning the
/// start line.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CornerDef {
    pub name: String,
    pub start_s: f32,
    pub apex_s: f32,
    pub end_s: f32,
}

impl CornerDef {
    pub fn new(name: impl Into<String>, start_s: f32, apex_s: f32, end_s: f32) -> Self {
        Self { name: name.into(), start_s, apex_s, end_s }
    }
}

/// Timing sector definition in arc length.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SectorDef {
    pub name: String,
    pub start_s: f32,
    pub end_s: f32,
}

impl SectorDef {
    pub fn new(name: impl Into<String>, start_s: f32, end_s: f32) -> Self {
        Self { name: name.into(), start_s, end_s }
    }
}

// ── TrackBuilder ──────────────────────────────────────────────────────────────

/// Collects control points, corners and sectors, then samples the spline.
///
/// # Example
///
/// ```
/// use rc_core::{TrackId, Vec2};
/// use rc_track::{ControlPoint, TrackBuilder};
///
/// let mut b = TrackBuilder::new(TrackId(0), "square");
/// for (x, y) in [(0.0, 0.0), (100.0, 0.0), (100.0, 100.0), (0.0, 100.0)] {
///     b.add_control_point(ControlPoint::new(Vec2::new(x, y), 6.0));
/// }
/// let track = b.build().unwrap();
/// assert!(track.length() > 300.0);
/// ```
pub struct TrackBuilder {
    id: TrackId,
    name: String,
    points: Vec<ControlPoint>,
    corners: Vec<CornerDef>,
    sectors: Vec<SectorDef>,
    steps_per_segment: usize,
}

impl TrackBuilder {
    pub fn new(id: TrackId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            points: Vec::new(),
            corners: Vec::new(),
            sectors: Vec::new(),
            steps_per_segment: DEFAULT_STEPS_PER_SEGMENT,
        }
    }

    /// Spline evaluations per control segment (minimum 1).
    pub fn steps_per_segment(mut self, steps: usize) -> Self {
        self.steps_per_segment = steps.max(1);
        self
    }

    pub fn add_control_point(&mut self, point: ControlPoint) -> &mut Self {
        self.points.push(point);
        self
    }

    pub fn add_control_points(&mut self, points: impl IntoIterator<Item = ControlPoint>) -> &mut Self {
        self.points.extend(points);
        self
    }

    pub fn add_corner(&mut self, corner: CornerDef) -> &mut Self {
        self.corners.push(corner);
        self
    }

    pub fn add_sector(&mut self, sector: SectorDef) -> &mut Self {
        self.sectors.push(sector);
        self
    }

    pub fn control_point_count(&self) -> usize {
        self.points.len()
    }

    /// Sample the spline and produce an immutable [`TrackGeometry`].
    ///
    /// # Errors
    ///
    /// Fails on fewer than 3 control points, non-finite positions, negative
    /// or non-finite widths, or a loop with zero length.
    pub fn build(self) -> TrackResult<TrackGeometry> {
        let n = self.points.len();
        if n < 3 {
            return Err(TrackError::TooFewControlPoints { got: n });
        }
        for (index, p) in self.points.iter().enumerate() {
            if !p.position.is_finite() {
                return Err(TrackError::NonFinitePosition { index });
            }
            for value in [p.half_width_left, p.half_width_right] {
                if !value.is_finite() || value < 0.0 {
                    return Err(TrackError::InvalidWidth { index, value });
                }
            }
        }

        let steps = self.steps_per_segment;
        let mut samples: Vec<TrackSample> = Vec::with_capacity(n * steps);
        let mut s = 0.0f32;

        for i in 0..n {
            let p0 = self.points[(i + n - 1) % n].position;
            let p1 = &self.points[i];
            let p2 = &self.points[(i + 1) % n];
            let p3 = self.points[(i + 2) % n].position;
            let chord_dir = (p2.position - p1.position).normalize_or(Vec2::X);

            for k in 0..steps {
                let t = k as f32 / steps as f32;
                let position = catmull_rom(p0, p1.position, p2.position, p3, t);
                let tangent = catmull_rom_derivative(p0, p1.position, p2.position, p3, t)
                    .normalize_or(chord_dir);

                if let Some(prev) = samples.last() {
                    s += prev.position.distance(position);
                }

                samples.push(TrackSample {
                    s,
                    position,
                    tangent,
                    normal: -tangent.perp(),
                    half_width_left: lerp(p1.half_width_left, p2.half_width_left, t),
                    half_width_right: lerp(p1.half_width_right, p2.half_width_right, t),
                    surface: if t < 0.5 { p1.surface } else { p2.surface },
                });
            }
        }

        let closing = samples[samples.len() - 1].position.distance(samples[0].position);
        let length = s + closing;
        if length <= f32::EPSILON {
            return Err(TrackError::ZeroLength);
        }

        let mut track = TrackGeometry {
            id: self.id,
            name: self.name,
            samples,
            length,
            corners: Vec::with_capacity(self.corners.len()),
            sectors: Vec::with_capacity(self.sectors.len()),
        };

        let corners: Vec<Corner> = self
            .corners
            .into_iter()
            .map(|def| {
                let range = SRange::new(track.wrap_s(def.start_s), track.wrap_s(def.end_s));
                let direction = turn_direction(&track, range);
                Corner { name: def.name, range, apex_s: track.wrap_s(def.apex_s), direction }
            })
            .collect();

        let sectors: Vec<Sector> = self
            .sectors
            .into_iter()
            .enumerate()
            .map(|(index, def)| Sector {
                index,
                name: def.name,
                range: SRange::new(track.wrap_s(def.start_s), track.wrap_s(def.end_s)),
            })
            .collect();

        track.corners = corners;
        track.sectors = sectors;

        info!(
            track   = %track.id,
            name    = %track.name,
            samples = track.samples.len(),
            length  = track.length,
            corners = track.corners.len(),
            "track built"
        );
        Ok(track)
    }
}

// ── Spline basis ──────────────────────────────────────────────────────────────

#[inline]
fn catmull_rom(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, t: f32) -> Vec2 {
    let t2 = t * t;
    let t3 = t2 * t;
    let a = p1 * 2.0;
    let b = p2 - p0;
    let c = p0 * 2.0 - p1 * 5.0 + p2 * 4.0 - p3;
    let d = -p0 + p1 * 3.0 - p2 * 3.0 + p3;
    (a + b * t + c * t2 + d * t3) * 0.5
}

#[inline]
fn catmull_rom_derivative(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, t: f32) -> Vec2 {
    let b = p2 - p0;
    let c = p0 * 2.0 - p1 * 5.0 + p2 * 4.0 - p3;
    let d = -p0 + p1 * 3.0 - p2 * 3.0 + p3;
    (b + c * (2.0 * t) + d * (3.0 * t * t)) * 0.5
}

/// Integrate the signed tangent rotation across `range`; positive is a
/// left-hander.  Integrating (rather than comparing entry and exit tangents)
/// keeps hairpins, where entry and exit are anti-parallel, unambiguous.
fn turn_direction(track: &TrackGeometry, range: SRange) -> TurnDirection {
    let span = range.span(track.length());
    let step = span / CORNER_TURN_STEPS as f32;
    let mut prev = track.sample_at(range.start).tangent;
    let mut turned = 0.0f32;
    for k in 1..=CORNER_TURN_STEPS {
        let tangent = track.sample_at(range.start + step * k as f32).tangent;
        turned += prev.perp_dot(tangent).atan2(prev.dot(tangent));
        prev = tangent;
    }
    if turned >= 0.0 { TurnDirection::Left } else { TurnDirection::Right }
}
