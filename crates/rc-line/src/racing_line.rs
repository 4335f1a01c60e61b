//! Racing-line solver: centerline samples shifted toward corner apexes.
//!
//! # Apex bias
//!
//! Inside a corner each sample gets a bias that is a triangular window over
//! the corner's apex phase (see [`Corner::apex_phase`]), signed by which side
//! of the apex the sample is on:
//!
//! ```text
//! bias = side × (1 − |phase|)
//! side = inside_sign   if phase ≤ 0   (entry up to the apex)
//!      = −inside_sign  if phase > 0   (apex to exit)
//! ```
//!
//! so it is zero at the entry, grows to full magnitude toward the inside edge
//! at the apex, then swings to the outside and unwinds back to zero at the
//! exit.  The sample is moved along its right-normal by
//! `bias × lateral_bias × half_width`.
//!
//! # Curvature
//!
//! Signed curvature (positive = turning left) is the turn angle between the
//! chords to the neighbours `CURVATURE_REACH` samples either side, divided
//! by half the span between them, times the smoothing factor.

use rc_core::{TrackId, Vec2};
use rc_track::{Surface, TrackGeometry, TrackSample};
use tracing::debug;

/// Neighbour distance, in samples, for the curvature estimate.
const CURVATURE_REACH: usize = 2;

/// Tuning for [`RacingLineSolver`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineParams {
    /// Fraction of the half-width used at the apex, `[0, 1]`.
    pub lateral_bias: f32,
    /// Multiplier on the raw curvature estimate.
    pub smoothing:    f32,
}

impl Default for LineParams {
    fn default() -> Self {
        Self { lateral_bias: 0.8, smoothing: 1.0 }
    }
}

// ── RacingLineSample ──────────────────────────────────────────────────────────

/// A track sample moved onto the racing line.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RacingLineSample {
    /// Arc length of the underlying centerline sample.
    pub s:                f32,
    /// Offset world position.
    pub position:         Vec2,
    /// Unit tangent of the offset path.
    pub tangent:          Vec2,
    /// Right-normal of the underlying centerline sample.
    pub normal:           Vec2,
    /// Signed bias in `[-1, 1]` along the right-normal.
    pub apex_bias:        f32,
    /// Applied displacement from the centerline in metres.
    pub lateral_offset:   f32,
    /// Signed curvature in 1/m; positive turns left.
    pub curvature:        f32,
    pub half_width_left:  f32,
    pub half_width_right: f32,
    pub surface:          Surface,
}

impl RacingLineSample {
    /// Half-width on the side given by `side` (negative = left).
    #[inline]
    pub fn half_width_on(&self, side: f32) -> f32 {
        if side < 0.0 { self.half_width_left } else { self.half_width_right }
    }

    #[inline]
    pub fn half_width(&self) -> f32 {
        0.5 * (self.half_width_left + self.half_width_right)
    }
}

// ── RacingLineSolution ────────────────────────────────────────────────────────

/// A full lap of racing-line samples for one track.
#[derive(Clone, Debug)]
pub struct RacingLineSolution {
    track:   TrackId,
    params:  LineParams,
    length:  f32,
    samples: Vec<RacingLineSample>,
}

impl RacingLineSolution {
    #[inline]
    pub fn track_id(&self) -> TrackId {
        self.track
    }

    #[inline]
    pub fn params(&self) -> LineParams {
        self.params
    }

    /// Loop length of the underlying track.
    #[inline]
    pub fn length(&self) -> f32 {
        self.length
    }

    #[inline]
    pub fn samples(&self) -> &[RacingLineSample] {
        &self.samples
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[inline]
    pub fn next_index(&self, i: usize) -> usize {
        if i + 1 >= self.samples.len() { 0 } else { i + 1 }
    }

    /// Arc length from sample `i` to its successor (wrapping at the line).
    pub fn segment_length(&self, i: usize) -> f32 {
        let j = self.next_index(i);
        let end = if j == 0 { self.length } else { self.samples[j].s };
        (end - self.samples[i].s).max(0.0)
    }

    /// Index of the sample nearest `point`, scanning every `stride`-th
    /// sample.  `None` on an empty line.
    pub fn closest_index(&self, point: Vec2, stride: usize) -> Option<usize> {
        (0..self.samples.len())
            .step_by(stride.max(1))
            .map(|i| (i, self.samples[i].position.distance_squared(point)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
    }

    /// Positions of every `stride`-th sample, for drawing.
    pub fn polyline(&self, stride: usize) -> Vec<Vec2> {
        self.samples.iter().step_by(stride.max(1)).map(|p| p.position).collect()
    }
}

// ── RacingLineSolver ──────────────────────────────────────────────────────────

/// Computes a [`RacingLineSolution`] from a track.
#[derive(Copy, Clone, Debug, Default)]
pub struct RacingLineSolver {
    pub params: LineParams,
}

impl RacingLineSolver {
    pub fn new(params: LineParams) -> Self {
        Self { params }
    }

    pub fn solve(&self, track: &TrackGeometry) -> RacingLineSolution {
        let lateral_bias = self.params.lateral_bias.clamp(0.0, 1.0);
        let length = track.length();

        let mut samples: Vec<RacingLineSample> = Vec::with_capacity(track.sample_count());
        for smp in track.samples() {
            let apex_bias = apex_bias(track, smp);
            let lateral_offset = apex_bias * lateral_bias * smp.half_width();
            let position = smp.offset(lateral_offset);
            let tangent = match samples.last() {
                Some(prev) => (position - prev.position).normalize_or(smp.tangent),
                None => smp.tangent,
            };
            samples.push(RacingLineSample {
                s: smp.s,
                position,
                tangent,
                normal: smp.normal,
                apex_bias,
                lateral_offset,
                curvature: 0.0,
                half_width_left: smp.half_width_left,
                half_width_right: smp.half_width_right,
                surface: smp.surface,
            });
        }

        let n = samples.len();
        let reach = CURVATURE_REACH.min(n / 2);
        if reach > 0 {
            for i in 0..n {
                let a = samples[(i + n - reach) % n].position;
                let b = samples[i].position;
                let c = samples[(i + reach) % n].position;
                samples[i].curvature = signed_curvature(a, b, c) * self.params.smoothing;
            }
        }

        debug!(track = %track.id(), samples = n, "racing line solved");
        RacingLineSolution { track: track.id(), params: self.params, length, samples }
    }
}

fn apex_bias(track: &TrackGeometry, smp: &TrackSample) -> f32 {
    match track.corner_at(smp.s) {
        Some(corner) => {
            let phase = corner.apex_phase(smp.s, track.length());
            let inside = corner.direction.inside_sign();
            let side = if phase > 0.0 { -inside } else { inside };
            side * (1.0 - phase.abs())
        }
        None => 0.0,
    }
}

/// Turn angle at `b` between `a → b` and `b → c` over half the `a → c` span.
fn signed_curvature(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    let u = b - a;
    let w = c - b;
    let half_chord = 0.5 * a.distance(c);
    if half_chord <= f32::EPSILON || u.length_squared() <= f32::EPSILON || w.length_squared() <= f32::EPSILON {
        return 0.0;
    }
    u.perp_dot(w).atan2(u.dot(w)) / half_chord
}
