//! Speed-profile solver: maximum speed versus arc length along a racing line.
//!
//! # Passes
//!
//! 1. **Lateral grip**: `v = sqrt(a_lat / |κ|)` per sample, with `|κ|`
//!    floored at `MIN_CURVATURE` so straights get a large finite cap.
//! 2. **Backward braking** (end → start): `v[i] ≤ sqrt(v[i+1]² + 2·b·ds)`.
//! 3. **Forward acceleration** (start → end): `v[i+1] ≤ sqrt(v[i]² + 2·a(v[i])·ds)`
//!    where `a` is full-throttle acceleration net of drag.
//!
//! The line is a closed loop, so passes 2 and 3 each run for two laps: one
//! full sweep after the slowest point is enough to settle every sample, and
//! two laps always contain such a sweep whatever the start index.
//!
//! `desired_accel` is the constant acceleration that takes a car from one
//! point's speed to the next over their spacing.

use rc_core::{SpecId, TrackId};
use tracing::debug;

use crate::{CarSpec, RacingLineSolution};

/// Smallest curvature magnitude used in the grip pass (10 km radius).
pub const MIN_CURVATURE: f32 = 1.0e-4;

/// Arc-length step floor for the braking and acceleration passes.
pub const MIN_STEP: f32 = 0.05;

/// Target speed reported by an empty profile, m/s.
pub const DEFAULT_TARGET_SPEED: f32 = 10.0;

/// One point of a [`SpeedProfile`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpeedProfilePoint {
    pub s:             f32,
    /// m/s.
    pub max_speed:     f32,
    /// m/s², positive when the next point is faster.
    pub desired_accel: f32,
}

/// Maximum speed along one racing line for one car spec.
#[derive(Clone, Debug)]
pub struct SpeedProfile {
    pub(crate) track:  TrackId,
    pub(crate) spec:   SpecId,
    pub(crate) length: f32,
    pub(crate) points: Vec<SpeedProfilePoint>,
}

impl SpeedProfile {
    #[inline]
    pub fn track_id(&self) -> TrackId {
        self.track
    }

    #[inline]
    pub fn spec_id(&self) -> SpecId {
        self.spec
    }

    #[inline]
    pub fn length(&self) -> f32 {
        self.length
    }

    #[inline]
    pub fn points(&self) -> &[SpeedProfilePoint] {
        &self.points
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Interpolated maximum speed at arc length `s` (wrapped).
    ///
    /// Binary-searches for the bracketing pair; past the last point the
    /// bracket closes the loop back to the first.  An empty profile
    /// returns [`DEFAULT_TARGET_SPEED`].
    pub fn target_speed_at(&self, s: f32) -> f32 {
        let n = self.points.len();
        if n == 0 || self.length <= 0.0 {
            return DEFAULT_TARGET_SPEED;
        }
        let s = s.rem_euclid(self.length);
        let upper = self.points.partition_point(|p| p.s <= s).max(1);
        let lo = upper - 1;
        let hi = if upper == n { 0 } else { upper };
        let a = &self.points[lo];
        let b = &self.points[hi];
        let end = if hi == 0 { self.length } else { b.s };
        let span = end - a.s;
        let t = if span > f32::EPSILON { ((s - a.s) / span).clamp(0.0, 1.0) } else { 0.0 };
        a.max_speed + (b.max_speed - a.max_speed) * t
    }

    /// Slowest point on the lap.
    pub fn min_speed(&self) -> Option<&SpeedProfilePoint> {
        self.points.iter().min_by(|a, b| a.max_speed.total_cmp(&b.max_speed))
    }
}

// ── SpeedProfileSolver ────────────────────────────────────────────────────────

/// Three-pass lap speed solver.
pub struct SpeedProfileSolver;

impl SpeedProfileSolver {
    pub fn solve(spec: &CarSpec, line: &RacingLineSolution) -> SpeedProfile {
        let samples = line.samples();
        let n = samples.len();
        let mut speed: Vec<f32> = Vec::with_capacity(n);

        // ── Pass 1: lateral grip ──────────────────────────────────────────
        for smp in samples {
            let kappa = smp.curvature.abs().max(MIN_CURVATURE);
            speed.push((spec.max_lateral_accel(smp.surface.grip()) / kappa).sqrt());
        }
        let step: Vec<f32> = (0..n).map(|i| line.segment_length(i).max(MIN_STEP)).collect();

        // ── Pass 2: backward braking ──────────────────────────────────────
        if n > 1 {
            for k in (0..2 * n).rev() {
                let i = k % n;
                let j = (i + 1) % n;
                let entry = (speed[j] * speed[j] + 2.0 * spec.brake_decel * step[i]).sqrt();
                speed[i] = speed[i].min(entry);
            }

            // ── Pass 3: forward acceleration ──────────────────────────────
            for k in 0..2 * n {
                let i = k % n;
                let j = (i + 1) % n;
                let v = speed[i];
                let exit = (v * v + 2.0 * spec.full_throttle_accel(v) * step[i]).max(0.0).sqrt();
                speed[j] = speed[j].min(exit);
            }
        }

        let points = (0..n)
            .map(|i| {
                let j = (i + 1) % n;
                let (v, v_next) = (speed[i], speed[j]);
                SpeedProfilePoint {
                    s:             samples[i].s,
                    max_speed:     v,
                    desired_accel: (v_next * v_next - v * v) / (2.0 * step[i]),
                }
            })
            .collect();

        debug!(track = %line.track_id(), spec = %spec.id, points = n, "speed profile solved");
        SpeedProfile { track: line.track_id(), spec: spec.id, length: line.length(), points }
    }
}
