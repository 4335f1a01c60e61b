//! Nearest-point projection of a world point onto the centerline.
//!
//! Runs once per car per tick, so it avoids a full O(samples) exact search:
//!
//! 1. **Coarse**: scan every `COARSE_STRIDE`-th sample for the minimum
//!    squared distance.
//! 2. **Refine**: scan ±`2 * COARSE_STRIDE` samples around the coarse winner.
//! 3. **Exact**: project onto the two segments adjacent to the refined
//!    winner (parametric clamp to `[0, 1]`) and keep the closer foot point.
//!    `s` is interpolated along that segment's arc-length span.
//!
//! The coarse stride can in principle skip a narrow hairpin whose two legs
//! pass within one stride of each other; the refine window absorbs this on
//! any sensibly sampled track.

use rc_core::Vec2;

use crate::{TrackGeometry, TrackSample};

/// Stride of the coarse scan.
const COARSE_STRIDE: usize = 4;

/// Half-width of the refine window in samples.
const REFINE_RADIUS: usize = 2 * COARSE_STRIDE;

/// Result of [`TrackGeometry::project`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Projection {
    /// Arc length of the foot point, in `[0, L)`.
    pub s: f32,
    /// Euclidean distance from the query point to the foot point.
    pub distance: f32,
    /// Signed offset along the right-normal (negative = left of centre).
    pub lateral: f32,
    /// Index of the refined nearest sample.
    pub index: usize,
    /// Interpolated sample at `s`.
    pub sample: TrackSample,
}

impl TrackGeometry {
    /// Project `point` onto the track centerline.
    pub fn project(&self, point: Vec2) -> Projection {
        let n = self.samples.len();

        // ── Phase 1: coarse scan ──────────────────────────────────────────
        let mut best = 0usize;
        let mut best_d2 = f32::INFINITY;
        for i in (0..n).step_by(COARSE_STRIDE) {
            let d2 = self.samples[i].position.distance_squared(point);
            if d2 < best_d2 {
                best_d2 = d2;
                best = i;
            }
        }

        // ── Phase 2: refine around the coarse winner ──────────────────────
        let coarse = best;
        let window = REFINE_RADIUS.min(n / 2);
        for k in 0..=2 * window {
            let i = (coarse + n + k - window) % n;
            let d2 = self.samples[i].position.distance_squared(point);
            if d2 < best_d2 {
                best_d2 = d2;
                best = i;
            }
        }

        // ── Phase 3: exact foot point on the adjacent segments ────────────
        let before = self.project_on_segment(self.prev_index(best), point);
        let after = self.project_on_segment(best, point);
        let (s, foot, d2) = if before.2 <= after.2 { before } else { after };

        let sample = self.sample_at(s);
        let lateral = (point - foot).dot(sample.normal);
        Projection {
            s: sample.s,
            distance: d2.sqrt(),
            lateral,
            index: best,
            sample,
        }
    }

    /// Foot point of `point` on the segment from sample `i` to its
    /// successor.  Returns `(s, foot, squared distance)`.
    fn project_on_segment(&self, i: usize, point: Vec2) -> (f32, Vec2, f32) {
        let j = self.next_index(i);
        let a = self.samples[i].position;
        let b = self.samples[j].position;
        let ab = b - a;
        let len2 = ab.length_squared();
        let t = if len2 > f32::EPSILON {
            ((point - a).dot(ab) / len2).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let foot = a + ab * t;

        let s_a = self.samples[i].s;
        let mut s_b = self.samples[j].s;
        if s_b < s_a {
            // Closing segment: sample 0 sits at s = L.
            s_b += self.length;
        }
        let s = self.wrap_s(s_a + (s_b - s_a) * t);
        (s, foot, foot.distance_squared(point))
    }
}
