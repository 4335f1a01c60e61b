//! The built track: dense centerline samples indexed by arc length.
//!
//! # Data layout
//!
//! `samples` is ordered by build order.  `samples[0].s == 0` and `s` is
//! non-decreasing along the vector; the only discontinuity is the implicit
//! wrap from the last sample back to the first, whose segment has length
//! `length - samples[last].s`.
//!
//! A `TrackGeometry` is immutable once built.  Callers share it behind an
//! `Arc` and every query takes `&self`.

use rc_core::{TrackId, Vec2};

use crate::ranges::forward_distance;
use crate::{Corner, Sector};

// ── Surface ───────────────────────────────────────────────────────────────────

/// Surface tag carried by every sample.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Surface {
    #[default]
    Asphalt,
    Kerb,
    Grass,
    Gravel,
}

impl Surface {
    /// Grip multiplier relative to clean asphalt.
    #[inline]
    pub fn grip(self) -> f32 {
        match self {
            Surface::Asphalt => 1.0,
            Surface::Kerb    => 0.9,
            Surface::Grass   => 0.6,
            Surface::Gravel  => 0.5,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Surface::Asphalt => "asphalt",
            Surface::Kerb    => "kerb",
            Surface::Grass   => "grass",
            Surface::Gravel  => "gravel",
        }
    }
}

// ── TrackSample ───────────────────────────────────────────────────────────────

/// One centerline sample.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackSample {
    /// Arc length from the start line, metres.
    pub s: f32,
    pub position: Vec2,
    /// Unit tangent in the direction of travel.
    pub tangent: Vec2,
    /// Unit right-hand normal (tangent rotated -90°).
    pub normal: Vec2,
    pub half_width_left: f32,
    pub half_width_right: f32,
    pub surface: Surface,
}

impl TrackSample {
    /// Mean of the two half-widths.
    #[inline]
    pub fn half_width(&self) -> f32 {
        0.5 * (self.half_width_left + self.half_width_right)
    }

    /// Half-width on the side given by `side` (negative = left, else right).
    #[inline]
    pub fn half_width_on(&self, side: f32) -> f32 {
        if side < 0.0 { self.half_width_left } else { self.half_width_right }
    }

    /// Point displaced `offset` metres along the right-normal.
    #[inline]
    pub fn offset(&self, offset: f32) -> Vec2 {
        self.position + self.normal * offset
    }
}

// ── TrackGeometry ─────────────────────────────────────────────────────────────

/// Closed-loop track built by [`TrackBuilder`](crate::TrackBuilder).
#[derive(Clone, Debug)]
pub struct TrackGeometry {
    pub(crate) id: TrackId,
    pub(crate) name: String,
    pub(crate) samples: Vec<TrackSample>,
    pub(crate) length: f32,
    pub(crate) corners: Vec<Corner>,
    pub(crate) sectors: Vec<Sector>,
}

impl TrackGeometry {
    #[inline]
    pub fn id(&self) -> TrackId {
        self.id
    }

    /// Display name.  Not an identity: use [`id`](Self::id) for keys.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Total loop length `L` in metres.
    #[inline]
    pub fn length(&self) -> f32 {
        self.length
    }

    #[inline]
    pub fn samples(&self) -> &[TrackSample] {
        &self.samples
    }

    #[inline]
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn corners(&self) -> &[Corner] {
        &self.corners
    }

    #[inline]
    pub fn sectors(&self) -> &[Sector] {
        &self.sectors
    }

    /// Index of the sample after `i`, wrapping.
    #[inline]
    pub fn next_index(&self, i: usize) -> usize {
        if i + 1 == self.samples.len() { 0 } else { i + 1 }
    }

    /// Index of the sample before `i`, wrapping.
    #[inline]
    pub fn prev_index(&self, i: usize) -> usize {
        if i == 0 { self.samples.len() - 1 } else { i - 1 }
    }

    /// Wrap any arc length into `[0, L)`.
    #[inline]
    pub fn wrap_s(&self, s: f32) -> f32 {
        let w = s.rem_euclid(self.length);
        // rem_euclid can round up to exactly L for tiny negative inputs.
        if w >= self.length { 0.0 } else { w }
    }

    /// Forward arc-length distance from `from` to `to`.
    #[inline]
    pub fn forward_distance(&self, from: f32, to: f32) -> f32 {
        forward_distance(from, to, self.length)
    }

    /// Arc length of the segment starting at sample `i` (the last segment
    /// closes the loop).
    #[inline]
    pub fn segment_length(&self, i: usize) -> f32 {
        let j = self.next_index(i);
        let end = if j == 0 { self.length } else { self.samples[j].s };
        end - self.samples[i].s
    }

    /// Interpolated sample at arc length `s` (any value; wrapped first).
    ///
    /// Binary-searches for the bracketing pair and interpolates linearly by
    /// arc-length fraction.  Past the last sample the bracket is the closing
    /// segment back to sample 0.
    pub fn sample_at(&self, s: f32) -> TrackSample {
        let s = self.wrap_s(s);
        let (lo, hi, t) = self.bracket(s);
        let a = &self.samples[lo];
        let b = &self.samples[hi];

        let tangent = a.tangent.lerp(b.tangent, t).normalize_or(a.tangent);
        TrackSample {
            s,
            position: a.position.lerp(b.position, t),
            tangent,
            normal: -tangent.perp(),
            half_width_left: lerp(a.half_width_left, b.half_width_left, t),
            half_width_right: lerp(a.half_width_right, b.half_width_right, t),
            surface: if t < 0.5 { a.surface } else { b.surface },
        }
    }

    /// Bracketing sample indices around wrapped `s` plus the fraction
    /// between them.
    pub(crate) fn bracket(&self, s: f32) -> (usize, usize, f32) {
        // samples[0].s == 0 <= s, so the partition point is at least 1.
        let upper = self.samples.partition_point(|p| p.s <= s).max(1);
        let lo = upper - 1;
        let hi = if upper == self.samples.len() { 0 } else { upper };
        let span = self.segment_length(lo);
        let t = if span > f32::EPSILON {
            ((s - self.samples[lo].s) / span).clamp(0.0, 1.0)
        } else {
            0.0
        };
        (lo, hi, t)
    }

    /// First corner whose range contains `s`.
    pub fn corner_at(&self, s: f32) -> Option<&Corner> {
        let s = self.wrap_s(s);
        self.corners.iter().find(|c| c.contains(s))
    }

    /// First sector whose range contains `s`.
    pub fn sector_at(&self, s: f32) -> Option<&Sector> {
        let s = self.wrap_s(s);
        self.sectors.iter().find(|sec| sec.contains(s))
    }
}

#[inline]
pub(crate) fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
