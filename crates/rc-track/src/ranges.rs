//! Auxiliary arc-length ranges: corners and sectors.
//!
//! Both are small lists (a handful per track) scanned linearly.  A range may
//! cross the start/finish line, in which case `start > end`.

/// An inclusive `[start, end]` span of arc length on a closed loop.
///
/// When `start > end` the span wraps through `s = 0`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SRange {
    pub start: f32,
    pub end: f32,
}

impl SRange {
    #[inline]
    pub fn new(start: f32, end: f32) -> Self {
        Self { start, end }
    }

    /// `true` if the already-wrapped arc length `s` lies inside the span.
    #[inline]
    pub fn contains(&self, s: f32) -> bool {
        if self.start <= self.end {
            s >= self.start && s <= self.end
        } else {
            s >= self.start || s <= self.end
        }
    }

    #[inline]
    pub fn wraps(&self) -> bool {
        self.start > self.end
    }

    /// Forward length of the span on a loop of total length `length`.
    #[inline]
    pub fn span(&self, length: f32) -> f32 {
        forward_distance(self.start, self.end, length)
    }
}

/// Distance travelled going forward from `from` to `to` on a loop.
#[inline]
pub(crate) fn forward_distance(from: f32, to: f32, length: f32) -> f32 {
    (to - from).rem_euclid(length)
}

/// Which way a corner turns when driven in the direction of increasing `s`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnDirection {
    Left,
    Right,
}

impl TurnDirection {
    /// Sign of the inside edge along the track's right-normal: a left-hander
    /// has its inside on the left, i.e. along the negative right-normal.
    #[inline]
    pub fn inside_sign(self) -> f32 {
        match self {
            TurnDirection::Left => -1.0,
            TurnDirection::Right => 1.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TurnDirection::Left => "left",
            TurnDirection::Right => "right",
        }
    }
}

/// A corner: its arc-length span, apex position and turn direction.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Corner {
    pub name: String,
    pub range: SRange,
    pub apex_s: f32,
    /// Derived from the track tangents at build time.
    pub direction: TurnDirection,
}

impl Corner {
    #[inline]
    pub fn contains(&self, s: f32) -> bool {
        self.range.contains(s)
    }

    /// Position of `s` relative to the apex, normalised to `[-1, 1]`.
    ///
    /// `-1` at the corner entry, `0` at the apex, `+1` at the exit.  Entry
    /// and exit halves are normalised separately, so an off-centre apex
    /// still maps its own entry/exit to ±1.
    pub fn apex_phase(&self, s: f32, length: f32) -> f32 {
        let before = forward_distance(self.range.start, self.apex_s, length);
        let after = forward_distance(self.apex_s, self.range.end, length);
        let into = forward_distance(self.range.start, s, length);
        if into <= before {
            if before <= f32::EPSILON {
                return 0.0;
            }
            ((into - before) / before).clamp(-1.0, 0.0)
        } else {
            if after <= f32::EPSILON {
                return 0.0;
            }
            ((into - before) / after).clamp(0.0, 1.0)
        }
    }
}

/// A timing sector.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sector {
    pub index: usize,
    pub name: String,
    pub range: SRange,
}

impl Sector {
    #[inline]
    pub fn contains(&self, s: f32) -> bool {
        self.range.contains(s)
    }
}
