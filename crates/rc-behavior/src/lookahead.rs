//! Pursuit target selection along the racing line.
//!
//! The closest line sample is found with a stride-3 scan, then the walk
//! accumulates segment lengths forward until the lookahead distance
//! `LOOKAHEAD_BASE + LOOKAHEAD_PER_SPEED × speed` is covered.

use rc_core::Vec2;
use rc_line::RacingLineSolution;
use rc_track::TrackGeometry;

/// Stride of the closest-sample scan.
pub const CLOSEST_STRIDE: usize = 3;

/// Lookahead at standstill, metres.
pub const LOOKAHEAD_BASE: f32 = 15.0;

/// Extra lookahead per m/s of speed.
pub const LOOKAHEAD_PER_SPEED: f32 = 0.7;

#[inline]
pub fn lookahead_distance(speed: f32) -> f32 {
    LOOKAHEAD_BASE + LOOKAHEAD_PER_SPEED * speed.max(0.0)
}

/// The pursuit target for one tick.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Lookahead {
    /// Line sample index, or `None` when the target came from the bare
    /// centerline.
    pub index:            Option<usize>,
    pub s:                f32,
    pub position:         Vec2,
    /// Right-normal at the target.
    pub normal:           Vec2,
    /// Current displacement of `position` from the centerline along `normal`.
    pub lateral_offset:   f32,
    pub curvature:        f32,
    pub half_width_left:  f32,
    pub half_width_right: f32,
    /// Distance actually walked to reach the target.
    pub distance:         f32,
}

impl Lookahead {
    /// Walk the racing line from the sample closest to `position`.  `None`
    /// when the line has no samples.
    pub fn on_line(line: &RacingLineSolution, position: Vec2, speed: f32) -> Option<Self> {
        let start = line.closest_index(position, CLOSEST_STRIDE)?;
        let want = lookahead_distance(speed);
        let mut i = start;
        let mut walked = 0.0f32;
        for _ in 0..line.len() {
            if walked >= want {
                break;
            }
            walked += line.segment_length(i);
            i = line.next_index(i);
        }
        let smp = &line.samples()[i];
        Some(Self {
            index:            Some(i),
            s:                smp.s,
            position:         smp.position,
            normal:           smp.normal,
            lateral_offset:   smp.lateral_offset,
            curvature:        smp.curvature,
            half_width_left:  smp.half_width_left,
            half_width_right: smp.half_width_right,
            distance:         walked,
        })
    }

    /// Centerline fallback: project onto the track and step forward in arc
    /// length.
    pub fn on_track(track: &TrackGeometry, position: Vec2, speed: f32) -> Self {
        let want = lookahead_distance(speed);
        let here = track.project(position);
        let smp = track.sample_at(here.s + want);
        Self {
            index:            None,
            s:                smp.s,
            position:         smp.position,
            normal:           smp.normal,
            lateral_offset:   0.0,
            curvature:        0.0,
            half_width_left:  smp.half_width_left,
            half_width_right: smp.half_width_right,
            distance:         want,
        }
    }

    /// Half-width on the side given by `side` (negative = left).
    #[inline]
    pub fn half_width_on(&self, side: f32) -> f32 {
        if side < 0.0 { self.half_width_left } else { self.half_width_right }
    }

    /// Target moved sideways by `shift` metres along the right-normal,
    /// kept between the track edges.
    pub fn shifted(&self, shift: f32) -> Vec2 {
        let lateral = (self.lateral_offset + shift).clamp(-self.half_width_left, self.half_width_right);
        self.position + self.normal * (lateral - self.lateral_offset)
    }
}
