//! Live car state and the per-tick opponent view.

use rc_core::{CarId, SpecId, Vec2};
use rc_track::TrackGeometry;

/// Kinematic state of one car, as reported by the physics loop.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CarState {
    pub id:       CarId,
    pub position: Vec2,
    pub velocity: Vec2,
    /// Heading in radians, counter-clockwise from +x.
    pub heading:  f32,
}

impl CarState {
    pub fn new(id: CarId, position: Vec2, velocity: Vec2, heading: f32) -> Self {
        Self { id, position, velocity, heading }
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Unit vector along the heading.
    #[inline]
    pub fn forward(&self) -> Vec2 {
        Vec2::from_angle(self.heading)
    }
}

/// Read-only view of one car, captured once at the start of a tick.
///
/// Every AI decision in the tick reads the same snapshot list, so the order
/// in which cars are evaluated never changes what they see.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OpponentSnapshot {
    pub id:        CarId,
    pub position:  Vec2,
    pub velocity:  Vec2,
    /// Projected arc length on the track.
    pub s:         f32,
    pub is_player: bool,
    pub spec:      Option<SpecId>,
}

impl OpponentSnapshot {
    /// Snapshot `car`, projecting it onto `track` for its arc length.
    pub fn capture(car: &CarState, track: &TrackGeometry, is_player: bool, spec: Option<SpecId>) -> Self {
        Self {
            id: car.id,
            position: car.position,
            velocity: car.velocity,
            s: track.project(car.position).s,
            is_player,
            spec,
        }
    }
}
