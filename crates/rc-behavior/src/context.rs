//! Everything one decision reads, bundled for a single car and tick.

use rc_line::{RacingLineSolution, SpeedProfile};
use rc_track::TrackGeometry;

use crate::{AiGlobalSettings, AiSkillProfile, CarState, OpponentSnapshot};

/// Read-only inputs to [`DriverModel::decide`](crate::DriverModel::decide).
///
/// Built by the controller for each car each tick.  All borrows end with
/// the call; models must not keep references past it.
pub struct DriverContext<'a> {
    pub track:     &'a TrackGeometry,
    pub line:      &'a RacingLineSolution,
    pub profile:   &'a SpeedProfile,
    pub skill:     &'a AiSkillProfile,
    pub global:    &'a AiGlobalSettings,
    /// The car being driven.
    pub car:       &'a CarState,
    /// Snapshot of every car this tick.  May include `car` itself; planners
    /// skip entries with the same id.
    pub opponents: &'a [OpponentSnapshot],
    /// Seconds since the previous decision.
    pub dt:        f32,
}

impl<'a> DriverContext<'a> {
    /// Opponents other than the car being driven.
    pub fn others(&self) -> impl Iterator<Item = &'a OpponentSnapshot> + '_ {
        let me = self.car.id;
        self.opponents.iter().filter(move |o| o.id != me)
    }
}
