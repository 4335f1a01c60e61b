//! Memoised racing lines and speed profiles.
//!
//! Lines are keyed by [`TrackId`]; profiles by `(TrackId, SpecId)`, since a
//! profile is only meaningful for the line it was solved on.  Entries are
//! computed on first request and then handed out as shared `Arc`s until
//! [`LineCache::invalidate`].  There is no eviction: a session only ever
//! sees a handful of tracks and specs.

use std::sync::Arc;

use rc_core::{SpecId, TrackId};
use rc_track::TrackGeometry;
use tracing::debug;

use crate::{CarSpec, LineParams, RacingLineSolution, RacingLineSolver, SpeedProfile, SpeedProfileSolver};

#[cfg(feature = "fx-hash")]
type Map<K, V> = rustc_hash::FxHashMap<K, V>;
#[cfg(not(feature = "fx-hash"))]
type Map<K, V> = std::collections::HashMap<K, V>;

/// Per-session cache of solver outputs.
#[derive(Debug, Default)]
pub struct LineCache {
    solver:   RacingLineSolver,
    lines:    Map<TrackId, Arc<RacingLineSolution>>,
    profiles: Map<(TrackId, SpecId), Arc<SpeedProfile>>,
}

impl LineCache {
    pub fn new(params: LineParams) -> Self {
        Self {
            solver:   RacingLineSolver::new(params),
            lines:    Map::default(),
            profiles: Map::default(),
        }
    }

    pub fn params(&self) -> LineParams {
        self.solver.params
    }

    /// Racing line for `track`, solving it on first request.
    pub fn get_line(&mut self, track: &TrackGeometry) -> Arc<RacingLineSolution> {
        let solver = self.solver;
        Arc::clone(self.lines.entry(track.id()).or_insert_with(|| {
            debug!(track = %track.id(), name = track.name(), "racing line cache miss");
            Arc::new(solver.solve(track))
        }))
    }

    /// Speed profile of `spec` on `track`'s racing line, solving the line
    /// and/or the profile on first request.
    pub fn get_speed_profile(&mut self, track: &TrackGeometry, spec: &CarSpec) -> Arc<SpeedProfile> {
        let key = (track.id(), spec.id);
        if let Some(profile) = self.profiles.get(&key) {
            return Arc::clone(profile);
        }
        let line = self.get_line(track);
        debug!(track = %track.id(), spec = %spec.id, "speed profile cache miss");
        let profile = Arc::new(SpeedProfileSolver::solve(spec, &line));
        self.profiles.insert(key, Arc::clone(&profile));
        profile
    }

    /// Cached line for `track` without computing it.
    pub fn peek_line(&self, track: TrackId) -> Option<&Arc<RacingLineSolution>> {
        self.lines.get(&track)
    }

    /// Drop every cached line and profile (e.g. on track change).  `Arc`s
    /// already handed out stay valid.
    pub fn invalidate(&mut self) {
        debug!(lines = self.lines.len(), profiles = self.profiles.len(), "line cache invalidated");
        self.lines.clear();
        self.profiles.clear();
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn profile_count(&self) -> usize {
        self.profiles.len()
    }
}
