//! Controller configuration.

use rc_behavior::PlannerConfig;
use rc_line::LineParams;

/// Everything fixed for the lifetime of a [`DriverController`](crate::DriverController).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DriverConfig {
    /// Session seed.  Each car's stream is derived from it and the car id.
    pub seed:                  u64,
    pub line:                  LineParams,
    pub planner:               PlannerConfig,
    /// Keep every n-th racing-line sample in the debug polyline.
    pub debug_polyline_stride: usize,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            seed:                  0,
            line:                  LineParams::default(),
            planner:               PlannerConfig::default(),
            debug_polyline_stride: 8,
        }
    }
}
