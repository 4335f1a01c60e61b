//! Fluent builder for constructing a [`DriverController`].

use std::sync::Arc;

use rc_behavior::{AiGlobalSettings, DecisionModel, DriverModel, PlannerConfig};
use rc_track::{TrackBuilder, TrackGeometry};

use crate::controller::ModelFactory;
use crate::{DriverConfig, DriverController, DriverResult};

/// Fluent builder for [`DriverController<M>`].
///
/// # Optional inputs (have defaults)
///
/// | Method          | Default                                   |
/// |-----------------|-------------------------------------------|
/// | `.config(c)`    | `DriverConfig::default()`                 |
/// | `.seed(s)`      | `0`                                       |
/// | `.global(g)`    | `AiGlobalSettings::default()`             |
/// | `.model(f)`     | `DecisionModel::new` per car              |
///
/// # Example
///
/// ```rust,ignore
/// let mut ai = DriverControllerBuilder::new(track)
///     .seed(42)
///     .global(AiGlobalSettings { difficulty: 0.9, ..Default::default() })
///     .build()?;
/// ai.spawn(CarId(3), "Blue #3", Arc::new(CarSpec::new(SpecId(1), "gt")), None)?;
/// let outputs = ai.update_all(&cars, 1.0 / 60.0)?;
/// ```
pub struct DriverControllerBuilder<M: DriverModel = DecisionModel> {
    track:   Arc<TrackGeometry>,
    config:  DriverConfig,
    global:  AiGlobalSettings,
    factory: ModelFactory<M>,
}

impl DriverControllerBuilder<DecisionModel> {
    pub fn new(track: impl Into<Arc<TrackGeometry>>) -> Self {
        Self {
            track:   track.into(),
            config:  DriverConfig::default(),
            global:  AiGlobalSettings::default(),
            factory: Box::new(|planner: &PlannerConfig| DecisionModel::new(*planner)),
        }
    }

    /// Build the track first, surfacing geometry errors as driver errors.
    pub fn from_track_builder(track: TrackBuilder) -> DriverResult<Self> {
        Ok(Self::new(track.build()?))
    }
}

impl<M: DriverModel> DriverControllerBuilder<M> {
    pub fn config(mut self, config: DriverConfig) -> Self {
        self.config = config;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    pub fn global(mut self, global: AiGlobalSettings) -> Self {
        self.global = global;
        self
    }

    /// Use a different driver model.  `factory` is called once per spawned
    /// car with the configured planner settings.
    pub fn model<N, F>(self, factory: F) -> DriverControllerBuilder<N>
    where
        N: DriverModel,
        F: Fn(&PlannerConfig) -> N + Send + Sync + 'static,
    {
        DriverControllerBuilder {
            track:   self.track,
            config:  self.config,
            global:  self.global,
            factory: Box::new(factory),
        }
    }

    /// Validate the settings and solve the racing line for the track.
    pub fn build(self) -> DriverResult<DriverController<M>> {
        self.global.validate()?;
        Ok(DriverController::new(self.config, self.track, self.global, self.factory))
    }
}
