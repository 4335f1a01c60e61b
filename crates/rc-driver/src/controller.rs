//! `DriverController`: owns every AI driver in a session and runs one
//! decision per car per physics tick.

use std::collections::BTreeMap;
use std::sync::Arc;

use rc_behavior::{
    AiGlobalSettings, AiSkillProfile, CarState, Decision, DecisionModel, DriverContext, DriverModel,
    OpponentSnapshot, PlannerConfig,
};
use rc_core::{CarId, DriverRng, Tick, Vec2};
use rc_line::{CarSpec, LineCache, RacingLineSolution, SpeedProfile};
use rc_track::TrackGeometry;
use tracing::{debug, info, trace};

use crate::input::blend;
use crate::{CarInput, DebugState, DriverConfig, DriverError, DriverObserver, DriverResult, NoopObserver};

/// Builds a fresh model for each spawned car.
pub(crate) type ModelFactory<M> = Box<dyn Fn(&PlannerConfig) -> M + Send + Sync>;

// ── DriverSlot ────────────────────────────────────────────────────────────────

/// State owned by one AI car.
pub struct DriverSlot<M> {
    label:   String,
    skill:   AiSkillProfile,
    spec:    Arc<CarSpec>,
    profile: Arc<SpeedProfile>,
    model:   M,
    rng:     DriverRng,
}

impl<M: DriverModel> DriverSlot<M> {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn skill(&self) -> &AiSkillProfile {
        &self.skill
    }

    pub fn spec(&self) -> &CarSpec {
        &self.spec
    }

    pub fn profile(&self) -> &Arc<SpeedProfile> {
        &self.profile
    }

    pub fn model(&self) -> &M {
        &self.model
    }
}

/// Result of one car's decision.
#[derive(Clone, Debug)]
pub struct DriverOutput {
    pub car:      CarId,
    pub input:    CarInput,
    pub decision: Decision,
    /// Present only while debug drawing is enabled.
    pub debug:    Option<DebugState>,
}

/// Read-only data shared by every car in one evaluation pass.
struct TickEnv<'a> {
    track:     &'a TrackGeometry,
    line:      &'a RacingLineSolution,
    global:    &'a AiGlobalSettings,
    polyline:  &'a Arc<[Vec2]>,
    opponents: &'a [OpponentSnapshot],
    dt:        f32,
}

// ── DriverController ──────────────────────────────────────────────────────────

/// Session-level AI controller.
///
/// # Per-tick contract
///
/// [`update_all`](Self::update_all) takes the state of every car on track:
///
/// 1. **Snapshot**: one [`OpponentSnapshot`] per car is captured before any
///    decision.  Cars without an AI driver are flagged as players.
/// 2. **Decide** (optionally parallel with the `parallel` feature): each AI
///    car runs its own model with its own [`DriverRng`].  Cars only read the
///    shared snapshot, so evaluation order cannot change any result.
/// 3. **Blend**: raw model output is mapped to a [`CarInput`] using the
///    car's skill and the current global settings.
/// 4. **Report**: outputs come back in ascending `CarId` order and the
///    observer is called sequentially.
///
/// Racing lines and speed profiles come from a [`LineCache`] and are shared
/// between cars by `Arc`.  They are recomputed only on
/// [`set_track`](Self::set_track) or [`invalidate_cache`](Self::invalidate_cache).
pub struct DriverController<M: DriverModel = DecisionModel> {
    config:   DriverConfig,
    track:    Arc<TrackGeometry>,
    cache:    LineCache,
    line:     Arc<RacingLineSolution>,
    polyline: Arc<[Vec2]>,
    global:   AiGlobalSettings,
    drivers:  BTreeMap<CarId, DriverSlot<M>>,
    factory:  ModelFactory<M>,
    tick:     Tick,
}

impl<M: DriverModel> DriverController<M> {
    pub(crate) fn new(
        config:  DriverConfig,
        track:   Arc<TrackGeometry>,
        global:  AiGlobalSettings,
        factory: ModelFactory<M>,
    ) -> Self {
        let mut cache = LineCache::new(config.line);
        let line = cache.get_line(&track);
        let polyline = line.polyline(config.debug_polyline_stride).into();
        info!(
            track = %track.id(),
            name = track.name(),
            length = track.length(),
            seed = config.seed,
            "driver controller ready"
        );
        Self {
            config,
            track,
            cache,
            line,
            polyline,
            global,
            drivers: BTreeMap::new(),
            factory,
            tick: Tick::ZERO,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    pub fn track(&self) -> &Arc<TrackGeometry> {
        &self.track
    }

    pub fn line(&self) -> &Arc<RacingLineSolution> {
        &self.line
    }

    pub fn cache(&self) -> &LineCache {
        &self.cache
    }

    pub fn global(&self) -> &AiGlobalSettings {
        &self.global
    }

    /// Ticks completed by [`update_all`](Self::update_all).
    pub fn tick(&self) -> Tick {
        self.tick
    }

    pub fn driver(&self, car: CarId) -> Option<&DriverSlot<M>> {
        self.drivers.get(&car)
    }

    pub fn driver_count(&self) -> usize {
        self.drivers.len()
    }

    /// AI car ids in ascending order.
    pub fn cars(&self) -> impl Iterator<Item = CarId> + '_ {
        self.drivers.keys().copied()
    }

    pub fn is_ai(&self, car: CarId) -> bool {
        self.drivers.contains_key(&car)
    }

    // ── Session management ────────────────────────────────────────────────

    /// Replace the global settings.  Takes effect on the next decision.
    pub fn set_global(&mut self, global: AiGlobalSettings) -> DriverResult<()> {
        global.validate()?;
        debug!(?global, "global AI settings updated");
        self.global = global;
        Ok(())
    }

    pub fn set_debug(&mut self, enabled: bool) {
        self.global.debug_enabled = enabled;
    }

    /// Register an AI driver for `car`.
    ///
    /// Without an explicit `skill`, a profile is generated from the car's
    /// own random stream, so the same seed always yields the same field.
    pub fn spawn(
        &mut self,
        car:   CarId,
        label: impl Into<String>,
        spec:  Arc<CarSpec>,
        skill: Option<AiSkillProfile>,
    ) -> DriverResult<&AiSkillProfile> {
        if self.drivers.contains_key(&car) {
            return Err(DriverError::DuplicateCar(car));
        }
        spec.validate()?;
        let mut rng = DriverRng::new(self.config.seed, car);
        let skill = match skill {
            Some(skill) => {
                skill.validate()?;
                skill
            }
            None => AiSkillProfile::generate(&mut rng),
        };
        let profile = self.cache.get_speed_profile(&self.track, &spec);
        let model = (self.factory)(&self.config.planner);
        let label = label.into();
        info!(%car, label = %label, model = model.name(), spec = %spec.id, ?skill, "AI driver spawned");

        let slot = self
            .drivers
            .entry(car)
            .or_insert(DriverSlot { label, skill, spec, profile, model, rng });
        Ok(&slot.skill)
    }

    /// Remove `car`'s driver.
    pub fn despawn(&mut self, car: CarId) -> DriverResult<()> {
        let slot = self.drivers.remove(&car).ok_or(DriverError::UnknownCar(car))?;
        info!(%car, label = %slot.label, "AI driver removed");
        Ok(())
    }

    /// Clear `car`'s planner cooldowns and active mistake after a reset to
    /// track.  The random stream carries on where it was.
    pub fn respawn(&mut self, car: CarId) -> DriverResult<()> {
        let slot = self.drivers.get_mut(&car).ok_or(DriverError::UnknownCar(car))?;
        slot.model.reset();
        debug!(%car, "AI driver respawned");
        Ok(())
    }

    /// Switch to a new track: drops every cached solution and re-solves the
    /// line and each driver's profile.
    pub fn set_track(&mut self, track: Arc<TrackGeometry>) {
        info!(from = %self.track.id(), to = %track.id(), "track changed");
        self.track = track;
        self.invalidate_cache();
    }

    /// Drop and recompute every cached racing line and speed profile.
    pub fn invalidate_cache(&mut self) {
        self.cache.invalidate();
        self.line = self.cache.get_line(&self.track);
        self.polyline = self.line.polyline(self.config.debug_polyline_stride).into();
        for slot in self.drivers.values_mut() {
            slot.profile = self.cache.get_speed_profile(&self.track, &slot.spec);
        }
    }

    // ── Per-tick update ───────────────────────────────────────────────────

    /// Decide for a single AI car against a caller-supplied opponent list.
    ///
    /// Does not advance the controller tick.
    pub fn update(
        &mut self,
        car:       &CarState,
        opponents: &[OpponentSnapshot],
        dt:        f32,
    ) -> DriverResult<DriverOutput> {
        check_dt(dt)?;
        let slot = self.drivers.get_mut(&car.id).ok_or(DriverError::UnknownCar(car.id))?;
        let env = TickEnv {
            track: &self.track,
            line: &self.line,
            global: &self.global,
            polyline: &self.polyline,
            opponents,
            dt,
        };
        Ok(drive(slot, car, &env))
    }

    /// Run one tick for every AI car present in `cars`.
    pub fn update_all(&mut self, cars: &[CarState], dt: f32) -> DriverResult<Vec<DriverOutput>> {
        self.update_all_with(cars, dt, &mut NoopObserver)
    }

    /// [`update_all`](Self::update_all) with observer callbacks.
    ///
    /// `cars` holds the state of every car on track, AI or not.  AI drivers
    /// whose car is missing from `cars` are skipped this tick.
    pub fn update_all_with<O: DriverObserver>(
        &mut self,
        cars:     &[CarState],
        dt:       f32,
        observer: &mut O,
    ) -> DriverResult<Vec<DriverOutput>> {
        check_dt(dt)?;
        let now = self.tick;
        observer.on_tick_start(now, self.drivers.len());

        // ── Snapshot phase ────────────────────────────────────────────────
        let snapshots: Vec<OpponentSnapshot> = cars
            .iter()
            .map(|car| {
                let slot = self.drivers.get(&car.id);
                OpponentSnapshot::capture(car, &self.track, slot.is_none(), slot.map(|s| s.spec.id))
            })
            .collect();
        let states: BTreeMap<CarId, &CarState> = cars.iter().map(|c| (c.id, c)).collect();

        // ── Decision phase ────────────────────────────────────────────────
        let outputs = {
            let env = TickEnv {
                track: &self.track,
                line: &self.line,
                global: &self.global,
                polyline: &self.polyline,
                opponents: &snapshots,
                dt,
            };
            let work: Vec<(&mut DriverSlot<M>, &CarState)> = self
                .drivers
                .iter_mut()
                .filter_map(|(id, slot)| states.get(id).map(|&state| (slot, state)))
                .collect();

            #[cfg(not(feature = "parallel"))]
            {
                work.into_iter().map(|(slot, state)| drive(slot, state, &env)).collect::<Vec<_>>()
            }

            #[cfg(feature = "parallel")]
            {
                use rayon::prelude::*;

                // Collecting an indexed parallel iterator keeps CarId order.
                work.into_par_iter().map(|(slot, state)| drive(slot, state, &env)).collect::<Vec<_>>()
            }
        };

        // ── Report phase ──────────────────────────────────────────────────
        for output in &outputs {
            observer.on_decision(now, output);
        }
        observer.on_tick_end(now, outputs.len());
        trace!(tick = %now, evaluated = outputs.len(), cars = cars.len(), "AI tick done");

        self.tick = now.next();
        Ok(outputs)
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn check_dt(dt: f32) -> DriverResult<()> {
    if dt.is_finite() && dt > 0.0 {
        Ok(())
    } else {
        Err(DriverError::InvalidTimeStep(dt))
    }
}

/// One car's decision, blend and debug record.
fn drive<M: DriverModel>(slot: &mut DriverSlot<M>, car: &CarState, env: &TickEnv<'_>) -> DriverOutput {
    let ctx = DriverContext {
        track:     env.track,
        line:      env.line,
        profile:   &slot.profile,
        skill:     &slot.skill,
        global:    env.global,
        car,
        opponents: env.opponents,
        dt:        env.dt,
    };
    let decision = slot.model.decide(&ctx, &mut slot.rng);
    let input = blend(&decision.output, &slot.skill, env.global);
    let debug = env
        .global
        .debug_enabled
        .then(|| DebugState::build(car.id, &slot.label, &slot.skill, car.position, &decision, env.polyline));

    DriverOutput { car: car.id, input, decision, debug }
}
