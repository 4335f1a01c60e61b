//! Integration tests for rc-driver.
//!
//! Cars run on a stadium oval whose first straight lies on the x axis from
//! (0, 0) to (300, 0).  A toy kinematic integrator closes the loop so that
//! multi-tick tests exercise real feedback between outputs and states.

#[cfg(test)]
mod helpers {
    use std::sync::Arc;

    use rc_behavior::CarState;
    use rc_core::{CarId, SpecId, TrackId, Vec2};
    use rc_line::CarSpec;
    use rc_track::{PathTracer, TrackBuilder, TrackGeometry};

    use crate::{CarInput, DriverController, DriverControllerBuilder};

    pub const DT: f32 = 1.0 / 60.0;

    pub fn stadium(id: u32) -> TrackGeometry {
        let mut p = PathTracer::new(Vec2::ZERO, 0.0, 6.0, 5.0);
        p.straight(300.0).arc(50.0, 180.0).straight(300.0).arc(50.0, 180.0);
        let mut b = TrackBuilder::new(TrackId(id), "stadium");
        b.add_control_points(p.finish());
        b.build().unwrap()
    }

    pub fn spec(id: u32) -> Arc<CarSpec> {
        Arc::new(CarSpec::new(SpecId(id), "test"))
    }

    pub fn controller(seed: u64) -> DriverController {
        DriverControllerBuilder::new(stadium(1)).seed(seed).build().unwrap()
    }

    /// Car `id` on the first straight at `x`, heading +x at `vx`.
    pub fn car(id: u32, x: f32, vx: f32) -> CarState {
        CarState::new(CarId(id), Vec2::new(x, 0.0), Vec2::new(vx, 0.0), 0.0)
    }

    /// `n` cars spaced 15 m apart, all at 20 m/s.
    pub fn grid(n: u32) -> Vec<CarState> {
        (0..n).map(|i| car(i, 150.0 - 15.0 * i as f32, 20.0)).collect()
    }

    /// Point-mass integrator: throttle/brake change speed, steer turns the
    /// heading, velocity follows the heading.
    pub fn step(car: &CarState, input: &CarInput, dt: f32) -> CarState {
        let speed = (car.speed() + (6.0 * input.throttle - 9.0 * input.brake) * dt).max(0.0);
        let heading = car.heading + 1.5 * input.steer * dt;
        let forward = Vec2::from_angle(heading);
        CarState::new(car.id, car.position + forward * (speed * dt), forward * speed, heading)
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use rc_behavior::{AiGlobalSettings, BehaviorError};
    use rc_core::TrackId;
    use rc_track::{TrackBuilder, TrackError};

    use super::helpers::*;
    use crate::{DriverControllerBuilder, DriverError};

    #[test]
    fn builds_with_defaults() {
        let ai = controller(1);
        assert_eq!(ai.driver_count(), 0);
        assert_eq!(ai.tick().0, 0);
        assert_eq!(ai.line().track_id(), TrackId(1));
        assert!(!ai.line().is_empty());
        assert_eq!(ai.cache().line_count(), 1);
        assert_eq!(ai.cache().profile_count(), 0);
    }

    #[test]
    fn invalid_global_settings_rejected() {
        let global = AiGlobalSettings { difficulty: 1.5, ..Default::default() };
        let err = DriverControllerBuilder::new(stadium(1)).global(global).build().err().unwrap();
        assert!(matches!(
            err,
            DriverError::Behavior(BehaviorError::InvalidSetting { name: "difficulty", .. })
        ));
    }

    #[test]
    fn track_errors_surface() {
        let err = DriverControllerBuilder::from_track_builder(TrackBuilder::new(TrackId(9), "empty"))
            .err()
            .unwrap();
        assert!(matches!(err, DriverError::Track(TrackError::TooFewControlPoints { got: 0 })));
    }

    #[test]
    fn set_global_validates() {
        let mut ai = controller(1);
        let bad = AiGlobalSettings { awareness: -0.1, ..Default::default() };
        assert!(ai.set_global(bad).is_err());
        assert_eq!(*ai.global(), AiGlobalSettings::default());

        let good = AiGlobalSettings { difficulty: 0.2, ..Default::default() };
        ai.set_global(good).unwrap();
        assert_eq!(ai.global().difficulty, 0.2);
    }
}

// ── Spawning ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod spawn {
    use std::sync::Arc;

    use rc_behavior::{AiSkillProfile, SkillPreset};
    use rc_core::{CarId, SpecId};
    use rc_line::{CarSpec, LineError};

    use super::helpers::*;
    use crate::DriverError;

    #[test]
    fn duplicate_car_rejected() {
        let mut ai = controller(1);
        ai.spawn(CarId(1), "a", spec(1), None).unwrap();
        let err = ai.spawn(CarId(1), "b", spec(1), None).unwrap_err();
        assert!(matches!(err, DriverError::DuplicateCar(CarId(1))));
        assert_eq!(ai.driver(CarId(1)).unwrap().label(), "a");
    }

    #[test]
    fn invalid_spec_rejected() {
        let mut ai = controller(1);
        let mut bad = CarSpec::new(SpecId(2), "brick");
        bad.mass_kg = 0.0;
        let err = ai.spawn(CarId(1), "a", Arc::new(bad), None).unwrap_err();
        assert!(matches!(err, DriverError::Line(LineError::InvalidCarSpec { field: "mass_kg", .. })));
        assert_eq!(ai.driver_count(), 0);
    }

    #[test]
    fn invalid_skill_rejected() {
        let mut ai = controller(1);
        let skill = AiSkillProfile { bravery: 2.0, ..Default::default() };
        assert!(matches!(
            ai.spawn(CarId(1), "a", spec(1), Some(skill)),
            Err(DriverError::Behavior(_))
        ));
    }

    #[test]
    fn explicit_skill_is_kept() {
        let mut ai = controller(1);
        let skill = SkillPreset::Ace.profile();
        assert_eq!(*ai.spawn(CarId(4), "ace", spec(1), Some(skill)).unwrap(), skill);
        assert_eq!(*ai.driver(CarId(4)).unwrap().skill(), skill);
    }

    #[test]
    fn generated_skills_follow_the_seed() {
        let mut a = controller(99);
        let mut b = controller(99);
        for id in 0..6 {
            let sa = *a.spawn(CarId(id), "a", spec(1), None).unwrap();
            let sb = *b.spawn(CarId(id), "b", spec(1), None).unwrap();
            assert_eq!(sa, sb);
            assert!(sa.validate().is_ok());
        }
        let mut c = controller(100);
        let differs = (0..6).any(|id| {
            let sc = *c.spawn(CarId(id), "c", spec(1), None).unwrap();
            sc != *a.driver(CarId(id)).unwrap().skill()
        });
        assert!(differs);
    }

    #[test]
    fn profiles_shared_per_spec() {
        let mut ai = controller(1);
        ai.spawn(CarId(1), "a", spec(1), None).unwrap();
        ai.spawn(CarId(2), "b", spec(1), None).unwrap();
        ai.spawn(CarId(3), "c", spec(2), None).unwrap();
        let p1 = ai.driver(CarId(1)).unwrap().profile();
        let p2 = ai.driver(CarId(2)).unwrap().profile();
        let p3 = ai.driver(CarId(3)).unwrap().profile();
        assert!(Arc::ptr_eq(p1, p2));
        assert!(!Arc::ptr_eq(p1, p3));
        assert_eq!(ai.cache().profile_count(), 2);
    }

    #[test]
    fn despawn_removes_driver() {
        let mut ai = controller(1);
        ai.spawn(CarId(1), "a", spec(1), None).unwrap();
        ai.despawn(CarId(1)).unwrap();
        assert!(!ai.is_ai(CarId(1)));
        assert!(matches!(ai.despawn(CarId(1)), Err(DriverError::UnknownCar(CarId(1)))));
    }

    #[test]
    fn track_change_resolves_line_and_profiles() {
        let mut ai = controller(1);
        ai.spawn(CarId(1), "a", spec(1), None).unwrap();
        let old = Arc::clone(ai.driver(CarId(1)).unwrap().profile());

        ai.set_track(Arc::new(stadium(2)));
        assert_eq!(ai.line().track_id().0, 2);
        let new = ai.driver(CarId(1)).unwrap().profile();
        assert_eq!(new.track_id().0, 2);
        assert!(!Arc::ptr_eq(&old, new));
        assert_eq!(ai.cache().line_count(), 1);
        assert_eq!(ai.cache().profile_count(), 1);
    }
}

// ── Per-tick update ───────────────────────────────────────────────────────────

#[cfg(test)]
mod update {
    use rc_behavior::AiSkillProfile;
    use rc_core::CarId;

    use super::helpers::*;
    use crate::DriverError;

    #[test]
    fn unknown_car_errors() {
        let mut ai = controller(1);
        let err = ai.update(&car(5, 0.0, 10.0), &[], DT).unwrap_err();
        assert!(matches!(err, DriverError::UnknownCar(CarId(5))));
    }

    #[test]
    fn bad_time_step_rejected() {
        let mut ai = controller(1);
        ai.spawn(CarId(0), "a", spec(1), None).unwrap();
        for dt in [0.0, -DT, f32::NAN, f32::INFINITY] {
            assert!(matches!(
                ai.update_all(&grid(1), dt),
                Err(DriverError::InvalidTimeStep(_))
            ));
        }
        assert_eq!(ai.tick().0, 0);
    }

    #[test]
    fn outputs_in_car_order_and_players_skipped() {
        let mut ai = controller(1);
        for id in [3, 0, 2] {
            ai.spawn(CarId(id), "ai", spec(1), None).unwrap();
        }
        // Car 1 is a player; AI car 3 is not on track this tick.
        let cars = grid(3);
        let outputs = ai.update_all(&cars, DT).unwrap();
        let ids: Vec<CarId> = outputs.iter().map(|o| o.car).collect();
        assert_eq!(ids, vec![CarId(0), CarId(2)]);
        assert_eq!(ai.tick().0, 1);
    }

    #[test]
    fn slow_car_on_straight_accelerates() {
        let mut ai = controller(1);
        let steady = AiSkillProfile { discipline: 1.0, ..Default::default() };
        ai.spawn(CarId(0), "a", spec(1), Some(steady)).unwrap();
        let out = ai.update(&car(0, 50.0, 5.0), &[], DT).unwrap();
        assert!(out.input.throttle > 0.0);
        assert_eq!(out.input.brake, 0.0);
        assert!(out.decision.target_speed > 5.0);
        assert!(out.input.abs_enabled && out.input.tcs_enabled);
    }

    #[test]
    fn inputs_stay_in_range_over_a_lap() {
        let mut ai = controller(3);
        for id in 0..4 {
            ai.spawn(CarId(id), "ai", spec(1), None).unwrap();
        }
        let mut cars = grid(4);
        for _ in 0..1200 {
            let outputs = ai.update_all(&cars, DT).unwrap();
            for (state, out) in cars.iter_mut().zip(&outputs) {
                let i = out.input;
                assert!((0.0..=1.0).contains(&i.throttle));
                assert!((0.0..=1.0).contains(&i.brake));
                assert!((-1.0..=1.0).contains(&i.steer));
                *state = step(state, &i, DT);
            }
        }
        assert_eq!(ai.tick().0, 1200);
    }
}

// ── Determinism ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod determinism {
    use rc_core::CarId;

    use super::helpers::*;
    use crate::{CarInput, DriverController};

    fn run(seed: u64, ticks: usize) -> Vec<Vec<CarInput>> {
        let mut ai: DriverController = controller(seed);
        for id in 0..5 {
            ai.spawn(CarId(id), "ai", spec(1 + id % 2), None).unwrap();
        }
        let mut cars = grid(5);
        let mut log = Vec::with_capacity(ticks);
        for _ in 0..ticks {
            let outputs = ai.update_all(&cars, DT).unwrap();
            let inputs: Vec<CarInput> = outputs.iter().map(|o| o.input).collect();
            for (state, input) in cars.iter_mut().zip(&inputs) {
                *state = step(state, input, DT);
            }
            log.push(inputs);
        }
        log
    }

    fn bits(i: &CarInput) -> [u32; 3] {
        [i.throttle.to_bits(), i.brake.to_bits(), i.steer.to_bits()]
    }

    #[test]
    fn same_seed_replays_bit_for_bit() {
        let a = run(2024, 900);
        let b = run(2024, 900);
        assert_eq!(a.len(), b.len());
        for (ta, tb) in a.iter().zip(&b) {
            let ba: Vec<_> = ta.iter().map(bits).collect();
            let bb: Vec<_> = tb.iter().map(bits).collect();
            assert_eq!(ba, bb);
        }
    }

    #[test]
    fn spawn_order_does_not_matter() {
        let mut a = controller(5);
        let mut b = controller(5);
        for id in 0..4 {
            a.spawn(CarId(id), "ai", spec(1), None).unwrap();
        }
        for id in (0..4).rev() {
            b.spawn(CarId(id), "ai", spec(1), None).unwrap();
        }
        let cars = grid(4);
        for _ in 0..120 {
            let oa = a.update_all(&cars, DT).unwrap();
            let ob = b.update_all(&cars, DT).unwrap();
            let ba: Vec<_> = oa.iter().map(|o| bits(&o.input)).collect();
            let bb: Vec<_> = ob.iter().map(|o| bits(&o.input)).collect();
            assert_eq!(ba, bb);
        }
    }
}

// ── Input blending ────────────────────────────────────────────────────────────

#[cfg(test)]
mod blending {
    use rc_behavior::{AiGlobalSettings, AiSkillProfile, ControlOutput, SkillPreset};

    use crate::blend;

    #[test]
    fn sign_is_preserved() {
        let skill = SkillPreset::Rookie.profile();
        let global = AiGlobalSettings::default();
        let left = blend(&ControlOutput { throttle: 0.0, brake: 0.0, steer: 0.6 }, &skill, &global);
        let right = blend(&ControlOutput { throttle: 0.0, brake: 0.0, steer: -0.6 }, &skill, &global);
        assert!(left.steer > 0.0);
        assert!(right.steer < 0.0);
        assert_eq!(left.steer, -right.steer);
    }

    #[test]
    fn full_inputs_stay_clamped() {
        let skill = AiSkillProfile { aggression: 1.0, awareness: 1.0, discipline: 1.0, bravery: 0.0 };
        let global = AiGlobalSettings { difficulty: 1.0, aggression: 1.0, awareness: 1.0, debug_enabled: false };
        let out = blend(&ControlOutput { throttle: 1.0, brake: 1.0, steer: -1.0 }, &skill, &global);
        assert!((out.throttle - 1.0).abs() < 1e-6);
        assert!((out.brake - 1.0).abs() < 1e-6);
        assert!((out.steer + 1.0).abs() < 1e-6);
        assert!(out.abs_enabled && out.tcs_enabled);
    }

    #[test]
    fn difficulty_scales_magnitudes() {
        let skill = SkillPreset::Journeyman.profile();
        let raw = ControlOutput { throttle: 0.8, brake: 0.0, steer: 0.5 };
        let easy = blend(&raw, &skill, &AiGlobalSettings { difficulty: 0.0, ..Default::default() });
        let hard = blend(&raw, &skill, &AiGlobalSettings { difficulty: 1.0, ..Default::default() });
        assert!(hard.throttle > easy.throttle);
        assert!(hard.steer > easy.steer);
        assert!(easy.throttle < raw.throttle);
    }

    #[test]
    fn brave_drivers_brake_less_at_high_difficulty() {
        let global = AiGlobalSettings { difficulty: 1.0, ..Default::default() };
        let raw = ControlOutput { throttle: 0.0, brake: 0.5, steer: 0.0 };
        let timid = AiSkillProfile { bravery: 0.0, ..Default::default() };
        let brave = AiSkillProfile { bravery: 1.0, ..Default::default() };
        assert!(blend(&raw, &brave, &global).brake < blend(&raw, &timid, &global).brake);
    }
}

// ── Debug state ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod debug {
    use std::sync::Arc;

    use rc_core::CarId;

    use super::helpers::*;
    use crate::DrawCommand;

    #[test]
    fn absent_unless_enabled() {
        let mut ai = controller(1);
        ai.spawn(CarId(0), "a", spec(1), None).unwrap();
        let outputs = ai.update_all(&grid(1), DT).unwrap();
        assert!(outputs[0].debug.is_none());
    }

    #[test]
    fn overlay_shares_the_line_polyline() {
        let mut ai = controller(1);
        ai.spawn(CarId(0), "Red #0", spec(1), None).unwrap();
        ai.spawn(CarId(1), "Blue #1", spec(1), None).unwrap();
        ai.set_debug(true);
        let outputs = ai.update_all(&grid(2), DT).unwrap();

        let polylines: Vec<&Arc<_>> = outputs
            .iter()
            .map(|o| {
                let debug = o.debug.as_ref().unwrap();
                assert_eq!(debug.car, o.car);
                assert_eq!(debug.intent, o.decision.intent.label());
                match &debug.commands[0] {
                    DrawCommand::Polyline { points, closed, .. } => {
                        assert!(*closed);
                        points
                    }
                    other => panic!("expected polyline first, got {other:?}"),
                }
            })
            .collect();
        assert!(Arc::ptr_eq(polylines[0], polylines[1]));

        let stride = ai.config().debug_polyline_stride;
        assert_eq!(polylines[0].len(), ai.line().len().div_ceil(stride));

        let label = outputs[0].debug.as_ref().unwrap().commands.iter().find_map(|c| match c {
            DrawCommand::Label { text, .. } => Some(text.clone()),
            _ => None,
        });
        assert!(label.unwrap().starts_with("Red #0"));
    }
}

// ── Custom models & respawn ───────────────────────────────────────────────────

#[cfg(test)]
mod models {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use rc_behavior::{
        AiIntent, ControlOutput, Decision, DriverContext, DriverModel, LineFollower, Lookahead,
    };
    use rc_core::{CarId, RandomSource};

    use super::helpers::*;
    use crate::{DriverControllerBuilder, DriverError};

    /// Coasts straight ahead and counts resets.
    struct Coaster {
        resets: Arc<AtomicUsize>,
    }

    impl DriverModel for Coaster {
        fn decide(&mut self, ctx: &DriverContext<'_>, _rng: &mut dyn RandomSource) -> Decision {
            let lookahead = Lookahead::on_track(ctx.track, ctx.car.position, ctx.car.speed());
            let intent = AiIntent::FollowLine { lookahead: lookahead.position };
            Decision {
                intent,
                base_intent: intent,
                target_speed: 0.0,
                lookahead,
                mistake: None,
                output: ControlOutput::default(),
            }
        }

        fn reset(&mut self) {
            self.resets.fetch_add(1, Ordering::SeqCst);
        }

        fn name(&self) -> &'static str {
            "coaster"
        }
    }

    #[test]
    fn respawn_resets_only_that_model() {
        let resets = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&resets);
        let mut ai = DriverControllerBuilder::new(stadium(1))
            .model(move |_| Coaster { resets: Arc::clone(&counter) })
            .build()
            .unwrap();
        ai.spawn(CarId(0), "a", spec(1), None).unwrap();
        ai.spawn(CarId(1), "b", spec(1), None).unwrap();

        ai.respawn(CarId(1)).unwrap();
        assert_eq!(resets.load(Ordering::SeqCst), 1);
        assert!(matches!(ai.respawn(CarId(7)), Err(DriverError::UnknownCar(CarId(7)))));

        let outputs = ai.update_all(&grid(2), DT).unwrap();
        assert!(outputs.iter().all(|o| o.input.throttle == 0.0 && o.input.brake == 0.0));
        assert_eq!(ai.driver(CarId(0)).unwrap().model().name(), "coaster");
    }

    #[test]
    fn line_follower_only_follows() {
        let mut ai = DriverControllerBuilder::new(stadium(1))
            .model(|planner| LineFollower::new(*planner))
            .build()
            .unwrap();
        for id in 0..4 {
            ai.spawn(CarId(id), "ghost", spec(1), None).unwrap();
        }
        let mut cars = grid(4);
        for _ in 0..300 {
            let outputs = ai.update_all(&cars, DT).unwrap();
            for (state, out) in cars.iter_mut().zip(&outputs) {
                assert!(matches!(out.decision.intent, AiIntent::FollowLine { .. }));
                *state = step(state, &out.input, DT);
            }
        }
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer {
    use rc_core::{CarId, Tick};

    use super::helpers::*;
    use crate::{DriverObserver, DriverOutput};

    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl DriverObserver for Recorder {
        fn on_tick_start(&mut self, tick: Tick, drivers: usize) {
            self.events.push(format!("start {} {drivers}", tick.0));
        }

        fn on_decision(&mut self, tick: Tick, output: &DriverOutput) {
            self.events.push(format!("decide {} {}", tick.0, output.car.0));
        }

        fn on_tick_end(&mut self, tick: Tick, evaluated: usize) {
            self.events.push(format!("end {} {evaluated}", tick.0));
        }
    }

    #[test]
    fn hooks_fire_in_order() {
        let mut ai = controller(1);
        ai.spawn(CarId(2), "b", spec(1), None).unwrap();
        ai.spawn(CarId(0), "a", spec(1), None).unwrap();
        let cars = grid(3);
        let mut rec = Recorder::default();
        ai.update_all_with(&cars, DT, &mut rec).unwrap();
        ai.update_all_with(&cars, DT, &mut rec).unwrap();
        assert_eq!(
            rec.events,
            vec![
                "start 0 2", "decide 0 0", "decide 0 2", "end 0 2",
                "start 1 2", "decide 1 0", "decide 1 2", "end 1 2",
            ]
        );
    }
}
