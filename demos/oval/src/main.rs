//! oval — smallest end-to-end run of the racecraft AI driver.
//!
//! Puts six AI cars and one scripted "player" on a club circuit, drives
//! them with a point-mass integrator for a few laps, and prints a summary
//! of what the AI decided.  Pass a JSON file of `AiGlobalSettings` as the
//! first argument to change difficulty or aggression; set `RUST_LOG=debug`
//! to watch cache misses and mistakes.

mod track;

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;

use rc_behavior::{AiGlobalSettings, CarState};
use rc_core::{CarId, SpecId, Tick, Vec2};
use rc_driver::{CarInput, DriverControllerBuilder, DriverObserver, DriverOutput};
use rc_line::CarSpec;

use track::build_circuit;

// ── Constants ─────────────────────────────────────────────────────────────────

const AI_COUNT:   u32 = 6;
const PLAYER:     CarId = CarId(99);
const SEED:       u64 = 42;
const DT:         f32 = 1.0 / 60.0;
const SIM_SECS:   u32 = 180;
const GRID_GAP:   f32 = 12.0;

// ── Point-mass physics ────────────────────────────────────────────────────────

/// Longitudinal authority at full pedal, m/s².
const ENGINE_ACCEL: f32 = 7.0;
const BRAKE_DECEL:  f32 = 10.0;
/// Yaw rate at full lock, rad/s.
const MAX_YAW_RATE: f32 = 1.6;

fn integrate(car: &CarState, input: &CarInput, dt: f32) -> CarState {
    let accel = ENGINE_ACCEL * input.throttle - BRAKE_DECEL * input.brake;
    let speed = (car.speed() + accel * dt).max(0.0);
    let heading = car.heading + MAX_YAW_RATE * input.steer * dt;
    let forward = Vec2::from_angle(heading);
    CarState::new(car.id, car.position + forward * (speed * dt), forward * speed, heading)
}

// ── Observer ──────────────────────────────────────────────────────────────────

/// Counts the ticks each car spent under each intent.
#[derive(Default)]
struct IntentTally {
    per_car: BTreeMap<CarId, BTreeMap<&'static str, u32>>,
    mistakes: u32,
    ticks: u64,
}

impl DriverObserver for IntentTally {
    fn on_decision(&mut self, _tick: Tick, output: &DriverOutput) {
        *self
            .per_car
            .entry(output.car)
            .or_default()
            .entry(output.decision.intent.label())
            .or_default() += 1;
        if output.decision.intent.is_error() {
            self.mistakes += 1;
        }
    }

    fn on_tick_end(&mut self, _tick: Tick, _evaluated: usize) {
        self.ticks += 1;
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn load_settings() -> Result<AiGlobalSettings> {
    let Some(path) = std::env::args().nth(1) else {
        return Ok(AiGlobalSettings::default());
    };
    let file = File::open(&path).with_context(|| format!("opening {path}"))?;
    let settings = serde_json::from_reader(BufReader::new(file)).with_context(|| format!("parsing {path}"))?;
    Ok(settings)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .init();

    let global = load_settings()?;
    println!("=== oval — racecraft AI driver ===");
    println!("AI cars: {AI_COUNT}  |  Seconds: {SIM_SECS}  |  Seed: {SEED}");
    println!("Settings: {}", serde_json::to_string(&global)?);
    println!();

    // 1. Track and controller.
    let mut ai = DriverControllerBuilder::from_track_builder(build_circuit())?
        .seed(SEED)
        .global(global)
        .build()?;
    let track = Arc::clone(ai.track());
    println!(
        "Track: {} ({:.1} m, {} samples, {} corners)",
        track.name(),
        track.length(),
        track.sample_count(),
        track.corners().len()
    );
    println!("Config: {}", serde_json::to_string(ai.config())?);

    // 2. Field: two car specs, alternating down the grid.
    let saloon = Arc::new(CarSpec::new(SpecId(1), "saloon"));
    let mut gt = CarSpec::new(SpecId(2), "gt");
    gt.mass_kg = 1350.0;
    gt.tire_grip = 1.15;
    gt.drag_coefficient = 0.32;
    let gt = Arc::new(gt);

    let mut cars = Vec::with_capacity(AI_COUNT as usize + 1);
    for i in 0..AI_COUNT {
        let spec = if i % 2 == 0 { Arc::clone(&saloon) } else { Arc::clone(&gt) };
        let skill = ai.spawn(CarId(i), format!("AI #{i}"), spec, None)?;
        info!(car = i, ?skill, "grid slot filled");
        let x = 200.0 - GRID_GAP * i as f32;
        cars.push(CarState::new(CarId(i), Vec2::new(x, 0.0), Vec2::ZERO, 0.0));
    }
    // The "player" rolls down the start straight at a constant 15 m/s.
    cars.push(CarState::new(PLAYER, Vec2::new(230.0, 0.0), Vec2::new(15.0, 0.0), 0.0));

    // 3. Run.
    let mut tally = IntentTally::default();
    let mut travelled: BTreeMap<CarId, f32> = BTreeMap::new();
    let steps = SIM_SECS * 60;
    let t0 = Instant::now();
    for _ in 0..steps {
        let outputs = ai.update_all_with(&cars, DT, &mut tally)?;
        let by_car: BTreeMap<CarId, CarInput> = outputs.iter().map(|o| (o.car, o.input)).collect();
        for car in cars.iter_mut() {
            let next = match by_car.get(&car.id) {
                Some(input) => integrate(car, input, DT),
                None => CarState { position: car.position + car.velocity * DT, ..*car },
            };
            *travelled.entry(car.id).or_default() += next.position.distance(car.position);
            *car = next;
        }
    }
    let elapsed = t0.elapsed();

    // 4. Summary.
    println!();
    println!("Ran {} ticks in {:.3} s", tally.ticks, elapsed.as_secs_f64());
    println!("Mistake ticks: {}", tally.mistakes);
    println!();
    println!("{:<8} {:<6} {:>9} {:>7}  {}", "Car", "Spec", "Dist (m)", "Laps", "Intents");
    println!("{}", "-".repeat(72));
    for id in ai.cars() {
        let Some(driver) = ai.driver(id) else { continue };
        let dist = travelled.get(&id).copied().unwrap_or(0.0);
        let intents = tally
            .per_car
            .get(&id)
            .map(|m| m.iter().map(|(k, v)| format!("{k}={v}")).collect::<Vec<_>>().join(" "))
            .unwrap_or_default();
        println!(
            "{:<8} {:<6} {:>9.0} {:>7.2}  {}",
            driver.label(),
            driver.spec().name,
            dist,
            dist / track.length(),
            intents
        );
    }

    Ok(())
}
