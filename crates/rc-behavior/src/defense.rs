//! Defense planner.
//!
//! Watches for the nearest car behind within `DEFENSE_RANGE` closing at
//! `DEFENSE_MIN_CLOSING` m/s or more, and covers a randomly chosen side.
//! Drivers with low effective awareness only notice some of the time.

use rc_core::RandomSource;
use tracing::trace;

use crate::{AiIntent, DriverContext, Lookahead};

/// Search radius behind the car, metres.
pub const DEFENSE_RANGE: f32 = 12.0;

/// Minimum closing speed of the chaser, m/s.
pub const DEFENSE_MIN_CLOSING: f32 = 2.0;

/// Effective awareness below which detection becomes a dice roll.
pub const LOW_AWARENESS: f32 = 0.5;

/// Block offset as a fraction of the half-width on the chosen side; the
/// full half-width puts the target on that edge.
pub const DEFENSE_LANE_FRACTION: f32 = 1.0;

#[derive(Clone, Debug, Default)]
pub struct DefensePlanner {
    cooldown: f32,
}

impl DefensePlanner {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn cooldown(&self) -> f32 {
        self.cooldown
    }

    pub fn advance(&mut self, dt: f32) {
        self.cooldown = (self.cooldown - dt).max(0.0);
    }

    pub fn reset(&mut self) {
        self.cooldown = 0.0;
    }

    pub fn plan(
        &mut self,
        ctx:       &DriverContext<'_>,
        lookahead: &Lookahead,
        rng:       &mut dyn RandomSource,
    ) -> Option<AiIntent> {
        if self.cooldown > 0.0 {
            return None;
        }
        let car = ctx.car;
        let forward = car.forward();
        let chaser = ctx
            .others()
            .filter_map(|o| {
                let rel = o.position - car.position;
                let dist = rel.length();
                if dist > DEFENSE_RANGE || rel.dot(forward) >= 0.0 {
                    return None;
                }
                // Component of the chaser's relative velocity toward us.
                let toward = (-rel).try_normalize()?;
                let closing = (o.velocity - car.velocity).dot(toward);
                (closing >= DEFENSE_MIN_CLOSING).then_some((o, dist))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(o, _)| o)?;

        let awareness = ctx.skill.awareness * ctx.global.awareness;
        if awareness < LOW_AWARENESS && !rng.chance(awareness / LOW_AWARENESS) {
            return None;
        }

        let side = rng.sign();
        let aim = lookahead.shifted(side * DEFENSE_LANE_FRACTION * lookahead.half_width_on(side));
        self.cooldown = 1.5 - 0.5 * ctx.skill.discipline;

        trace!(car = %car.id, chaser = %chaser.id, side, "defending");
        Some(AiIntent::DefendLine { target: aim, opponent: chaser.id })
    }
}
