//! Overtake planner.
//!
//! Looks for the nearest AI opponent within `OVERTAKE_RANGE` that the car
//! is closing on, rolls against `skill.aggression × global.aggression`, and
//! on success moves the lookahead target sideways into a passing lane.
//! Player cars are never targeted.

use rc_core::RandomSource;
use tracing::trace;

use crate::{AiIntent, CooldownStep, DriverContext, Lookahead};

/// Cooldown set after an attempt, seconds.
pub const OVERTAKE_COOLDOWN: f32 = 2.5;

/// Search radius, metres.
pub const OVERTAKE_RANGE: f32 = 25.0;

/// Lane offset as a fraction of the half-width on the chosen side.
pub const OVERTAKE_LANE_FRACTION: f32 = 0.6;

/// Below this curvature the bend direction is read from the line's apex
/// bias instead.
const STRAIGHT_CURVATURE: f32 = 1.0e-3;

#[derive(Clone, Debug, Default)]
pub struct OvertakePlanner {
    cooldown: f32,
}

impl OvertakePlanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remaining cooldown in seconds.
    #[inline]
    pub fn cooldown(&self) -> f32 {
        self.cooldown
    }

    /// Advance the cooldown by one decision.
    pub fn advance(&mut self, step: CooldownStep, dt: f32) {
        self.cooldown = (self.cooldown - step.delta(dt)).max(0.0);
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
        let target = ctx
            .others()
            .filter(|o| !o.is_player)
            .filter_map(|o| {
                let rel = o.position - car.position;
                let dist = rel.length();
                let closing = (car.velocity - o.velocity).dot(rel) > 0.0;
                (dist <= OVERTAKE_RANGE && closing).then_some((o, dist))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(o, _)| o)?;

        let cooldown_frac = self.cooldown / OVERTAKE_COOLDOWN;
        let p = ctx.skill.aggression * ctx.global.aggression * (1.0 - cooldown_frac);
        if !rng.chance(p) {
            return None;
        }

        let inside = rng.chance(ctx.skill.bravery);
        let inside_side = inside_side(lookahead);
        let side = if inside { inside_side } else { -inside_side };
        let shift = side * OVERTAKE_LANE_FRACTION * lookahead.half_width_on(side);
        let aim = lookahead.shifted(shift);
        self.cooldown = OVERTAKE_COOLDOWN;

        trace!(car = %car.id, opponent = %target.id, inside, "overtake attempt");
        Some(if inside {
            AiIntent::OvertakeInside { target: aim, opponent: target.id }
        } else {
            AiIntent::OvertakeOutside { target: aim, opponent: target.id }
        })
    }
}

/// Sign along the right-normal of the inside of the coming bend.
fn inside_side(lookahead: &Lookahead) -> f32 {
    if lookahead.curvature.abs() > STRAIGHT_CURVATURE {
        -lookahead.curvature.signum()
    } else if lookahead.lateral_offset != 0.0 {
        lookahead.lateral_offset.signum()
    } else {
        -1.0
    }
}
