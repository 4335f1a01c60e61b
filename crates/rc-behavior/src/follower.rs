//! A planner-free baseline driver.

use rc_core::RandomSource;

use crate::model::find_lookahead;
use crate::steering::{pursuit_steer, track_speed};
use crate::{AiIntent, ControlOutput, Decision, DriverContext, DriverModel, PlannerConfig};

/// Follows the racing line at profile speed.  Never overtakes, defends or
/// makes mistakes, and never draws from the random source, which makes it
/// the reference driver for ghost cars and baseline laps.
#[derive(Clone, Debug, Default)]
pub struct LineFollower {
    config: PlannerConfig,
}

impl LineFollower {
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }
}

impl DriverModel for LineFollower {
    fn decide(&mut self, ctx: &DriverContext<'_>, _rng: &mut dyn RandomSource) -> Decision {
        let lookahead = find_lookahead(ctx);
        let intent = AiIntent::FollowLine { lookahead: lookahead.position };
        let target_speed = ctx.profile.target_speed_at(lookahead.s);
        let (throttle, brake) =
            track_speed(target_speed, ctx.car.speed(), self.config.throttle_gain, self.config.brake_gain);
        let steer = pursuit_steer(ctx.car, lookahead.position, self.config.steer_gain);
        Decision {
            intent,
            base_intent: intent,
            target_speed,
            lookahead,
            mistake: None,
            output: ControlOutput { throttle, brake, steer },
        }
    }

    fn name(&self) -> &'static str {
        "line-follower"
    }
}
