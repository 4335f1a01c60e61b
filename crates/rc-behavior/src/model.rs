//! The `DriverModel` trait and the layered `DecisionModel`.

use rc_core::RandomSource;

use crate::mistake::late_apex_jitter;
use crate::steering::{pursuit_steer, track_speed};
use crate::{
    AiIntent, ControlOutput, Decision, DefensePlanner, DriverContext, Lookahead, MistakeKind,
    MistakeModel, OvertakePlanner, PlannerConfig,
};

/// Per-car driving policy.
///
/// One instance is owned by each AI car, so implementations may keep
/// per-car state (cooldowns, active mistakes) in `self`.  All randomness
/// must come from `rng`; the controller hands every car its own seeded
/// stream, which is what makes replays reproducible.
///
/// # Thread safety
///
/// With the `parallel` feature the controller evaluates cars on Rayon's
/// pool, each with exclusive access to its own model, so implementations
/// must be `Send`.
pub trait DriverModel: Send + 'static {
    /// Produce this tick's decision.
    fn decide(&mut self, ctx: &DriverContext<'_>, rng: &mut dyn RandomSource) -> Decision;

    /// Forget all per-car state (called on respawn).
    fn reset(&mut self) {}

    /// Short model name for logs.
    fn name(&self) -> &'static str;
}

/// Target for this tick, falling back to the bare centerline when the
/// racing line is empty.
pub(crate) fn find_lookahead(ctx: &DriverContext<'_>) -> Lookahead {
    let speed = ctx.car.speed();
    Lookahead::on_line(ctx.line, ctx.car.position, speed)
        .unwrap_or_else(|| Lookahead::on_track(ctx.track, ctx.car.position, speed))
}

// ── DecisionModel ─────────────────────────────────────────────────────────────

/// Full AI driver: planners, mistakes, speed tracking and pursuit steering.
///
/// # Per-tick pipeline
///
/// 1. Lookahead on the racing line.
/// 2. Arbitration: overtake, else defend, else follow the line.
/// 3. Mistake layering on the chosen intent.
/// 4. Target speed from the profile at the lookahead, proportional
///    throttle/brake, mistake overrides.
/// 5. Pursuit steering toward the final intent's target.
#[derive(Clone, Debug, Default)]
pub struct DecisionModel {
    config:   PlannerConfig,
    overtake: OvertakePlanner,
    defense:  DefensePlanner,
    mistakes: MistakeModel,
}

impl DecisionModel {
    pub fn new(config: PlannerConfig) -> Self {
        Self { config, ..Self::default() }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn overtake(&self) -> &OvertakePlanner {
        &self.overtake
    }

    pub fn defense(&self) -> &DefensePlanner {
        &self.defense
    }

    pub fn mistakes(&self) -> &MistakeModel {
        &self.mistakes
    }
}

impl DriverModel for DecisionModel {
    fn decide(&mut self, ctx: &DriverContext<'_>, rng: &mut dyn RandomSource) -> Decision {
        let lookahead = find_lookahead(ctx);

        // ── Planner arbitration ───────────────────────────────────────────
        self.overtake.advance(self.config.cooldown_step, ctx.dt);
        self.defense.advance(ctx.dt);
        let base_intent = match self.overtake.plan(ctx, &lookahead, rng) {
            Some(intent) => intent,
            None => self
                .defense
                .plan(ctx, &lookahead, rng)
                .unwrap_or(AiIntent::FollowLine { lookahead: lookahead.position }),
        };

        // ── Mistake layering ──────────────────────────────────────────────
        let mistake = if self.config.mistakes {
            self.mistakes.update(ctx.skill, ctx.dt, rng)
        } else {
            None
        };
        let intent = match &mistake {
            Some(event) => event.apply(base_intent, ctx.car),
            None => base_intent,
        };

        // ── Speed tracking & steering ─────────────────────────────────────
        let target_speed = ctx.profile.target_speed_at(lookahead.s);
        let (mut throttle, mut brake) =
            track_speed(target_speed, ctx.car.speed(), self.config.throttle_gain, self.config.brake_gain);
        let mut steer = pursuit_steer(ctx.car, intent.target(), self.config.steer_gain);

        if let Some(event) = &mistake {
            match event.kind {
                MistakeKind::BrakeLockup => {
                    brake = (brake + 0.6 * event.intensity).min(1.0);
                    throttle *= 0.5;
                }
                MistakeKind::LateApex => {
                    steer = (steer + late_apex_jitter(event, rng)).clamp(-1.0, 1.0);
                }
            }
        }

        Decision {
            intent,
            base_intent,
            target_speed,
            lookahead,
            mistake,
            output: ControlOutput { throttle, brake, steer },
        }
    }

    fn reset(&mut self) {
        self.overtake.reset();
        self.defense.reset();
        self.mistakes.reset();
    }

    fn name(&self) -> &'static str {
        "decision"
    }
}
