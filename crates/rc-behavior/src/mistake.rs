//! Stochastic driving errors layered on top of the planned intent.
//!
//! # Lifecycle
//!
//! With no event active, each decision starts one with probability
//! `(1 − discipline) × MISTAKE_RATE × dt`.  An active event first has `dt`
//! taken off its remaining time; it is cleared as soon as that reaches zero
//! or below, and otherwise perturbs the tick's target.  So an event never
//! outlives the duration it was started with.

use rc_core::RandomSource;
use tracing::debug;

use crate::{AiIntent, AiSkillProfile, CarState};

/// Mistake starts per second for a driver with zero discipline.
pub const MISTAKE_RATE: f32 = 0.2;

/// Forward overshoot per unit intensity for a brake lockup, metres.
const LOCKUP_OVERSHOOT: f32 = 10.0;

/// Sideways displacement per unit intensity for a late apex, metres.
const LATE_APEX_OFFSET: f32 = 4.0;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MistakeKind {
    BrakeLockup,
    LateApex,
}

/// One driving error in progress.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AiMistakeEvent {
    pub kind:       MistakeKind,
    /// Initial duration, seconds (0.5 to 1.2).
    pub duration:   f32,
    /// Time left, seconds.
    pub remaining:  f32,
    /// Severity (0.4 to 0.8).
    pub intensity:  f32,
    /// Model clock when the event started, seconds.
    pub started_at: f32,
    /// Side of a late-apex displacement along the car's right (±1).
    pub side:       f32,
}

impl AiMistakeEvent {
    /// Replace `intent` with the matching error intent at a perturbed target.
    pub fn apply(&self, intent: AiIntent, car: &CarState) -> AiIntent {
        let forward = car.forward();
        let target = intent.target();
        match self.kind {
            MistakeKind::BrakeLockup => AiIntent::ErrorBrakeLockup {
                target: target + forward * (LOCKUP_OVERSHOOT * self.intensity),
            },
            MistakeKind::LateApex => AiIntent::ErrorLateApex {
                target: target - forward.perp() * (LATE_APEX_OFFSET * self.intensity * self.side),
            },
        }
    }

    /// Seconds since the event began.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.duration - self.remaining
    }
}

#[derive(Clone, Debug, Default)]
pub struct MistakeModel {
    active: Option<AiMistakeEvent>,
    clock:  f32,
}

impl MistakeModel {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn active(&self) -> Option<&AiMistakeEvent> {
        self.active.as_ref()
    }

    pub fn reset(&mut self) {
        self.active = None;
        self.clock = 0.0;
    }

    /// Advance by `dt` and return the event to apply this tick, if any.
    pub fn update(&mut self, skill: &AiSkillProfile, dt: f32, rng: &mut dyn RandomSource) -> Option<AiMistakeEvent> {
        self.clock += dt;

        if let Some(event) = self.active.as_mut() {
            event.remaining -= dt;
            if event.remaining <= 0.0 {
                debug!(kind = ?event.kind, lasted = event.duration, "mistake over");
                self.active = None;
                return None;
            }
            return self.active;
        }

        let p = (1.0 - skill.discipline) * MISTAKE_RATE * dt;
        if !rng.chance(p) {
            return None;
        }
        let kind = if rng.next_f32() < 0.5 { MistakeKind::BrakeLockup } else { MistakeKind::LateApex };
        let duration = 0.5 + 0.7 * rng.next_f32();
        let intensity = 0.4 + 0.4 * rng.next_f32();
        let side = match kind {
            MistakeKind::LateApex => rng.sign(),
            MistakeKind::BrakeLockup => 0.0,
        };
        let event = AiMistakeEvent {
            kind,
            duration,
            remaining: duration,
            intensity,
            started_at: self.clock,
            side,
        };
        debug!(?kind, duration, intensity, "mistake started");
        self.active = Some(event);
        self.active
    }
}

/// Random steering jitter for a late-apex event, in `[-0.3, 0.3] × intensity`.
pub fn late_apex_jitter(event: &AiMistakeEvent, rng: &mut dyn RandomSource) -> f32 {
    rng.range(-0.3, 0.3) * event.intensity
}
