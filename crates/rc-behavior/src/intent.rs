//! Intents, control outputs and the full per-tick decision record.

use rc_core::{CarId, Vec2};

use crate::{AiMistakeEvent, Lookahead};

/// What the car is trying to do this tick.
///
/// Exactly one intent is active per tick and it is recomputed every tick;
/// only planner cooldowns and the active mistake carry over.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AiIntent {
    /// Pursue the racing-line lookahead point.
    FollowLine { lookahead: Vec2 },

    /// Pass `opponent` on the inside of the coming bend.
    OvertakeInside { target: Vec2, opponent: CarId },

    /// Pass `opponent` around the outside.
    OvertakeOutside { target: Vec2, opponent: CarId },

    /// Cover the line against a chasing `opponent`.
    DefendLine { target: Vec2, opponent: CarId },

    /// Overshooting a braking point.
    ErrorBrakeLockup { target: Vec2 },

    /// Turning in late and missing the apex.
    ErrorLateApex { target: Vec2 },
}

impl AiIntent {
    /// The point the steering law pursues.
    pub fn target(&self) -> Vec2 {
        match *self {
            AiIntent::FollowLine { lookahead } => lookahead,
            AiIntent::OvertakeInside { target, .. }
            | AiIntent::OvertakeOutside { target, .. }
            | AiIntent::DefendLine { target, .. }
            | AiIntent::ErrorBrakeLockup { target }
            | AiIntent::ErrorLateApex { target } => target,
        }
    }

    /// The car this intent reacts to, if any.
    pub fn opponent(&self) -> Option<CarId> {
        match *self {
            AiIntent::OvertakeInside { opponent, .. }
            | AiIntent::OvertakeOutside { opponent, .. }
            | AiIntent::DefendLine { opponent, .. } => Some(opponent),
            _ => None,
        }
    }

    pub fn is_overtake(&self) -> bool {
        matches!(self, AiIntent::OvertakeInside { .. } | AiIntent::OvertakeOutside { .. })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, AiIntent::ErrorBrakeLockup { .. } | AiIntent::ErrorLateApex { .. })
    }

    /// Short label for debug overlays and logs.
    pub fn label(&self) -> &'static str {
        match self {
            AiIntent::FollowLine { .. }       => "follow",
            AiIntent::OvertakeInside { .. }   => "overtake-inside",
            AiIntent::OvertakeOutside { .. }  => "overtake-outside",
            AiIntent::DefendLine { .. }       => "defend",
            AiIntent::ErrorBrakeLockup { .. } => "lockup",
            AiIntent::ErrorLateApex { .. }    => "late-apex",
        }
    }
}

/// Raw pedal and steering demand from a model.
///
/// `throttle` and `brake` are in `[0, 1]`; `steer` is in `[-1, 1]` with
/// positive meaning left.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ControlOutput {
    pub throttle: f32,
    pub brake:    f32,
    pub steer:    f32,
}

/// Everything a model decided for one car in one tick.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Decision {
    /// Final intent, after any mistake layering.
    pub intent:       AiIntent,
    /// Intent chosen by planner arbitration, before mistakes.
    pub base_intent:  AiIntent,
    /// Interpolated profile speed at the lookahead, m/s.
    pub target_speed: f32,
    pub lookahead:    Lookahead,
    /// Mistake active this tick, if any.
    pub mistake:      Option<AiMistakeEvent>,
    pub output:       ControlOutput,
}
