//! Mapping raw model output to the physics loop's control record.
//!
//! Skill and difficulty only scale magnitudes; the sign of every channel is
//! whatever the model asked for.
//!
//! | Channel  | Scale                                                        |
//! |----------|--------------------------------------------------------------|
//! | throttle | `0.7 + 0.2·difficulty + 0.1·aggression`                      |
//! | brake    | `(0.85 + 0.15·discipline) · (1 − 0.1·bravery·difficulty)`    |
//! | steer    | `0.8 + 0.2·(0.5·difficulty + 0.5·discipline)`                |
//!
//! `aggression` is the mean of the driver's and the global value.  AI cars
//! always drive with ABS and traction control on.

use rc_behavior::{AiGlobalSettings, AiSkillProfile, ControlOutput};

/// Control record consumed by the vehicle dynamics.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CarInput {
    pub throttle:    f32,
    pub brake:       f32,
    pub steer:       f32,
    pub abs_enabled: bool,
    pub tcs_enabled: bool,
}

impl Default for CarInput {
    fn default() -> Self {
        Self { throttle: 0.0, brake: 0.0, steer: 0.0, abs_enabled: true, tcs_enabled: true }
    }
}

/// Blend `output` with the driver's traits and the global settings.
pub fn blend(output: &ControlOutput, skill: &AiSkillProfile, global: &AiGlobalSettings) -> CarInput {
    let difficulty = global.difficulty.clamp(0.0, 1.0);
    let aggression = 0.5 * (skill.aggression + global.aggression);

    let throttle_scale = 0.7 + 0.2 * difficulty + 0.1 * aggression;
    let brake_scale = (0.85 + 0.15 * skill.discipline) * (1.0 - 0.1 * skill.bravery * difficulty);
    let steer_scale = 0.8 + 0.2 * (0.5 * difficulty + 0.5 * skill.discipline);

    CarInput {
        throttle:    (output.throttle * throttle_scale).clamp(0.0, 1.0),
        brake:       (output.brake * brake_scale).clamp(0.0, 1.0),
        steer:       (output.steer * steer_scale).clamp(-1.0, 1.0),
        abs_enabled: true,
        tcs_enabled: true,
    }
}
