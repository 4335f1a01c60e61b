//! Decision-model tuning.

/// How the overtake cooldown is advanced each decision.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CooldownStep {
    /// Subtract a fixed amount per decision regardless of `dt`.
    Fixed(f32),
    /// Subtract the real time step.
    FrameDelta,
}

impl CooldownStep {
    /// Historical behaviour: one 60 Hz frame per decision.
    pub const SIXTY_HZ: CooldownStep = CooldownStep::Fixed(0.016);

    #[inline]
    pub fn delta(self, dt: f32) -> f32 {
        match self {
            CooldownStep::Fixed(step) => step,
            CooldownStep::FrameDelta => dt,
        }
    }
}

impl Default for CooldownStep {
    fn default() -> Self {
        CooldownStep::SIXTY_HZ
    }
}

/// Gains and clocks of [`DecisionModel`](crate::DecisionModel).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlannerConfig {
    pub cooldown_step: CooldownStep,
    /// Throttle per m/s of speed deficit.
    pub throttle_gain: f32,
    /// Brake per m/s of speed excess.
    pub brake_gain:    f32,
    /// Steering per unit of heading-error cross product.
    pub steer_gain:    f32,
    /// Disable to get a mistake-free driver with the same planners.
    pub mistakes:      bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            cooldown_step: CooldownStep::default(),
            throttle_gain: 0.2,
            brake_gain:    0.3,
            steer_gain:    3.0,
            mistakes:      true,
        }
    }
}
