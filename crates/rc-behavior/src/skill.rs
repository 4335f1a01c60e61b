//! Driver personality and session-wide tuning.
//!
//! [`AiSkillProfile`] is fixed per car for its lifetime; [`AiGlobalSettings`]
//! is owned by the host, may change between ticks, and is read fresh on
//! every decision.

use rc_core::RandomSource;

use crate::{BehaviorError, BehaviorResult};

/// Maximum per-trait jitter applied when a profile is generated from a preset.
pub const PRESET_JITTER: f32 = 0.1;

// ── AiSkillProfile ────────────────────────────────────────────────────────────

/// Per-driver traits, each in `[0, 1]`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AiSkillProfile {
    /// Appetite for overtaking.
    pub aggression: f32,
    /// Attention to cars behind.
    pub awareness:  f32,
    /// Resistance to mistakes.
    pub discipline: f32,
    /// Preference for the inside line when passing.
    pub bravery:    f32,
}

impl AiSkillProfile {
    /// Validated constructor.
    pub fn new(aggression: f32, awareness: f32, discipline: f32, bravery: f32) -> BehaviorResult<Self> {
        let profile = Self { aggression, awareness, discipline, bravery };
        profile.validate()?;
        Ok(profile)
    }

    pub fn validate(&self) -> BehaviorResult<()> {
        for (name, value) in self.traits() {
            if !(0.0..=1.0).contains(&value) {
                return Err(BehaviorError::InvalidSkill { name, value });
            }
        }
        Ok(())
    }

    /// Pick a preset with `rng` and jitter each trait by up to
    /// ±[`PRESET_JITTER`], clamped to `[0, 1]`.
    pub fn generate(rng: &mut dyn RandomSource) -> Self {
        let idx = ((rng.next_f32() * SkillPreset::ALL.len() as f32) as usize).min(SkillPreset::ALL.len() - 1);
        let base = SkillPreset::ALL[idx].profile();
        let mut jitter = |v: f32| (v + rng.range(-PRESET_JITTER, PRESET_JITTER)).clamp(0.0, 1.0);
        Self {
            aggression: jitter(base.aggression),
            awareness:  jitter(base.awareness),
            discipline: jitter(base.discipline),
            bravery:    jitter(base.bravery),
        }
    }

    fn traits(&self) -> [(&'static str, f32); 4] {
        [
            ("aggression", self.aggression),
            ("awareness", self.awareness),
            ("discipline", self.discipline),
            ("bravery", self.bravery),
        ]
    }
}

impl Default for AiSkillProfile {
    fn default() -> Self {
        SkillPreset::Journeyman.profile()
    }
}

// ── SkillPreset ───────────────────────────────────────────────────────────────

/// Named starting points for generated drivers.
///
/// | Preset       | aggression | awareness | discipline | bravery |
/// |--------------|-----------:|----------:|-----------:|--------:|
/// | `Rookie`     | 0.30       | 0.40      | 0.40       | 0.30    |
/// | `Journeyman` | 0.50       | 0.60      | 0.60       | 0.50    |
/// | `Veteran`    | 0.45       | 0.85      | 0.85       | 0.50    |
/// | `Charger`    | 0.85       | 0.55      | 0.45       | 0.80    |
/// | `Ace`        | 0.75       | 0.90      | 0.90       | 0.75    |
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillPreset {
    Rookie,
    Journeyman,
    Veteran,
    Charger,
    Ace,
}

impl SkillPreset {
    pub const ALL: [SkillPreset; 5] = [
        SkillPreset::Rookie,
        SkillPreset::Journeyman,
        SkillPreset::Veteran,
        SkillPreset::Charger,
        SkillPreset::Ace,
    ];

    pub fn profile(self) -> AiSkillProfile {
        let (aggression, awareness, discipline, bravery) = match self {
            SkillPreset::Rookie     => (0.30, 0.40, 0.40, 0.30),
            SkillPreset::Journeyman => (0.50, 0.60, 0.60, 0.50),
            SkillPreset::Veteran    => (0.45, 0.85, 0.85, 0.50),
            SkillPreset::Charger    => (0.85, 0.55, 0.45, 0.80),
            SkillPreset::Ace        => (0.75, 0.90, 0.90, 0.75),
        };
        AiSkillProfile { aggression, awareness, discipline, bravery }
    }
}

// ── AiGlobalSettings ──────────────────────────────────────────────────────────

/// Session-wide AI tuning, typically driven by a settings UI.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AiGlobalSettings {
    pub difficulty:    f32,
    pub aggression:    f32,
    pub awareness:     f32,
    pub debug_enabled: bool,
}

impl AiGlobalSettings {
    pub fn validate(&self) -> BehaviorResult<()> {
        for (name, value) in [
            ("difficulty", self.difficulty),
            ("aggression", self.aggression),
            ("awareness", self.awareness),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(BehaviorError::InvalidSetting { name, value });
            }
        }
        Ok(())
    }
}

impl Default for AiGlobalSettings {
    fn default() -> Self {
        Self {
            difficulty:    0.7,
            aggression:    0.8,
            awareness:     0.8,
            debug_enabled: false,
        }
    }
}
