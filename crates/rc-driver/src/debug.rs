//! Debug overlay data for a UI layer.
//!
//! Built only while `AiGlobalSettings::debug_enabled` is set.  The racing
//! line polyline is decimated once per track and shared between every car's
//! overlay.

use std::sync::Arc;

use rc_behavior::{AiSkillProfile, Decision};
use rc_core::{CarId, Vec2};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgba(pub u8, pub u8, pub u8, pub u8);

impl Rgba {
    pub const LINE:      Rgba = Rgba(40, 200, 90, 200);
    pub const LOOKAHEAD: Rgba = Rgba(250, 210, 40, 255);
    pub const TARGET:    Rgba = Rgba(230, 60, 50, 255);
    pub const TEXT:      Rgba = Rgba(255, 255, 255, 255);
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Polyline { points: Arc<[Vec2]>, color: Rgba, closed: bool },
    Point { position: Vec2, radius: f32, color: Rgba },
    Label { position: Vec2, text: String, color: Rgba },
}

/// Per-car debug record.
#[derive(Clone, Debug, PartialEq)]
pub struct DebugState {
    pub car:          CarId,
    pub label:        String,
    pub skill:        AiSkillProfile,
    pub intent:       &'static str,
    pub target_speed: f32,
    pub commands:     Vec<DrawCommand>,
}

/// Height of the text label above the car, metres.
const LABEL_RISE: f32 = 3.0;

impl DebugState {
    pub(crate) fn build(
        car:      CarId,
        label:    &str,
        skill:    &AiSkillProfile,
        position: Vec2,
        decision: &Decision,
        polyline: &Arc<[Vec2]>,
    ) -> Self {
        let mut commands = Vec::with_capacity(4);
        commands.push(DrawCommand::Polyline { points: Arc::clone(polyline), color: Rgba::LINE, closed: true });
        commands.push(DrawCommand::Point { position: decision.lookahead.position, radius: 0.75, color: Rgba::LOOKAHEAD });
        let target = decision.intent.target();
        if target != decision.lookahead.position {
            commands.push(DrawCommand::Point { position: target, radius: 0.75, color: Rgba::TARGET });
        }
        commands.push(DrawCommand::Label {
            position: position + Vec2::Y * LABEL_RISE,
            text:     format!("{label} {} {:.1} m/s", decision.intent.label(), decision.target_speed),
            color:    Rgba::TEXT,
        });
        Self {
            car,
            label: label.to_owned(),
            skill: *skill,
            intent: decision.intent.label(),
            target_speed: decision.target_speed,
            commands,
        }
    }
}
