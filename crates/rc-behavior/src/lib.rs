//! `rc-behavior` — the per-car AI decision model.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                         |
//! |---------------|------------------------------------------------------------------|
//! | [`context`]   | `DriverContext<'a>`: read-only inputs for one car and tick       |
//! | [`snapshot`]  | `CarState`, `OpponentSnapshot`                                   |
//! | [`skill`]     | `AiSkillProfile`, `SkillPreset`, `AiGlobalSettings`              |
//! | [`intent`]    | `AiIntent`, `ControlOutput`, `Decision`                          |
//! | [`lookahead`] | `Lookahead`: pursuit target on the racing line                   |
//! | [`overtake`]  | `OvertakePlanner`                                                |
//! | [`defense`]   | `DefensePlanner`                                                 |
//! | [`mistake`]   | `MistakeModel`, `AiMistakeEvent`, `MistakeKind`                  |
//! | [`steering`]  | Pursuit steering law and proportional speed tracking             |
//! | [`config`]    | `PlannerConfig`, `CooldownStep`                                  |
//! | [`model`]     | `DriverModel` trait, `DecisionModel`                             |
//! | [`follower`]  | `LineFollower`: line and speed tracking only                     |
//! | [`error`]     | `BehaviorError`, `BehaviorResult<T>`                             |
//!
//! # Design notes
//!
//! A decision is a function of (the car's own state, one opponent snapshot
//! list shared by the whole tick, `dt`, the model's own cooldown/mistake
//! state, the car's random stream).  Nothing a model reads is mutated while
//! the tick's decisions run, so the controller may evaluate cars in any
//! order, or in parallel, and get identical results.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                        |
//! |---------|---------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on settings, skills, intents. |

pub mod config;
pub mod context;
pub mod defense;
pub mod error;
pub mod follower;
pub mod intent;
pub mod lookahead;
pub mod mistake;
pub mod model;
pub mod overtake;
pub mod skill;
pub mod snapshot;
pub mod steering;


pub use config::{CooldownStep, PlannerConfig};
pub use context::DriverContext;
pub use defense::DefensePlanner;
pub use error::{BehaviorError, BehaviorResult};
pub use follower::LineFollower;
pub use intent::{AiIntent, ControlOutput, Decision};
pub use lookahead::Lookahead;
pub use mistake::{AiMistakeEvent, MistakeKind, MistakeModel};
pub use model::{DecisionModel, DriverModel};
pub use overtake::OvertakePlanner;
pub use skill::{AiGlobalSettings, AiSkillProfile, SkillPreset};
pub use snapshot::{CarState, OpponentSnapshot};
