//! `rc-driver` — the AI driver controller for `racecraft`.
//!
//! # Architecture
//!
//! ```text
//!  DriverController
//!  ├── Arc<TrackGeometry>         (rc-track)
//!  ├── LineCache                  (rc-line)   racing line + per-spec profiles
//!  ├── AiGlobalSettings           (rc-behavior)
//!  └── BTreeMap<CarId, DriverSlot>
//!        ├── M: DriverModel       (rc-behavior; DecisionModel by default)
//!        ├── DriverRng            (rc-core)   per-car stream
//!        ├── AiSkillProfile
//!        └── Arc<SpeedProfile>
//! ```
//!
//! Each tick the host passes every car's state; the controller returns one
//! [`DriverOutput`] per AI car with a blended [`CarInput`] and, when
//! enabled, a [`DebugState`] for the overlay.
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                  |
//! |------------|---------------------------------------------------------|
//! | `parallel` | Evaluate cars on Rayon's pool (same results).           |
//! | `fx-hash`  | FxHash maps in the line cache.                          |
//! | `serde`    | `Serialize`/`Deserialize` on `DriverConfig`, `CarInput`.|

pub mod builder;
pub mod config;
pub mod controller;
pub mod debug;
pub mod error;
pub mod input;
pub mod observer;

#[cfg(test)]
mod tests;

pub use builder::DriverControllerBuilder;
pub use config::DriverConfig;
pub use controller::{DriverController, DriverOutput, DriverSlot};
pub use debug::{DebugState, DrawCommand, Rgba};
pub use error::{DriverError, DriverResult};
pub use input::{blend, CarInput};
pub use observer::{DriverObserver, NoopObserver};
