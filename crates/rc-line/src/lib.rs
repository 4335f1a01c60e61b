//! `rc-line` — racing line, speed profile and their session cache.
//!
//! # Crate layout
//!
//! | Module            | Contents                                                  |
//! |-------------------|-----------------------------------------------------------|
//! | [`car_spec`]      | `CarSpec`, `TorquePoint`, drive/drag force model          |
//! | [`racing_line`]   | `RacingLineSolver`, `RacingLineSolution`, `LineParams`    |
//! | [`speed_profile`] | `SpeedProfileSolver`, `SpeedProfile`, three-pass solver   |
//! | [`cache`]         | `LineCache` keyed by `TrackId` and `(TrackId, SpecId)`    |
//! | [`error`]         | `LineError`, `LineResult<T>`                              |
//!
//! Solutions are immutable once built and shared through `Arc`, so every AI
//! car on a track reads the same line without copying it.
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                  |
//! |-----------|---------------------------------------------------------|
//! | `serde`   | Derives `Serialize`/`Deserialize` on params and specs.  |
//! | `fx-hash` | FxHash maps inside [`LineCache`].                       |

pub mod cache;
pub mod car_spec;
pub mod error;
pub mod racing_line;
pub mod speed_profile;


pub use cache::LineCache;
pub use car_spec::{CarSpec, TorquePoint};
pub use error::{LineError, LineResult};
pub use racing_line::{LineParams, RacingLineSample, RacingLineSolution, RacingLineSolver};
pub use speed_profile::{DEFAULT_TARGET_SPEED, SpeedProfile, SpeedProfilePoint, SpeedProfileSolver};
