//! `rc-core` — foundational types for the `racecraft` AI driver subsystem.
//!
//! This crate is a dependency of every other `rc-*` crate.  It has no `rc-*`
//! dependencies and minimal external ones (`rand` and `glam`, plus optional
//! `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                   |
//! |-------------|------------------------------------------------------------|
//! | [`ids`]     | `CarId`, `TrackId`, `SpecId`                               |
//! | [`time`]    | `Tick` counter                                             |
//! | [`rng`]     | `RandomSource` trait, `DriverRng` (per-car), `SequenceRng` |
//!
//! World-space quantities use [`glam::Vec2`], re-exported as [`Vec2`]: metres,
//! x to the right, y up, angles counter-clockwise from +x.  "Right" of a
//! heading is `-heading.perp()`.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |
//! |         | Also turns on `glam/serde` for `Vec2`.                     |

pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use ids::{CarId, SpecId, TrackId};
pub use rng::{DriverRng, RandomSource, SequenceRng};
pub use time::Tick;
pub use glam::Vec2;
