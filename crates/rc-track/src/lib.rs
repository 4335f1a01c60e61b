//! `rc-track` — closed-loop track geometry.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                      |
//! |----------------|---------------------------------------------------------------|
//! | [`builder`]    | `TrackBuilder`, `ControlPoint`, `CornerDef`, `SectorDef`       |
//! | [`geometry`]   | `TrackGeometry`, `TrackSample`, `Surface`, `sample_at`         |
//! | [`ranges`]     | `SRange` (wrapping arc-length span), `Corner`, `Sector`        |
//! | [`path`]       | `PathTracer`: control points from straights and arcs           |
//! | [`projection`] | `Projection` and the three-phase nearest-point search          |
//! | [`error`]      | `TrackError`, `TrackResult<T>`                                 |
//!
//! # Arc length
//!
//! Every query is phrased in arc length `s` along the centerline, measured
//! from the first control point and wrapping modulo the loop length `L`.
//! Samples are dense (a fixed number of spline steps per control segment),
//! approximately but not exactly equidistant.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod builder;
pub mod error;
pub mod geometry;
pub mod path;
pub mod projection;
pub mod ranges;


pub use builder::{ControlPoint, CornerDef, SectorDef, TrackBuilder};
pub use error::{TrackError, TrackResult};
pub use geometry::{Surface, TrackGeometry, TrackSample};
pub use path::PathTracer;
pub use projection::Projection;
pub use ranges::{Corner, SRange, Sector, TurnDirection};
