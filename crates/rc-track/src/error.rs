//! Track-building error type.

use thiserror::Error;

/// Errors produced while building a [`TrackGeometry`](crate::TrackGeometry).
///
/// Queries on a built track never fail; all of these are build-time checks.
#[derive(Debug, Error)]
pub enum TrackError {
    #[error("a closed track needs at least 3 control points, got {got}")]
    TooFewControlPoints { got: usize },

    #[error("control points enclose no length (all coincident)")]
    ZeroLength,

    #[error("control point {index} has an invalid half-width {value}")]
    InvalidWidth { index: usize, value: f32 },

    #[error("control point {index} has a non-finite position")]
    NonFinitePosition { index: usize },
}

pub type TrackResult<T> = Result<T, TrackError>;
