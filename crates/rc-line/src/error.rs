use rc_core::SpecId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LineError {
    #[error("car spec {spec}: `{field}` must be positive and finite, got {value}")]
    InvalidCarSpec {
        spec:  SpecId,
        field: &'static str,
        value: f32,
    },

    #[error("car spec {0}: torque curve is empty")]
    EmptyTorqueCurve(SpecId),
}

pub type LineResult<T> = Result<T, LineError>;
