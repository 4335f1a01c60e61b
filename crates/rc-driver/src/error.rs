use rc_behavior::BehaviorError;
use rc_core::CarId;
use rc_line::LineError;
use rc_track::TrackError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("no AI driver registered for {0}")]
    UnknownCar(CarId),

    #[error("{0} already has an AI driver")]
    DuplicateCar(CarId),

    #[error("time step must be positive and finite, got {0}")]
    InvalidTimeStep(f32),

    #[error("behavior error: {0}")]
    Behavior(#[from] BehaviorError),

    #[error("track error: {0}")]
    Track(#[from] TrackError),

    #[error("car spec error: {0}")]
    Line(#[from] LineError),
}

pub type DriverResult<T> = Result<T, DriverError>;
