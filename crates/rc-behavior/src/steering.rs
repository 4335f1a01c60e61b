//! Pursuit steering and proportional speed tracking.

use rc_core::Vec2;

use crate::CarState;

/// Steering toward `target`: `clamp(gain × forward.perp_dot(dir), -1, 1)`.
///
/// A proportional heading-error law, positive when the target is to the
/// left.  A target on top of the car gives zero.
pub fn pursuit_steer(car: &CarState, target: Vec2, gain: f32) -> f32 {
    match (target - car.position).try_normalize() {
        Some(dir) => (gain * car.forward().perp_dot(dir)).clamp(-1.0, 1.0),
        None => 0.0,
    }
}

/// `(throttle, brake)` from the speed error, each clamped to `[0, 1]`.
/// At most one of the two is non-zero.
pub fn track_speed(target_speed: f32, speed: f32, throttle_gain: f32, brake_gain: f32) -> (f32, f32) {
    let err = target_speed - speed;
    let throttle = (throttle_gain * err).clamp(0.0, 1.0);
    let brake = (-brake_gain * err).clamp(0.0, 1.0);
    (throttle, brake)
}
