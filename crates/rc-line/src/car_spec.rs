//! Car performance envelope consumed by the speed-profile solver.
//!
//! The model is deliberately coarse: a torque curve reduced to its peak
//! torque and peak power, an ideal gearbox, a single tyre-grip coefficient,
//! quadratic aero drag and a constant maximum braking deceleration.

use rc_core::SpecId;

use crate::{LineError, LineResult};

/// Standard gravity, m/s².
pub const GRAVITY: f32 = 9.81;

/// Sea-level air density, kg/m³.
pub const AIR_DENSITY: f32 = 1.225;

/// Below this speed the power-limited force is evaluated at this speed
/// instead, so standing starts stay finite.
const MIN_POWER_SPEED: f32 = 1.0;

/// One point of an engine torque curve.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TorquePoint {
    pub rpm:       f32,
    pub torque_nm: f32,
}

impl TorquePoint {
    pub const fn new(rpm: f32, torque_nm: f32) -> Self {
        Self { rpm, torque_nm }
    }

    /// Power at this point in watts.
    #[inline]
    pub fn power_w(&self) -> f32 {
        self.torque_nm * self.rpm * std::f32::consts::TAU / 60.0
    }
}

/// Performance spec shared by every car of the same model.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CarSpec {
    pub id:               SpecId,
    pub name:             String,
    pub mass_kg:          f32,
    pub torque_curve:     Vec<TorquePoint>,
    pub wheel_radius_m:   f32,
    /// Overall ratio (gearbox × final drive) at which peak torque is applied.
    pub drive_ratio:      f32,
    /// Tyre friction coefficient.
    pub tire_grip:        f32,
    /// Extra grip multiplier (downforce, setup).  `1.0` is neutral.
    pub grip_factor:      f32,
    pub drag_coefficient: f32,
    pub frontal_area_m2:  f32,
    /// Maximum braking deceleration, m/s².
    pub brake_decel:      f32,
}

impl CarSpec {
    /// A mid-range saloon racer: 1200 kg, ~400 Nm, road tyres.
    pub fn new(id: SpecId, name: impl Into<String>) -> Self {
        Self {
            id,
            name:             name.into(),
            mass_kg:          1200.0,
            torque_curve:     vec![
                TorquePoint::new(1000.0, 250.0),
                TorquePoint::new(4000.0, 400.0),
                TorquePoint::new(6500.0, 380.0),
                TorquePoint::new(7500.0, 320.0),
            ],
            wheel_radius_m:   0.33,
            drive_ratio:      8.0,
            tire_grip:        1.0,
            grip_factor:      1.0,
            drag_coefficient: 0.35,
            frontal_area_m2:  2.0,
            brake_decel:      9.0,
        }
    }

    /// Check every physical quantity the solver divides by or takes a root of.
    pub fn validate(&self) -> LineResult<()> {
        if self.torque_curve.is_empty() {
            return Err(LineError::EmptyTorqueCurve(self.id));
        }
        let positive = [
            ("mass_kg", self.mass_kg),
            ("wheel_radius_m", self.wheel_radius_m),
            ("drive_ratio", self.drive_ratio),
            ("tire_grip", self.tire_grip),
            ("grip_factor", self.grip_factor),
            ("brake_decel", self.brake_decel),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(LineError::InvalidCarSpec { spec: self.id, field, value });
            }
        }
        for (field, value) in [
            ("drag_coefficient", self.drag_coefficient),
            ("frontal_area_m2", self.frontal_area_m2),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(LineError::InvalidCarSpec { spec: self.id, field, value });
            }
        }
        Ok(())
    }

    pub fn peak_torque_nm(&self) -> f32 {
        self.torque_curve.iter().map(|p| p.torque_nm).fold(0.0, f32::max)
    }

    pub fn peak_power_w(&self) -> f32 {
        self.torque_curve.iter().map(TorquePoint::power_w).fold(0.0, f32::max)
    }

    /// Lateral acceleration the tyres sustain on a surface of grip `surface_grip`.
    #[inline]
    pub fn max_lateral_accel(&self, surface_grip: f32) -> f32 {
        self.grip_factor * self.tire_grip * surface_grip * GRAVITY
    }

    /// Tractive force at `speed` through an ideal gearbox, capped by what
    /// the tyres can put down.
    pub fn drive_force(&self, speed: f32) -> f32 {
        let torque_limited = self.peak_torque_nm() * self.drive_ratio / self.wheel_radius_m;
        let power_limited = self.peak_power_w() / speed.max(MIN_POWER_SPEED);
        let traction = self.tire_grip * self.grip_factor * self.mass_kg * GRAVITY;
        torque_limited.min(power_limited).min(traction)
    }

    /// Aerodynamic drag force at `speed`.
    #[inline]
    pub fn drag_force(&self, speed: f32) -> f32 {
        0.5 * AIR_DENSITY * self.drag_coefficient * self.frontal_area_m2 * speed * speed
    }

    /// Net longitudinal acceleration at full throttle, never below
    /// `-brake_decel`.
    pub fn full_throttle_accel(&self, speed: f32) -> f32 {
        let net = (self.drive_force(speed) - self.drag_force(speed)) / self.mass_kg;
        net.max(-self.brake_decel)
    }
}
