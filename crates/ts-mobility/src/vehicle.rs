//! Physical parameter bundle of a vehicle.

use ts_core::{CoreError, CoreResult};

/// Acceleration and velocity bounds, all inclusive.
///
/// The constant-velocity motion model only consults the velocity bounds
/// (when a velocity is written); acceleration is carried for richer models.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Vehicle {
    min_acceleration: f64,
    max_acceleration: f64,
    min_velocity:     f64,
    max_velocity:     f64,
}

impl Vehicle {
    /// Bounds in m/s² and m/s.  Each pair must be finite with `min <= max`.
    /// A `min_velocity` of 0 means the vehicle cannot reverse.
    pub fn new(
        min_acceleration: f64,
        max_acceleration: f64,
        min_velocity:     f64,
        max_velocity:     f64,
    ) -> CoreResult<Self> {
        check_range("acceleration", min_acceleration, max_acceleration)?;
        check_range("velocity", min_velocity, max_velocity)?;
        Ok(Self { min_acceleration, max_acceleration, min_velocity, max_velocity })
    }

    pub fn min_acceleration(&self) -> f64 {
        self.min_acceleration
    }

    pub fn max_acceleration(&self) -> f64 {
        self.max_acceleration
    }

    pub fn min_velocity(&self) -> f64 {
        self.min_velocity
    }

    pub fn max_velocity(&self) -> f64 {
        self.max_velocity
    }

    /// `true` if `velocity` lies within the velocity bounds.
    #[inline]
    pub fn admits_velocity(&self, velocity: f64) -> bool {
        (self.min_velocity..=self.max_velocity).contains(&velocity)
    }
}

impl Default for Vehicle {
    /// A passenger car: ±5 m/s², no reversing, up to 33.3 m/s (120 km/h).
    fn default() -> Self {
        Self {
            min_acceleration: -5.0,
            max_acceleration: 5.0,
            min_velocity:     0.0,
            max_velocity:     33.3,
        }
    }
}

fn check_range(what: &'static str, min: f64, max: f64) -> CoreResult<()> {
    if !min.is_finite() || !max.is_finite() || min > max {
        return Err(CoreError::invalid(what, format!("bounds [{min}, {max}] must be finite and ordered")));
    }
    Ok(())
}
