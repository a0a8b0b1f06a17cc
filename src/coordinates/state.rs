//! # Rectangular state vectors
//!
//! A `StateVector` is the rectangular position (AU) and optional velocity
//! (AU/day) of a body. It carries no frame: the caller tracks whether the
//! axes are ICRS, mean equator of J2000, true equator of date and so on.
//!
//! Every reduction step returns a new value instead of mutating its input.

use crate::constants::C_AUDAY;
use crate::{Result, SkyError};
use nalgebra::Vector3;

/// Position (and optionally velocity) in rectangular coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateVector {
    /// Position in AU
    pub position: Vector3<f64>,
    /// Velocity in AU/day, when the source provides it
    pub velocity: Option<Vector3<f64>>,
}

impl StateVector {
    /// Creates a position-only state
    pub fn new(position: Vector3<f64>) -> Self {
        Self {
            position,
            velocity: None,
        }
    }

    /// Creates a full position/velocity state
    pub fn with_velocity(position: Vector3<f64>, velocity: Vector3<f64>) -> Self {
        Self {
            position,
            velocity: Some(velocity),
        }
    }

    /// Builds a state from a flat slice of 3 or 6 components
    ///
    /// # Examples
    ///
    /// ```rust
    /// use skyreduce::coordinates::StateVector;
    ///
    /// let s = StateVector::from_slice(&[1.0, 0.0, 0.0, 0.0, 0.017, 0.0]).unwrap();
    /// assert!(s.velocity.is_some());
    /// assert!(StateVector::from_slice(&[1.0, 2.0]).is_err());
    /// ```
    pub fn from_slice(values: &[f64]) -> Result<Self> {
        match values.len() {
            3 => Ok(Self::new(Vector3::new(values[0], values[1], values[2]))),
            6 => Ok(Self::with_velocity(
                Vector3::new(values[0], values[1], values[2]),
                Vector3::new(values[3], values[4], values[5]),
            )),
            n => Err(SkyError::InvalidInput(format!(
                "rectangular vector needs 3 or 6 components, got {}",
                n
            ))),
        }
    }

    /// Flattens the state into 3 or 6 components
    pub fn to_vec(&self) -> Vec<f64> {
        let mut out = vec![self.position.x, self.position.y, self.position.z];
        if let Some(v) = self.velocity {
            out.extend_from_slice(&[v.x, v.y, v.z]);
        }
        out
    }

    /// Distance from the origin in AU
    pub fn distance(&self) -> f64 {
        self.position.norm()
    }

    /// One-way light time from the origin, in days
    pub fn light_time(&self) -> f64 {
        self.distance() / C_AUDAY
    }

    /// Velocity, or the zero vector when the state is position-only
    pub fn velocity_or_zero(&self) -> Vector3<f64> {
        self.velocity.unwrap_or_else(Vector3::zeros)
    }

    /// Replaces the position while keeping the velocity
    pub fn with_position(&self, position: Vector3<f64>) -> Self {
        Self {
            position,
            velocity: self.velocity,
        }
    }

    /// State of `self` as seen from `origin`
    pub fn relative_to(&self, origin: &StateVector) -> Self {
        let velocity = match (self.velocity, origin.velocity) {
            (Some(a), Some(b)) => Some(a - b),
            _ => None,
        };
        Self {
            position: self.position - origin.position,
            velocity,
        }
    }
}

impl From<Vector3<f64>> for StateVector {
    fn from(position: Vector3<f64>) -> Self {
        Self::new(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_slice_round_trip_keeps_arity() {
        let three = StateVector::from_slice(&[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(three.to_vec().len(), 3);

        let six = StateVector::from_slice(&[1.0, 2.0, 3.0, 0.1, 0.2, 0.3]).unwrap();
        assert_eq!(six.to_vec(), vec![1.0, 2.0, 3.0, 0.1, 0.2, 0.3]);
    }

    #[test]
    fn test_bad_arity_is_rejected() {
        assert!(matches!(
            StateVector::from_slice(&[1.0; 4]),
            Err(SkyError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_light_time_of_one_au() {
        let s = StateVector::new(Vector3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(s.light_time() * 86_400.0, 499.004_784, epsilon = 1e-5);
    }

    #[test]
    fn test_relative_to_drops_partial_velocity() {
        let a = StateVector::with_velocity(Vector3::new(2.0, 0.0, 0.0), Vector3::new(0.0, 1.0, 0.0));
        let b = StateVector::new(Vector3::new(1.0, 0.0, 0.0));
        let rel = a.relative_to(&b);
        assert_eq!(rel.position, Vector3::new(1.0, 0.0, 0.0));
        assert!(rel.velocity.is_none());
        assert_eq!(rel.velocity_or_zero(), Vector3::zeros());
    }
}
