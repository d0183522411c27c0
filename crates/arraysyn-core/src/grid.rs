//! Angular grid module - represents the θ sampling of a pattern
//!
//! Provides the angle unit used by requests and the evenly spaced θ grid over
//! [0, π] on which every array factor is sampled.

use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::error::SynthesisError;
use crate::math::linspace;

/// Angle unit enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleUnit {
    #[default]
    Degrees,
    Radians,
}

impl AngleUnit {
    /// Get the multiplier to convert to radians
    pub fn multiplier(&self) -> f64 {
        match self {
            AngleUnit::Degrees => PI / 180.0,
            AngleUnit::Radians => 1.0,
        }
    }

    /// Convert a value in this unit to radians
    #[inline]
    pub fn to_radians(&self, value: f64) -> f64 {
        match self {
            AngleUnit::Degrees => value.to_radians(),
            AngleUnit::Radians => value,
        }
    }

    /// Convert radians to this unit
    #[inline]
    pub fn from_radians(&self, rad: f64) -> f64 {
        match self {
            AngleUnit::Degrees => rad.to_degrees(),
            AngleUnit::Radians => rad,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AngleUnit::Degrees => "degrees",
            AngleUnit::Radians => "radians",
        }
    }
}

impl std::str::FromStr for AngleUnit {
    type Err = SynthesisError;

    /// Parse from string (case-insensitive)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "degrees" | "degree" | "deg" => Ok(AngleUnit::Degrees),
            "radians" | "radian" | "rad" => Ok(AngleUnit::Radians),
            _ => Err(SynthesisError::UnknownAngleUnit(s.to_string())),
        }
    }
}

/// Evenly spaced θ samples over [0, π]
#[derive(Debug, Clone)]
pub struct AngularGrid {
    /// θ vector in radians, strictly increasing
    theta: Array1<f64>,
}

impl AngularGrid {
    /// Create a grid of `npoints` samples from 0 to π inclusive
    ///
    /// # Example
    /// ```
    /// use arraysyn_core::grid::AngularGrid;
    /// let grid = AngularGrid::new(181);
    /// assert_eq!(grid.npoints(), 181);
    /// ```
    pub fn new(npoints: usize) -> Self {
        Self {
            theta: linspace(0.0, PI, npoints),
        }
    }

    /// θ vector in radians
    #[inline]
    pub fn theta_rad(&self) -> &Array1<f64> {
        &self.theta
    }

    /// θ vector in degrees
    pub fn theta_deg(&self) -> Array1<f64> {
        self.theta.mapv(f64::to_degrees)
    }

    /// θ vector in the given unit
    pub fn theta_in(&self, unit: AngleUnit) -> Array1<f64> {
        self.theta.mapv(|t| unit.from_radians(t))
    }

    /// Number of samples
    #[inline]
    pub fn npoints(&self) -> usize {
        self.theta.len()
    }

    /// Grid step in radians
    pub fn step(&self) -> f64 {
        if self.npoints() < 2 {
            0.0
        } else {
            PI / (self.npoints() - 1) as f64
        }
    }

    /// Index of the sample closest to `theta_rad`
    pub fn nearest_index(&self, theta_rad: f64) -> usize {
        nearest_sample(self.npoints(), theta_rad)
    }
}

/// Index of the sample closest to `theta_rad` on an `npoints` grid over [0, π]
pub fn nearest_sample(npoints: usize, theta_rad: f64) -> usize {
    if npoints < 2 {
        return 0;
    }
    let step = PI / (npoints - 1) as f64;
    let idx = (theta_rad.clamp(0.0, PI) / step).round() as usize;
    idx.min(npoints - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_grid_endpoints_and_monotonic() {
        let grid = AngularGrid::new(16);
        let t = grid.theta_rad();
        assert_eq!(grid.npoints(), 16);
        assert_eq!(t[0], 0.0);
        assert_eq!(t[15], PI);
        assert!(t.windows(2).into_iter().all(|w| w[1] > w[0]));
    }

    #[test]
    fn test_theta_deg() {
        let grid = AngularGrid::new(181);
        let deg = grid.theta_deg();
        assert_relative_eq!(deg[90], 90.0, epsilon = 1e-10);
        assert_relative_eq!(deg[180], 180.0, epsilon = 1e-10);
    }

    #[test]
    fn test_nearest_index() {
        let grid = AngularGrid::new(181);
        assert_eq!(grid.nearest_index(60f64.to_radians()), 60);
        assert_eq!(grid.nearest_index(60.4f64.to_radians()), 60);
        assert_eq!(grid.nearest_index(-1.0), 0);
        assert_eq!(grid.nearest_index(10.0), 180);
    }

    #[test]
    fn test_angle_unit_multiplier() {
        assert_relative_eq!(AngleUnit::Degrees.multiplier(), PI / 180.0);
        assert_eq!(AngleUnit::Radians.multiplier(), 1.0);
        assert_relative_eq!(AngleUnit::Degrees.to_radians(180.0), PI);
        assert_relative_eq!(AngleUnit::Degrees.from_radians(PI / 2.0), 90.0);
    }

    #[test]
    fn test_angle_unit_from_str() {
        assert_eq!("Degrees".parse::<AngleUnit>(), Ok(AngleUnit::Degrees));
        assert_eq!("rad".parse::<AngleUnit>(), Ok(AngleUnit::Radians));
        assert_eq!(
            "grads".parse::<AngleUnit>().unwrap_err().code(),
            "error_unknown_angle_unit:grads"
        );
    }
}
