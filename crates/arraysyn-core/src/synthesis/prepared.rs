//! Request geometry shared by every variant and the derived numeric grids

use ndarray::Array1;
use serde::Serialize;
use std::f64::consts::PI;

use crate::constants::{
    DEFAULT_RESOLUTION, MAX_ELEMENTS, MIN_ELEMENTS, RESOLUTION_MAX, RESOLUTION_MIN, WAVENUMBER,
};
use crate::error::{Result, SynthesisError};
use crate::grid::{AngleUnit, AngularGrid};
use crate::pattern::{steering_phase, VisibleMargin};

/// Common request fields, angles already in radians
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ArrayGeometry {
    /// Element spacing in wavelengths
    pub d_lambda: f64,
    /// Steering angle θ₀ in radians
    pub theta0_rad: f64,
    /// Number of θ samples
    pub resolution: usize,
    /// Unit the caller used for angles; results report angle lists in it
    pub angle_unit: AngleUnit,
}

impl ArrayGeometry {
    /// Geometry from spacing and a steering angle given in `unit`
    pub fn new(unit: AngleUnit, d_lambda: f64, theta0: f64) -> Self {
        Self {
            d_lambda,
            theta0_rad: unit.to_radians(theta0),
            resolution: DEFAULT_RESOLUTION,
            angle_unit: unit,
        }
    }

    pub fn with_resolution(mut self, resolution: usize) -> Self {
        self.resolution = resolution;
        self
    }

    /// Spacing, resolution and steering bounds
    pub fn validate(&self) -> Result<()> {
        if !self.d_lambda.is_finite() || self.d_lambda <= 0.0 {
            return Err(SynthesisError::SpacingMustBePositive);
        }
        if self.resolution < RESOLUTION_MIN {
            return Err(SynthesisError::ResolutionTooSmall {
                min: RESOLUTION_MIN,
                got: self.resolution,
            });
        }
        if self.resolution > RESOLUTION_MAX {
            return Err(SynthesisError::ResolutionTooLarge {
                max: RESOLUTION_MAX,
                got: self.resolution,
            });
        }
        if !self.theta0_rad.is_finite() || !(0.0..=PI).contains(&self.theta0_rad) {
            return Err(SynthesisError::SteeringAngleOutOfRange);
        }
        Ok(())
    }
}

/// Element count within [`MIN_ELEMENTS`, `MAX_ELEMENTS`]
pub(crate) fn validate_element_count(n_elements: usize) -> Result<()> {
    if n_elements < MIN_ELEMENTS {
        return Err(SynthesisError::TooFewElements {
            min: MIN_ELEMENTS,
            got: n_elements,
        });
    }
    if n_elements > MAX_ELEMENTS {
        return Err(SynthesisError::TooManyElements {
            max: MAX_ELEMENTS,
            got: n_elements,
        });
    }
    Ok(())
}

/// Where the steering phase is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseReference {
    /// ψ = kd·cosθ + α; steering lives in the phase grid
    Steered,
    /// ψ = kd·cosθ; steering is applied to the excitations
    Broadside,
}

/// Immutable grids and constants derived from a validated geometry
#[derive(Debug, Clone)]
pub struct PreparedParameters {
    pub geometry: ArrayGeometry,
    /// Wavenumber k = 2π (per wavelength)
    pub k: f64,
    /// Electrical spacing kd
    pub kd: f64,
    /// Steering phase α = -kd·cosθ₀
    pub alpha_rad: f64,
    pub grid: AngularGrid,
    /// Phase-space samples aligned with the θ grid
    pub psi_rad: Array1<f64>,
    pub margin: VisibleMargin,
    pub reference: PhaseReference,
}

impl PreparedParameters {
    pub fn new(geometry: ArrayGeometry, reference: PhaseReference) -> Self {
        let k = WAVENUMBER;
        let kd = k * geometry.d_lambda;
        let alpha_rad = steering_phase(geometry.d_lambda, geometry.theta0_rad);
        let grid = AngularGrid::new(geometry.resolution);
        let offset = match reference {
            PhaseReference::Steered => alpha_rad,
            PhaseReference::Broadside => 0.0,
        };
        let psi_rad = grid.theta_rad().mapv(|t| kd * t.cos() + offset);

        Self {
            geometry,
            k,
            kd,
            alpha_rad,
            grid,
            psi_rad,
            margin: VisibleMargin::new(geometry.d_lambda, alpha_rad),
            reference,
        }
    }

    /// Phase-space position of a direction `theta_rad`
    pub fn psi_at(&self, theta_rad: f64) -> f64 {
        match self.reference {
            PhaseReference::Steered => self.kd * theta_rad.cos() + self.alpha_rad,
            PhaseReference::Broadside => self.kd * theta_rad.cos(),
        }
    }
}
