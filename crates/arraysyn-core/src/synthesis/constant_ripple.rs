//! Constant-ripple synthesis (Dolph-Chebyshev, symmetric layout)
//!
//! For N elements the array factor is mapped onto the Chebyshev polynomial
//! T_m(x₀·cos(ψ/2)) with m = N − 1. All sidelobes then sit at the same level
//! 1/R below the main beam, where R = 10^(|SLL|/20).

use ndarray::Array1;
use num_complex::Complex64;
use serde::Serialize;
use std::f64::consts::PI;

use super::catalog::{common_inputs, InputDescriptor, MethodDescriptor};
use super::contract::{Diagnostics, Intermediate, SynthesisMethod};
use super::params::ParamBag;
use super::prepared::{validate_element_count, ArrayGeometry, PhaseReference, PreparedParameters};
use super::result::{MethodMetrics, PatternView, ResultParts, SynthesisResult};
use crate::config::{CommonSettings, EngineConfig, SpacingPolicy};
use crate::constants::{MAX_ELEMENTS, MIN_ELEMENTS};
use crate::error::{Result, SynthesisError, SynthesisWarning};
use crate::grid::AngleUnit;
use crate::math::{db_2_mag, find_peaks, poly_from_roots};
use crate::pattern::{steer, Layout, NormalizationMethod};

/// Closed-form Chebyshev design quantities for N elements and a target SLL
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChebyshevDesign {
    pub n_elements: usize,
    /// Polynomial order m = N − 1
    pub order: usize,
    /// Target sidelobe level, positive dB
    pub sidelobe_level_db: f64,
    /// Main-beam to sidelobe voltage ratio
    pub r: f64,
    /// Scaling factor, cosh(acosh(R)/m)
    pub x0: f64,
    /// Largest spacing (wavelengths) that keeps all sidelobes at the target level
    pub d_max: f64,
    /// Broadside spacing giving the narrowest beam for this ripple
    pub d_opt: f64,
}

impl ChebyshevDesign {
    /// Solve for x₀; infeasible when x₀ ≤ 1
    pub fn solve(n_elements: usize, sidelobe_level_db: f64) -> Result<Self> {
        let order = n_elements.saturating_sub(1).max(1);
        let m = order as f64;
        let r = db_2_mag(sidelobe_level_db.abs());
        let x0 = (r.acosh() / m).cosh();
        if !x0.is_finite() || x0 <= 1.0 {
            return Err(SynthesisError::InfeasibleDesign { x0 });
        }

        let d_max = (-1.0 / x0).acos() / PI;
        // ln(R + √(R² − 1)) is acosh(R)
        let gamma = (r.acosh() / m).cosh();
        let d_opt = (1.0 - (1.0 / gamma).acos() / PI).abs();

        Ok(Self {
            n_elements,
            order,
            sidelobe_level_db: sidelobe_level_db.abs(),
            r,
            x0,
            d_max,
            d_opt,
        })
    }

    /// Phase-space zeros ψᵢ = 2·acos(xᵢ/x₀) of the Chebyshev zeros xᵢ
    pub fn psi_zeros(&self) -> Vec<f64> {
        let m = self.order as f64;
        (1..=self.order)
            .map(|i| {
                let x = (PI * (i as f64 - 0.5) / m).cos();
                2.0 * (x / self.x0).acos()
            })
            .collect()
    }

    /// Real excitation coefficients, unsteered
    pub fn coefficients(&self) -> Array1<Complex64> {
        let roots: Vec<Complex64> = self
            .psi_zeros()
            .into_iter()
            .map(|psi| Complex64::from_polar(1.0, psi))
            .collect();
        poly_from_roots(&roots).mapv(|c| Complex64::new(c.re, 0.0))
    }
}

/// Typed Constant-Ripple request
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantRippleInput {
    pub geometry: ArrayGeometry,
    pub n_elements: usize,
    /// Target sidelobe level in dB; a negative value is read as its magnitude
    pub sidelobe_level_db: f64,
}

impl ConstantRippleInput {
    pub fn new(unit: AngleUnit, d_lambda: f64, theta0: f64, n_elements: usize, sidelobe_level_db: f64) -> Self {
        Self {
            geometry: ArrayGeometry::new(unit, d_lambda, theta0),
            n_elements,
            sidelobe_level_db,
        }
    }

    pub fn with_resolution(mut self, resolution: usize) -> Self {
        self.geometry = self.geometry.with_resolution(resolution);
        self
    }
}

#[derive(Debug, Clone)]
pub struct ConstantRippleValidated {
    pub geometry: ArrayGeometry,
    pub design: ChebyshevDesign,
}

#[derive(Debug, Clone)]
pub struct ConstantRipplePrepared {
    pub params: PreparedParameters,
    pub design: ChebyshevDesign,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstantRippleMetrics {
    pub design: ChebyshevDesign,
    /// Highest sidelobe below the main beam (positive dB), if any sidelobe exists
    pub achieved_sll_db: Option<f64>,
}

/// Constant-ripple variant (symmetric layout)
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantRipple {
    pub settings: CommonSettings,
    pub spacing_policy: SpacingPolicy,
    pub normalization: NormalizationMethod,
}

impl Default for ConstantRipple {
    fn default() -> Self {
        Self {
            settings: CommonSettings::default(),
            spacing_policy: SpacingPolicy::Warn,
            normalization: NormalizationMethod::Center,
        }
    }
}

impl ConstantRipple {
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            settings: CommonSettings::from(config),
            spacing_policy: config.spacing_policy,
            normalization: config
                .normalization
                .constant_ripple
                .unwrap_or(NormalizationMethod::Center),
        }
    }
}

/// Highest sidelobe of a peak-normalized dB pattern, as a positive dB value
///
/// The main lobe is the peak closest to `theta0_rad`. `None` when the pattern
/// has no other peak.
pub fn achieved_sidelobe_level(af_db: &Array1<f64>, theta_rad: &Array1<f64>, theta0_rad: f64) -> Option<f64> {
    let peaks = find_peaks(&af_db.to_vec(), None);
    let main = peaks
        .iter()
        .copied()
        .min_by(|&a, &b| (theta_rad[a] - theta0_rad).abs().total_cmp(&(theta_rad[b] - theta0_rad).abs()))?;

    peaks
        .iter()
        .filter(|&&i| i != main)
        .map(|&i| af_db[i])
        .max_by(f64::total_cmp)
        .map(f64::abs)
}

impl SynthesisMethod for ConstantRipple {
    type Input = ConstantRippleInput;
    type Validated = ConstantRippleValidated;
    type Prepared = ConstantRipplePrepared;

    fn name(&self) -> &'static str {
        "constant_ripple"
    }

    fn layout(&self) -> Layout {
        Layout::Symmetric
    }

    fn descriptor(&self) -> MethodDescriptor {
        let mut inputs = common_inputs(self.settings.angle_unit, self.settings.resolution, 2.0);
        inputs.push(InputDescriptor::integer("n_elements", 20, MIN_ELEMENTS, MAX_ELEMENTS));
        inputs.push(InputDescriptor::float("sidelobe_level_db", 30.0, 10.0, 100.0));

        MethodDescriptor {
            name: self.name(),
            title: "Constant ripple (Dolph-Chebyshev)",
            description: "Equal-level sidelobes at the requested SLL with the narrowest \
                          main beam for that level",
            layout: self.layout(),
            inputs,
        }
    }

    fn parse(&self, params: &ParamBag) -> Result<ConstantRippleInput> {
        let unit = params.angle_unit_or(self.settings.angle_unit)?;
        let d_lambda = params.f64("d_lambda")?;
        let theta0 = params.angle("theta0")?;
        let resolution = params.usize_or("resolution", self.settings.resolution)?;
        let n_elements = params.usize("n_elements")?;
        let sidelobe_level_db = params.f64("sidelobe_level_db")?;

        Ok(ConstantRippleInput::new(unit, d_lambda, theta0, n_elements, sidelobe_level_db)
            .with_resolution(resolution))
    }

    fn validate(
        &self,
        input: ConstantRippleInput,
        diagnostics: &mut Diagnostics,
    ) -> Result<ConstantRippleValidated> {
        validate_element_count(input.n_elements)?;
        if !input.sidelobe_level_db.is_finite() {
            return Err(SynthesisError::SidelobeLevelNotFinite);
        }
        if input.sidelobe_level_db < 0.0 {
            diagnostics.warn(SynthesisWarning::NegativeSidelobeLevel {
                given_db: input.sidelobe_level_db,
            });
        }
        input.geometry.validate()?;

        let design = ChebyshevDesign::solve(input.n_elements, input.sidelobe_level_db)?;
        let d_lambda = input.geometry.d_lambda;
        if d_lambda > design.d_max {
            match self.spacing_policy {
                SpacingPolicy::Warn => diagnostics.warn(SynthesisWarning::SpacingExceedsMaximum {
                    d_lambda,
                    d_max: design.d_max,
                    sll_db: design.sidelobe_level_db,
                }),
                SpacingPolicy::Strict => {
                    return Err(SynthesisError::SpacingExceedsMaximum {
                        d_lambda,
                        d_max: design.d_max,
                    })
                }
            }
        }

        Ok(ConstantRippleValidated {
            geometry: input.geometry,
            design,
        })
    }

    fn prepare(
        &self,
        validated: ConstantRippleValidated,
        _diagnostics: &mut Diagnostics,
    ) -> Result<ConstantRipplePrepared> {
        Ok(ConstantRipplePrepared {
            params: PreparedParameters::new(validated.geometry, PhaseReference::Broadside),
            design: validated.design,
        })
    }

    fn compute_excitations(&self, prepared: &ConstantRipplePrepared) -> Array1<Complex64> {
        let geometry = &prepared.params.geometry;
        steer(&prepared.design.coefficients(), geometry.d_lambda, geometry.theta0_rad)
    }

    fn compute_array_factor(
        &self,
        excitations: &Array1<Complex64>,
        prepared: &ConstantRipplePrepared,
    ) -> Array1<Complex64> {
        self.layout().array_factor(excitations, &prepared.params.psi_rad)
    }

    fn format_output(
        &self,
        intermediate: Intermediate,
        prepared: ConstantRipplePrepared,
        diagnostics: Diagnostics,
    ) -> SynthesisResult {
        let pattern = PatternView::new(intermediate.af);
        let achieved_sll_db = achieved_sidelobe_level(
            &pattern.db,
            prepared.params.grid.theta_rad(),
            prepared.params.geometry.theta0_rad,
        );

        let metrics = MethodMetrics::ConstantRipple(ConstantRippleMetrics {
            design: prepared.design,
            achieved_sll_db,
        });

        SynthesisResult::assemble(ResultParts {
            method: self.name(),
            layout: self.layout(),
            prepared: &prepared.params,
            raw_excitations: intermediate.excitations,
            normalization: self.normalization,
            polynomial_decimals: self.settings.polynomial_decimals,
            pattern,
            metrics,
            warnings: diagnostics.into_warnings(),
        })
    }
}
