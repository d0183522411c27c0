//! Multi-beam Fourier synthesis (symmetric layout)
//!
//! The desired pattern F(θ) is the clipped sum of rectangular or triangular
//! beams. It is carried into phase space ψ = kd·cosθ, sampled on a dedicated
//! integration grid over [-π, π] (zero outside the visible region), and each
//! element gets the Fourier coefficient
//!
//! ```text
//! aₙ = 1/(2π) · ∫ F(ψ)·e^(−jnψ) dψ,   n = -(N-1)/2 ... (N-1)/2
//! ```
//!
//! Steering is applied to the coefficients afterwards.

use ndarray::Array1;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::str::FromStr;

use super::catalog::{common_inputs, InputDescriptor, MethodDescriptor};
use super::contract::{Diagnostics, Intermediate, SynthesisMethod};
use super::params::ParamBag;
use super::prepared::{validate_element_count, ArrayGeometry, PhaseReference, PreparedParameters};
use super::result::{MethodMetrics, PatternView, ResultParts, SynthesisResult};
use crate::config::{CommonSettings, EngineConfig};
use crate::constants::{DEFAULT_INTEGRATION_RESOLUTION, EPSILON, MAX_ELEMENTS, MIN_ELEMENTS};
use crate::error::{Result, SynthesisError};
use crate::grid::AngleUnit;
use crate::math::{interp, linspace, mag_2_db_floored, trapezoid_complex};
use crate::pattern::{
    directivity_from_intensity, energy_fraction, steer, Directivity, Layout, NormalizationMethod,
};

/// Shape of one beam of the desired pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BeamShape {
    /// 1 inside [start, end], 0 outside
    #[default]
    Rectangular,
    /// 1 at the beam center, falling linearly to 0 at both edges
    Triangular,
}

impl BeamShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            BeamShape::Rectangular => "rectangular",
            BeamShape::Triangular => "triangular",
        }
    }

    /// Value of one beam at `theta` (all angles in radians)
    pub fn value(&self, theta: f64, start: f64, end: f64) -> f64 {
        let (lo, hi) = if start <= end { (start, end) } else { (end, start) };
        if theta < lo || theta > hi {
            return 0.0;
        }
        match self {
            BeamShape::Rectangular => 1.0,
            BeamShape::Triangular => {
                let center = 0.5 * (lo + hi);
                let half_width = 0.5 * (hi - lo);
                if half_width <= 0.0 {
                    1.0
                } else {
                    (1.0 - (theta - center).abs() / half_width).max(0.0)
                }
            }
        }
    }
}

impl FromStr for BeamShape {
    type Err = SynthesisError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "rectangular" => Ok(BeamShape::Rectangular),
            "triangular" => Ok(BeamShape::Triangular),
            _ => Err(SynthesisError::UnknownBeamShape(s.trim().to_string())),
        }
    }
}

/// Desired pattern on `theta`: clipped sum of beams
pub fn desired_pattern(theta: &Array1<f64>, shape: BeamShape, beams_rad: &[(f64, f64)]) -> Array1<f64> {
    theta.mapv(|t| {
        beams_rad
            .iter()
            .map(|&(a, b)| shape.value(t, a, b))
            .sum::<f64>()
            .clamp(0.0, 1.0)
    })
}

/// Typed Fourier request
#[derive(Debug, Clone, PartialEq)]
pub struct FourierInput {
    pub geometry: ArrayGeometry,
    pub n_elements: usize,
    pub beam_shape: BeamShape,
    pub number_of_beams: usize,
    /// Flat `[start₁, end₁, start₂, end₂, ...]` in `geometry.angle_unit`
    pub beam_angles: Vec<f64>,
}

impl FourierInput {
    /// Request with one `(start, end)` pair per beam
    pub fn new(
        unit: AngleUnit,
        d_lambda: f64,
        theta0: f64,
        n_elements: usize,
        beam_shape: BeamShape,
        beams: &[(f64, f64)],
    ) -> Self {
        Self {
            geometry: ArrayGeometry::new(unit, d_lambda, theta0),
            n_elements,
            beam_shape,
            number_of_beams: beams.len(),
            beam_angles: beams.iter().flat_map(|&(a, b)| [a, b]).collect(),
        }
    }

    pub fn with_resolution(mut self, resolution: usize) -> Self {
        self.geometry = self.geometry.with_resolution(resolution);
        self
    }
}

/// Validated request with beam pairs in radians
#[derive(Debug, Clone)]
pub struct FourierDesign {
    pub input: FourierInput,
    pub beams_rad: Vec<(f64, f64)>,
}

#[derive(Debug, Clone)]
pub struct FourierPrepared {
    pub params: PreparedParameters,
    pub n_elements: usize,
    pub beam_shape: BeamShape,
    pub beams_rad: Vec<(f64, f64)>,
    /// Desired pattern on the display grid
    pub desired: Array1<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FourierMetrics {
    pub beam_shape: BeamShape,
    pub beams_rad: Vec<(f64, f64)>,
    pub integration_resolution: usize,
    pub desired_af: Array1<f64>,
    pub desired_af_normalized: Array1<f64>,
    pub desired_af_db: Array1<f64>,
    pub desired_directivity: Directivity,
    /// Share of synthesized power (sinθ-weighted) inside the requested beams
    pub beam_energy_fraction: f64,
}

/// Multi-beam Fourier variant (symmetric layout)
#[derive(Debug, Clone, PartialEq)]
pub struct Fourier {
    pub settings: CommonSettings,
    /// Samples of the integration grid over [-π, π]
    pub integration_resolution: usize,
    pub normalization: NormalizationMethod,
}

impl Default for Fourier {
    fn default() -> Self {
        Self {
            settings: CommonSettings::default(),
            integration_resolution: DEFAULT_INTEGRATION_RESOLUTION,
            normalization: NormalizationMethod::Center,
        }
    }
}

impl Fourier {
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            settings: CommonSettings::from(config),
            integration_resolution: config.integration_resolution,
            normalization: config
                .normalization
                .fourier
                .unwrap_or(NormalizationMethod::Center),
        }
    }

    fn parse_beam_angles(params: &ParamBag, number_of_beams: usize) -> Result<Vec<f64>> {
        let mut angles = Vec::new();
        if let Some(flat) = params.angle_list("beam_angles", SynthesisError::UnparsableBeamAngles(1))? {
            angles.extend(flat);
        }

        // beam_angles_1 ... beam_angles_N, in numeric order
        let mut per_beam: Vec<usize> = params
            .iter()
            .filter_map(|(name, _)| name.strip_prefix("beam_angles_")?.parse().ok())
            .filter(|i| (1..=number_of_beams).contains(i))
            .collect();
        per_beam.sort_unstable();

        for i in per_beam {
            let name = format!("beam_angles_{}", i);
            if let Some(list) = params.angle_list(&name, SynthesisError::UnparsableBeamAngles(i))? {
                angles.extend(list);
            }
        }
        Ok(angles)
    }
}

impl SynthesisMethod for Fourier {
    type Input = FourierInput;
    type Validated = FourierDesign;
    type Prepared = FourierPrepared;

    fn name(&self) -> &'static str {
        "fourier"
    }

    fn layout(&self) -> Layout {
        Layout::Symmetric
    }

    fn descriptor(&self) -> MethodDescriptor {
        let unit = self.settings.angle_unit;
        let mut inputs = common_inputs(unit, self.settings.resolution, 0.5);
        inputs.push(InputDescriptor::integer("n_elements", 21, MIN_ELEMENTS, MAX_ELEMENTS));
        inputs.push(InputDescriptor::choice("number_of_beams", &["1", "2", "3"], "1"));
        inputs.push(
            InputDescriptor::choice("beam_shape", &["rectangular", "triangular"], "rectangular")
                .optional(),
        );
        let default_beam = match unit {
            AngleUnit::Degrees => "60, 120",
            AngleUnit::Radians => "pi/3, 2*pi/3",
        };
        inputs.push(InputDescriptor::angle_list("beam_angles_1", default_beam));

        MethodDescriptor {
            name: self.name(),
            title: "Multi-beam Fourier",
            description: "Approximates a sum of rectangular or triangular beams with a \
                          truncated Fourier series of element weights",
            layout: self.layout(),
            inputs,
        }
    }

    fn parse(&self, params: &ParamBag) -> Result<FourierInput> {
        let unit = params.angle_unit_or(self.settings.angle_unit)?;
        let d_lambda = params.f64("d_lambda")?;
        let theta0 = params.angle("theta0")?;
        let resolution = params.usize_or("resolution", self.settings.resolution)?;
        let n_elements = params.usize("n_elements")?;
        let number_of_beams = params.usize("number_of_beams")?;
        let beam_shape = if params.contains("beam_shape") {
            params.text("beam_shape")?.parse::<BeamShape>()?
        } else {
            BeamShape::default()
        };
        let beam_angles = Self::parse_beam_angles(params, number_of_beams)?;

        Ok(FourierInput {
            geometry: ArrayGeometry::new(unit, d_lambda, theta0).with_resolution(resolution),
            n_elements,
            beam_shape,
            number_of_beams,
            beam_angles,
        })
    }

    fn validate(&self, input: FourierInput, _diagnostics: &mut Diagnostics) -> Result<FourierDesign> {
        validate_element_count(input.n_elements)?;
        input.geometry.validate()?;

        if input.number_of_beams < 1 {
            return Err(SynthesisError::TooFewBeams);
        }
        // Saturating: huge beam counts surface as a count mismatch
        let expected = input.number_of_beams.saturating_mul(2);
        if input.beam_angles.len() != expected {
            return Err(SynthesisError::BeamAngleCountMismatch {
                expected,
                got: input.beam_angles.len(),
            });
        }

        let unit = input.geometry.angle_unit;
        let in_range = |a: f64| a.is_finite() && (-EPSILON..=PI + EPSILON).contains(&a);
        let mut beams_rad = Vec::with_capacity(input.number_of_beams);
        for (i, pair) in input.beam_angles.chunks_exact(2).enumerate() {
            let beam = i + 1;
            let (start, end) = (unit.to_radians(pair[0]), unit.to_radians(pair[1]));
            if !in_range(start) || !in_range(end) {
                return Err(SynthesisError::BeamAngleOutOfRange(beam));
            }
            if start >= end {
                return Err(SynthesisError::BeamAnglesNotIncreasing(beam));
            }
            beams_rad.push((start.clamp(0.0, PI), end.clamp(0.0, PI)));
        }

        Ok(FourierDesign { input, beams_rad })
    }

    fn prepare(&self, design: FourierDesign, _diagnostics: &mut Diagnostics) -> Result<FourierPrepared> {
        let params = PreparedParameters::new(design.input.geometry, PhaseReference::Broadside);
        let desired = desired_pattern(params.grid.theta_rad(), design.input.beam_shape, &design.beams_rad);

        Ok(FourierPrepared {
            params,
            n_elements: design.input.n_elements,
            beam_shape: design.input.beam_shape,
            beams_rad: design.beams_rad,
            desired,
        })
    }

    fn compute_excitations(&self, prepared: &FourierPrepared) -> Array1<Complex64> {
        let psi = &prepared.params.psi_rad;

        // Interpolation needs ψ ascending; ψ = kd·cosθ falls with θ
        let mut order: Vec<usize> = (0..psi.len()).collect();
        order.sort_by(|&a, &b| psi[a].total_cmp(&psi[b]));
        let xp: Vec<f64> = order.iter().map(|&i| psi[i]).collect();
        let fp: Vec<f64> = order.iter().map(|&i| prepared.desired[i]).collect();

        let u = linspace(-PI, PI, self.integration_resolution);
        let f = interp(&u, &xp, &fp, 0.0, 0.0);

        let indices = self.layout().element_indices(prepared.n_elements);
        let coefficients = indices.mapv(|n| {
            let integrand = Array1::from_shape_fn(u.len(), |k| Complex64::from_polar(f[k], -n * u[k]));
            trapezoid_complex(&integrand, &u) / (2.0 * PI)
        });

        let geometry = &prepared.params.geometry;
        steer(&coefficients, geometry.d_lambda, geometry.theta0_rad)
    }

    fn compute_array_factor(&self, excitations: &Array1<Complex64>, prepared: &FourierPrepared) -> Array1<Complex64> {
        self.layout().array_factor(excitations, &prepared.params.psi_rad)
    }

    fn format_output(
        &self,
        intermediate: Intermediate,
        prepared: FourierPrepared,
        diagnostics: Diagnostics,
    ) -> SynthesisResult {
        let pattern = PatternView::new(intermediate.af);
        let theta = prepared.params.grid.theta_rad();

        let peak = prepared.desired.iter().cloned().fold(0.0, f64::max);
        let desired_af_normalized = if peak > 0.0 {
            prepared.desired.mapv(|v| v / peak)
        } else {
            prepared.desired.clone()
        };
        let desired_af_db = desired_af_normalized.mapv(mag_2_db_floored);
        let desired_directivity = directivity_from_intensity(&prepared.desired.mapv(|v| v * v), theta);
        let beam_energy_fraction = energy_fraction(&pattern.af, theta, &prepared.beams_rad);

        let metrics = MethodMetrics::Fourier(FourierMetrics {
            beam_shape: prepared.beam_shape,
            beams_rad: prepared.beams_rad.clone(),
            integration_resolution: self.integration_resolution,
            desired_af: prepared.desired.clone(),
            desired_af_normalized,
            desired_af_db,
            desired_directivity,
            beam_energy_fraction,
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
