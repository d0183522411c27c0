//! Null-Placement synthesis (Schelkunoff polynomial method)
//!
//! Each requested null angle θᵢ maps to a unit-circle root
//! `zᵢ = e^(j(kd·cosθᵢ + α))`. The excitations are the coefficients of
//! `Π (z − zᵢ)`, lowest power first, so element 0 carries the constant term.
//! Steering is already embedded in the roots; no separate phase progression
//! is applied.

use ndarray::Array1;
use num_complex::Complex64;
use serde::Serialize;

use super::catalog::{common_inputs, InputDescriptor, MethodDescriptor};
use super::contract::{Diagnostics, Intermediate, SynthesisMethod};
use super::params::ParamBag;
use super::prepared::{ArrayGeometry, PhaseReference, PreparedParameters};
use super::result::{MethodMetrics, PatternView, ResultParts, SynthesisResult};
use crate::config::{CommonSettings, EngineConfig};
use crate::constants::{ANGLE_MATCH_TOL, DEFAULT_NULL_DEPTH_DB, MAX_ELEMENTS, VISIBILITY_TOL};
use crate::error::{Result, SynthesisError, SynthesisWarning};
use crate::grid::AngleUnit;
use crate::math::{find_peaks, poly_from_roots};
use crate::pattern::{Layout, NormalizationMethod};

/// Typed Null-Placement request
#[derive(Debug, Clone, PartialEq)]
pub struct NullPlacementInput {
    pub geometry: ArrayGeometry,
    /// Null angles in `geometry.angle_unit`; values outside [0, π] act as
    /// the angle with the same cosine (200° places a null at 160°)
    pub null_angles: Vec<f64>,
}

impl NullPlacementInput {
    pub fn new(unit: AngleUnit, d_lambda: f64, theta0: f64, null_angles: Vec<f64>) -> Self {
        Self {
            geometry: ArrayGeometry::new(unit, d_lambda, theta0),
            null_angles,
        }
    }

    pub fn with_resolution(mut self, resolution: usize) -> Self {
        self.geometry = self.geometry.with_resolution(resolution);
        self
    }
}

#[derive(Debug, Clone)]
pub struct NullPlacementPrepared {
    pub params: PreparedParameters,
    /// Nulls that map onto the unit circle, radians
    pub visible_nulls_rad: Vec<f64>,
    /// Nulls no real angle can reach, in the caller's unit
    pub invisible_nulls: Vec<f64>,
}

/// Achieved depth at one requested null
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NullDepth {
    pub angle_rad: f64,
    pub angle_deg: f64,
    /// Normalized pattern (dB) at the nearest grid sample
    pub depth_db: f64,
    /// Whether the depth reaches the configured threshold
    pub reached: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NullPlacementMetrics {
    pub null_depth_threshold_db: f64,
    pub requested_nulls: Vec<NullDepth>,
    pub achieved_nulls_rad: Vec<f64>,
    pub achieved_nulls_deg: Vec<f64>,
    pub invisible_nulls: Vec<f64>,
}

/// Null-Placement variant (unilateral layout)
#[derive(Debug, Clone, PartialEq)]
pub struct NullPlacement {
    pub settings: CommonSettings,
    /// Depth a pattern minimum must reach to count as a null (negative dB)
    pub null_depth_db: f64,
    pub normalization: NormalizationMethod,
}

impl Default for NullPlacement {
    fn default() -> Self {
        Self {
            settings: CommonSettings::default(),
            null_depth_db: DEFAULT_NULL_DEPTH_DB,
            normalization: NormalizationMethod::First,
        }
    }
}

impl NullPlacement {
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            settings: CommonSettings::from(config),
            null_depth_db: config.null_depth_db,
            normalization: config
                .normalization
                .null_placement
                .unwrap_or(NormalizationMethod::First),
        }
    }

    /// Grid indices of pattern minima at or below the depth threshold
    ///
    /// Interior minima come from peak detection on the negated pattern;
    /// endpoints are added when they are deep enough.
    pub fn achieved_null_indices(&self, af_db: &Array1<f64>) -> Vec<usize> {
        let negated: Vec<f64> = af_db.iter().map(|v| -v).collect();
        let mut indices = find_peaks(&negated, Some(-self.null_depth_db));

        if let (Some(&first), Some(&last)) = (af_db.first(), af_db.last()) {
            if first <= self.null_depth_db {
                indices.push(0);
            }
            if last <= self.null_depth_db {
                indices.push(af_db.len() - 1);
            }
        }
        indices.sort_unstable();
        indices.dedup();
        indices
    }
}

impl SynthesisMethod for NullPlacement {
    type Input = NullPlacementInput;
    type Validated = NullPlacementInput;
    type Prepared = NullPlacementPrepared;

    fn name(&self) -> &'static str {
        "null_placement"
    }

    fn layout(&self) -> Layout {
        Layout::Unilateral
    }

    fn descriptor(&self) -> MethodDescriptor {
        let mut inputs = common_inputs(self.settings.angle_unit, self.settings.resolution, 2.0);
        let default_nulls = match self.settings.angle_unit {
            AngleUnit::Degrees => "60, 120",
            AngleUnit::Radians => "pi/3, 2*pi/3",
        };
        inputs.push(InputDescriptor::angle_list("null_angles", default_nulls));

        MethodDescriptor {
            name: self.name(),
            title: "Null placement (Schelkunoff)",
            description: "Places array-factor zeros at the requested angles; \
                          one element more than the number of nulls",
            layout: self.layout(),
            inputs,
        }
    }

    fn parse(&self, params: &ParamBag) -> Result<NullPlacementInput> {
        let unit = params.angle_unit_or(self.settings.angle_unit)?;
        let d_lambda = params.f64("d_lambda")?;
        let theta0 = params.angle("theta0")?;
        let resolution = params.usize_or("resolution", self.settings.resolution)?;
        let null_angles = params
            .angle_list("null_angles", SynthesisError::UnparsableNullAngles)?
            .ok_or_else(|| SynthesisError::MissingParameter("null_angles".to_string()))?;

        Ok(NullPlacementInput::new(unit, d_lambda, theta0, null_angles).with_resolution(resolution))
    }

    fn validate(&self, input: NullPlacementInput, diagnostics: &mut Diagnostics) -> Result<NullPlacementInput> {
        if input.null_angles.is_empty() {
            return Err(SynthesisError::EmptyNullPositions);
        }
        // One element more than the number of nulls
        if input.null_angles.len() >= MAX_ELEMENTS {
            return Err(SynthesisError::TooManyElements {
                max: MAX_ELEMENTS,
                got: input.null_angles.len() + 1,
            });
        }
        input.geometry.validate()?;

        let unit = input.geometry.angle_unit;
        for &null in &input.null_angles {
            let null_rad = unit.to_radians(null);
            if (null_rad - input.geometry.theta0_rad).abs() <= ANGLE_MATCH_TOL {
                diagnostics.warn(SynthesisWarning::NullAtMainBeam {
                    angle_deg: null_rad.to_degrees(),
                });
            }
        }
        Ok(input)
    }

    fn prepare(&self, input: NullPlacementInput, diagnostics: &mut Diagnostics) -> Result<NullPlacementPrepared> {
        let params = PreparedParameters::new(input.geometry, PhaseReference::Steered);
        let unit = input.geometry.angle_unit;

        let mut visible_nulls_rad = Vec::with_capacity(input.null_angles.len());
        let mut invisible_nulls = Vec::new();
        for &null in &input.null_angles {
            let null_rad = unit.to_radians(null);
            // Normalized phase-space position (ψ - α) / kd
            let t = null_rad.cos();
            if t.is_finite() && t.abs() <= 1.0 + VISIBILITY_TOL {
                visible_nulls_rad.push(null_rad);
            } else {
                invisible_nulls.push(null);
            }
        }

        if !invisible_nulls.is_empty() {
            diagnostics.warn(SynthesisWarning::InvisibleNulls {
                angles: invisible_nulls.clone(),
            });
        }
        if visible_nulls_rad.is_empty() {
            return Err(SynthesisError::EmptyNullPositions);
        }

        Ok(NullPlacementPrepared {
            params,
            visible_nulls_rad,
            invisible_nulls,
        })
    }

    fn compute_excitations(&self, prepared: &NullPlacementPrepared) -> Array1<Complex64> {
        let roots: Vec<Complex64> = prepared
            .visible_nulls_rad
            .iter()
            .map(|&theta| Complex64::from_polar(1.0, prepared.params.psi_at(theta)))
            .collect();

        // Highest power first -> element order
        poly_from_roots(&roots).iter().rev().cloned().collect()
    }

    fn compute_array_factor(
        &self,
        excitations: &Array1<Complex64>,
        prepared: &NullPlacementPrepared,
    ) -> Array1<Complex64> {
        self.layout().array_factor(excitations, &prepared.params.psi_rad)
    }

    fn format_output(
        &self,
        intermediate: Intermediate,
        prepared: NullPlacementPrepared,
        diagnostics: Diagnostics,
    ) -> SynthesisResult {
        let pattern = PatternView::new(intermediate.af);
        let theta = prepared.params.grid.theta_rad();

        let achieved = self.achieved_null_indices(&pattern.db);
        let achieved_nulls_rad: Vec<f64> = achieved.iter().map(|&i| theta[i]).collect();
        let achieved_nulls_deg = achieved_nulls_rad.iter().map(|t| t.to_degrees()).collect();

        let requested_nulls = prepared
            .visible_nulls_rad
            .iter()
            .map(|&angle_rad| {
                let depth_db = pattern.db[prepared.params.grid.nearest_index(angle_rad)];
                NullDepth {
                    angle_rad,
                    angle_deg: angle_rad.to_degrees(),
                    depth_db,
                    reached: depth_db <= self.null_depth_db,
                }
            })
            .collect();

        let metrics = MethodMetrics::NullPlacement(NullPlacementMetrics {
            null_depth_threshold_db: self.null_depth_db,
            requested_nulls,
            achieved_nulls_rad,
            achieved_nulls_deg,
            invisible_nulls: prepared.invisible_nulls.clone(),
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthesis::contract::{synthesize, synthesize_input};
    use approx::assert_relative_eq;

    #[test]
    fn test_two_nulls_give_three_elements() {
        let input = NullPlacementInput::new(AngleUnit::Degrees, 0.5, 90.0, vec![60.0, 120.0]);
        let result = synthesize_input(&NullPlacement::default(), input).unwrap();

        assert_eq!(result.n_elements, 3);
        assert_eq!(result.layout, Layout::Unilateral);
        // (z - j)(z + j) = 1 + z^2
        assert_relative_eq!(result.excitations[0].re, 1.0, epsilon = 1e-12);
        assert_relative_eq!(result.excitations[1].norm(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(result.excitations[2].re, 1.0, epsilon = 1e-12);
        assert_eq!(result.polynomial, "1.00 + z^2");
    }

    #[test]
    fn test_requested_nulls_are_deep() {
        let input = NullPlacementInput::new(AngleUnit::Degrees, 0.5, 90.0, vec![45.0, 100.0, 150.0]);
        let result = synthesize_input(&NullPlacement::default(), input).unwrap();
        let metrics = result.null_placement().unwrap();

        assert_eq!(metrics.requested_nulls.len(), 3);
        for null in &metrics.requested_nulls {
            assert!(null.reached, "{:?}", null);
        }
        assert!(metrics.achieved_nulls_deg.len() >= 3);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_null_at_main_beam_warns() {
        let input = NullPlacementInput::new(AngleUnit::Degrees, 0.5, 90.0, vec![90.0, 30.0]);
        let result = synthesize_input(&NullPlacement::default(), input).unwrap();
        assert_eq!(result.warning_codes(), vec!["warning_null_at_main_beam:90.000".to_string()]);
    }

    #[test]
    fn test_non_finite_nulls_are_invisible() {
        let input = NullPlacementInput::new(AngleUnit::Degrees, 0.5, 90.0, vec![60.0, f64::INFINITY]);
        let result = synthesize_input(&NullPlacement::default(), input).unwrap();
        assert_eq!(result.n_elements, 2);
        assert_eq!(result.null_placement().unwrap().invisible_nulls.len(), 1);
        assert_eq!(result.warning_codes(), vec!["warning_nulls_in_invisible_region".to_string()]);

        let input = NullPlacementInput::new(AngleUnit::Degrees, 0.5, 90.0, vec![f64::NAN]);
        let err = synthesize_input(&NullPlacement::default(), input).unwrap_err();
        assert_eq!(err, SynthesisError::EmptyNullPositions);
    }

    #[test]
    fn test_validation_before_numeric_work() {
        let m = NullPlacement::default();
        let empty = NullPlacementInput::new(AngleUnit::Degrees, 0.5, 90.0, vec![]);
        assert_eq!(
            synthesize_input(&m, empty).unwrap_err().code(),
            "error_null_positions_cannot_be_empty"
        );
        let bad_d = NullPlacementInput::new(AngleUnit::Degrees, -0.5, 90.0, vec![60.0]);
        assert_eq!(
            synthesize_input(&m, bad_d).unwrap_err(),
            SynthesisError::SpacingMustBePositive
        );
    }

    #[test]
    fn test_parse_from_bag() {
        let params = ParamBag::new()
            .with("angle_unit", "radians")
            .with("d_lambda", 0.5)
            .with("theta0", "pi/2")
            .with("null_angles", "pi/3, 2*pi/3")
            .with("resolution", 1001);
        let result = synthesize(&NullPlacement::default(), &params).unwrap();
        assert_eq!(result.n_elements, 3);
        assert_eq!(result.theta_rad.len(), 1001);

        let missing = ParamBag::new().with("d_lambda", 0.5).with("theta0", 90.0);
        assert_eq!(
            synthesize(&NullPlacement::default(), &missing).unwrap_err().code(),
            "missing_parameter:null_angles"
        );
    }

    #[test]
    fn test_achieved_null_indices_include_deep_endpoints() {
        let m = NullPlacement::default();
        let db = Array1::from(vec![-50.0, -10.0, -45.0, -10.0, 0.0, -20.0, -60.0]);
        assert_eq!(m.achieved_null_indices(&db), vec![0, 2, 6]);
    }
}
