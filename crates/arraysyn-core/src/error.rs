//! Error and warning vocabulary
//!
//! Errors abort a synthesis call before any numeric work starts (or, for
//! infeasible designs, before excitations are computed). Warnings are
//! non-fatal and travel inside a successful result.
//!
//! Both carry a short machine-readable `code()` that external callers are
//! expected to localize; the `Display` text is for logs only.

use serde::Serialize;
use thiserror::Error;

/// Broad category of a [`SynthesisError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    MissingParameter,
    InvalidParameter,
    RangeValidation,
    ShapeValidation,
    UnknownVariant,
    InfeasibleDesign,
    Configuration,
}

/// Synthesis errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SynthesisError {
    #[error("missing required parameter '{0}'")]
    MissingParameter(String),

    #[error("parameter '{name}' could not be parsed: {value}")]
    InvalidParameter { name: String, value: String },

    #[error("could not parse null angle list")]
    UnparsableNullAngles,

    #[error("could not parse angles of beam #{0}")]
    UnparsableBeamAngles(usize),

    #[error("invalid angle expression: {0}")]
    InvalidAngleExpression(String),

    #[error("element spacing must be positive and finite")]
    SpacingMustBePositive,

    #[error("resolution must be at least {min}, got {got}")]
    ResolutionTooSmall { min: usize, got: usize },

    #[error("resolution must not exceed {max}, got {got}")]
    ResolutionTooLarge { max: usize, got: usize },

    #[error("main beam angle must lie in [0, π] rad")]
    SteeringAngleOutOfRange,

    #[error("number of elements must be at least {min}, got {got}")]
    TooFewElements { min: usize, got: usize },

    #[error("number of elements must not exceed {max}, got {got}")]
    TooManyElements { max: usize, got: usize },

    #[error("sidelobe level must be finite")]
    SidelobeLevelNotFinite,

    #[error("null positions cannot be empty")]
    EmptyNullPositions,

    #[error("number of beams must be at least 1")]
    TooFewBeams,

    #[error("expected {expected} beam angles (a start and an end per beam), got {got}")]
    BeamAngleCountMismatch { expected: usize, got: usize },

    #[error("angles of beam #{0} must lie in [0, π] rad")]
    BeamAngleOutOfRange(usize),

    #[error("start angle of beam #{0} must be strictly less than its end angle")]
    BeamAnglesNotIncreasing(usize),

    #[error("unknown beam shape '{0}'")]
    UnknownBeamShape(String),

    #[error("unknown normalization method '{0}'")]
    UnknownNormalizationMethod(String),

    #[error("unknown angle unit '{0}'")]
    UnknownAngleUnit(String),

    #[error("unknown synthesis method '{0}'")]
    UnknownMethod(String),

    #[error("N/SLL combination not achievable: Chebyshev scaling factor x0 = {x0} <= 1")]
    InfeasibleDesign { x0: f64 },

    #[error("element spacing {d_lambda:.3} exceeds the maximum {d_max:.3} for the requested sidelobe level")]
    SpacingExceedsMaximum { d_lambda: f64, d_max: f64 },

    #[error("invalid configuration: {0}")]
    Configuration(String),
}

impl SynthesisError {
    /// Machine-readable code, optionally suffixed with the offending data
    pub fn code(&self) -> String {
        match self {
            SynthesisError::MissingParameter(name) => format!("missing_parameter:{}", name),
            SynthesisError::InvalidParameter { name, .. } => {
                format!("error_invalid_parameter:{}", name)
            }
            SynthesisError::UnparsableNullAngles => "error_could_not_parse_null_angles".into(),
            SynthesisError::UnparsableBeamAngles(beam) => {
                format!("error_could_not_parse_beam_angles:{}", beam)
            }
            SynthesisError::InvalidAngleExpression(text) => {
                format!("error_invalid_angle_expression:{}", text)
            }
            SynthesisError::SpacingMustBePositive => "error_d_lambda_must_be_positive".into(),
            SynthesisError::ResolutionTooSmall { min, .. } => {
                format!("error_resolution_must_be_at_least_{}", min)
            }
            SynthesisError::ResolutionTooLarge { max, .. } => {
                format!("error_resolution_must_not_exceed_{}", max)
            }
            SynthesisError::SteeringAngleOutOfRange => "error_main_beam_angle_out_of_range".into(),
            SynthesisError::TooFewElements { min, .. } => {
                format!("error_number_of_elements_min_{}", min)
            }
            SynthesisError::TooManyElements { max, .. } => {
                format!("error_number_of_elements_max_{}", max)
            }
            SynthesisError::SidelobeLevelNotFinite => "error_sidelobe_level_must_be_finite".into(),
            SynthesisError::EmptyNullPositions => "error_null_positions_cannot_be_empty".into(),
            SynthesisError::TooFewBeams => "error_number_of_beams_min_1".into(),
            SynthesisError::BeamAngleCountMismatch { expected, got } => {
                format!("error_beam_angle_count_mismatch:{}:{}", expected, got)
            }
            SynthesisError::BeamAngleOutOfRange(beam) => {
                format!("error_beam_angle_out_of_range:{}", beam)
            }
            SynthesisError::BeamAnglesNotIncreasing(beam) => {
                format!("error_beam_start_must_be_less_than_end:{}", beam)
            }
            SynthesisError::UnknownBeamShape(shape) => {
                format!("error_unknown_beam_shape:{}", shape)
            }
            SynthesisError::UnknownNormalizationMethod(method) => {
                format!("error_unknown_normalization_method:{}", method)
            }
            SynthesisError::UnknownAngleUnit(unit) => format!("error_unknown_angle_unit:{}", unit),
            SynthesisError::UnknownMethod(method) => format!("error_unknown_method:{}", method),
            SynthesisError::InfeasibleDesign { .. } => "error_chebyshev_design_infeasible".into(),
            SynthesisError::SpacingExceedsMaximum { .. } => "error_spacing_exceeds_maximum".into(),
            SynthesisError::Configuration(_) => "error_invalid_config".into(),
        }
    }

    /// Category of the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            SynthesisError::MissingParameter(_) => ErrorKind::MissingParameter,
            SynthesisError::InvalidParameter { .. }
            | SynthesisError::UnparsableNullAngles
            | SynthesisError::UnparsableBeamAngles(_)
            | SynthesisError::InvalidAngleExpression(_) => ErrorKind::InvalidParameter,
            SynthesisError::SpacingMustBePositive
            | SynthesisError::ResolutionTooSmall { .. }
            | SynthesisError::ResolutionTooLarge { .. }
            | SynthesisError::SteeringAngleOutOfRange
            | SynthesisError::TooFewElements { .. }
            | SynthesisError::TooManyElements { .. }
            | SynthesisError::SidelobeLevelNotFinite
            | SynthesisError::EmptyNullPositions
            | SynthesisError::TooFewBeams => ErrorKind::RangeValidation,
            SynthesisError::BeamAngleCountMismatch { .. }
            | SynthesisError::BeamAngleOutOfRange(_)
            | SynthesisError::BeamAnglesNotIncreasing(_) => ErrorKind::ShapeValidation,
            SynthesisError::UnknownBeamShape(_)
            | SynthesisError::UnknownNormalizationMethod(_)
            | SynthesisError::UnknownAngleUnit(_)
            | SynthesisError::UnknownMethod(_) => ErrorKind::UnknownVariant,
            SynthesisError::InfeasibleDesign { .. } | SynthesisError::SpacingExceedsMaximum { .. } => {
                ErrorKind::InfeasibleDesign
            }
            SynthesisError::Configuration(_) => ErrorKind::Configuration,
        }
    }
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, SynthesisError>;

/// Non-fatal conditions reported alongside a successful result
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SynthesisWarning {
    /// A requested null sits on the steering direction
    NullAtMainBeam { angle_deg: f64 },
    /// Nulls that no real angle can reach; excluded from synthesis and verification
    InvisibleNulls { angles: Vec<f64> },
    /// Negative SLL given; its magnitude is used instead
    NegativeSidelobeLevel { given_db: f64 },
    /// Spacing exceeds the maximum compatible with the requested SLL
    SpacingExceedsMaximum { d_lambda: f64, d_max: f64, sll_db: f64 },
}

impl SynthesisWarning {
    /// Machine-readable code
    pub fn code(&self) -> String {
        match self {
            SynthesisWarning::NullAtMainBeam { angle_deg } => {
                format!("warning_null_at_main_beam:{:.3}", angle_deg)
            }
            SynthesisWarning::InvisibleNulls { .. } => "warning_nulls_in_invisible_region".into(),
            SynthesisWarning::NegativeSidelobeLevel { .. } => {
                "warning_negative_sidelobe_level".into()
            }
            SynthesisWarning::SpacingExceedsMaximum { .. } => {
                "warning_spacing_exceeds_maximum".into()
            }
        }
    }
}

impl std::fmt::Display for SynthesisWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SynthesisWarning::NullAtMainBeam { angle_deg } => {
                write!(f, "null at main beam direction {:.3} deg", angle_deg)
            }
            SynthesisWarning::InvisibleNulls { angles } => {
                write!(f, "nulls in invisible region: {:?}", angles)
            }
            SynthesisWarning::NegativeSidelobeLevel { given_db } => write!(
                f,
                "negative sidelobe level provided ({} dB), using its absolute value",
                given_db
            ),
            SynthesisWarning::SpacingExceedsMaximum {
                d_lambda,
                d_max,
                sll_db,
            } => write!(
                f,
                "element spacing d = {:.3} exceeds recommended maximum d_max = {:.3}; \
                 SLL = {:.1} dB may not be achievable",
                d_lambda, d_max, sll_db
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_carry_offending_data() {
        assert_eq!(
            SynthesisError::MissingParameter("d_lambda".into()).code(),
            "missing_parameter:d_lambda"
        );
        assert_eq!(
            SynthesisError::UnknownBeamShape("hexagonal".into()).code(),
            "error_unknown_beam_shape:hexagonal"
        );
        assert_eq!(
            SynthesisError::BeamAngleCountMismatch {
                expected: 4,
                got: 3
            }
            .code(),
            "error_beam_angle_count_mismatch:4:3"
        );
        assert_eq!(
            SynthesisError::TooManyElements { max: 100, got: 101 }.code(),
            "error_number_of_elements_max_100"
        );
        assert_eq!(
            SynthesisError::ResolutionTooSmall { min: 16, got: 4 }.code(),
            "error_resolution_must_be_at_least_16"
        );
    }

    #[test]
    fn test_kinds() {
        assert_eq!(
            SynthesisError::SpacingMustBePositive.kind(),
            ErrorKind::RangeValidation
        );
        assert_eq!(
            SynthesisError::BeamAnglesNotIncreasing(1).kind(),
            ErrorKind::ShapeValidation
        );
        assert_eq!(
            SynthesisError::InfeasibleDesign { x0: 1.0 }.kind(),
            ErrorKind::InfeasibleDesign
        );
    }

    #[test]
    fn test_warning_codes() {
        let w = SynthesisWarning::SpacingExceedsMaximum {
            d_lambda: 1.0,
            d_max: 0.9,
            sll_db: 30.0,
        };
        assert_eq!(w.code(), "warning_spacing_exceeds_maximum");
        assert!(w.to_string().contains("0.900"));
    }
}
