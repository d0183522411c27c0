//! Self-description of the synthesis variants for external forms

use serde::Serialize;
use std::f64::consts::PI;

use super::params::ParamValue;
use crate::constants::{RESOLUTION_MAX, RESOLUTION_MIN};
use crate::grid::AngleUnit;
use crate::pattern::Layout;

/// Widget-level type of an input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    Float,
    Integer,
    /// Scalar angle; text expressions such as `pi/2` are accepted
    Angle,
    /// Comma-separated angle list
    AngleList,
    Choice,
}

/// One request field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputDescriptor {
    pub name: String,
    pub kind: InputKind,
    pub required: bool,
    pub default: Option<ParamValue>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub choices: Vec<&'static str>,
}

impl InputDescriptor {
    fn new(name: &str, kind: InputKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            required: true,
            default: None,
            min: None,
            max: None,
            choices: Vec::new(),
        }
    }

    pub fn float(name: &str, default: f64, min: f64, max: f64) -> Self {
        Self {
            default: Some(ParamValue::Number(default)),
            min: Some(min),
            max: Some(max),
            ..Self::new(name, InputKind::Float)
        }
    }

    pub fn integer(name: &str, default: usize, min: usize, max: usize) -> Self {
        Self {
            default: Some(ParamValue::Number(default as f64)),
            min: Some(min as f64),
            max: Some(max as f64),
            ..Self::new(name, InputKind::Integer)
        }
    }

    /// Angle over [0, π] expressed in `unit`
    pub fn angle(name: &str, default_rad: f64, unit: AngleUnit) -> Self {
        Self {
            default: Some(ParamValue::Number(unit.from_radians(default_rad))),
            min: Some(0.0),
            max: Some(unit.from_radians(PI)),
            ..Self::new(name, InputKind::Angle)
        }
    }

    pub fn angle_list(name: &str, default: &str) -> Self {
        Self {
            default: Some(ParamValue::Text(default.to_string())),
            ..Self::new(name, InputKind::AngleList)
        }
    }

    pub fn choice(name: &str, choices: &[&'static str], default: &'static str) -> Self {
        Self {
            default: Some(ParamValue::Text(default.to_string())),
            choices: choices.to_vec(),
            ..Self::new(name, InputKind::Choice)
        }
    }

    /// Mark as optional; the default is used when the field is absent
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }
}

/// Name, description, layout and inputs of one variant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodDescriptor {
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub layout: Layout,
    pub inputs: Vec<InputDescriptor>,
}

/// Inputs every variant accepts: unit, resolution, spacing and steering
pub(crate) fn common_inputs(
    unit: AngleUnit,
    resolution: usize,
    d_lambda_max: f64,
) -> Vec<InputDescriptor> {
    vec![
        InputDescriptor::choice("angle_unit", &["degrees", "radians"], unit.as_str()).optional(),
        InputDescriptor::integer("resolution", resolution, RESOLUTION_MIN, RESOLUTION_MAX).optional(),
        InputDescriptor::float("d_lambda", 0.5, 0.001, d_lambda_max),
        InputDescriptor::angle("theta0", PI / 2.0, unit),
    ]
}
