//! Loosely typed request parameters
//!
//! A [`ParamBag`] is what external callers (bindings, JSON requests) hand to
//! the engine. Each variant's `parse` stage turns it into a typed input.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::expr;
use crate::error::{Result, SynthesisError};
use crate::grid::AngleUnit;

/// A single request value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Number(f64),
    Text(String),
    List(Vec<f64>),
}

impl ParamValue {
    fn describe(&self) -> String {
        match self {
            ParamValue::Number(v) => v.to_string(),
            ParamValue::Text(s) => s.clone(),
            ParamValue::List(v) => format!("{:?}", v),
        }
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Number(v)
    }
}

impl From<usize> for ParamValue {
    fn from(v: usize) -> Self {
        ParamValue::Number(v as f64)
    }
}

impl From<i32> for ParamValue {
    fn from(v: i32) -> Self {
        ParamValue::Number(v as f64)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Text(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Text(v)
    }
}

impl From<Vec<f64>> for ParamValue {
    fn from(v: Vec<f64>) -> Self {
        ParamValue::List(v)
    }
}

impl From<&[f64]> for ParamValue {
    fn from(v: &[f64]) -> Self {
        ParamValue::List(v.to_vec())
    }
}

/// Named request parameters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParamBag(BTreeMap<String, ParamValue>);

impl ParamBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    ///
    /// # Example
    /// ```
    /// use arraysyn_core::synthesis::ParamBag;
    /// let params = ParamBag::new()
    ///     .with("d_lambda", 0.5)
    ///     .with("theta0", "pi/2")
    ///     .with("angle_unit", "radians");
    /// assert!(params.contains("theta0"));
    /// ```
    pub fn with(mut self, name: &str, value: impl Into<ParamValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: &str, value: impl Into<ParamValue>) {
        self.0.insert(name.to_string(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ParamValue)> {
        self.0.iter()
    }

    /// Parse a JSON object of parameters
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| SynthesisError::InvalidParameter {
            name: "params".to_string(),
            value: e.to_string(),
        })
    }

    fn require(&self, name: &str) -> Result<&ParamValue> {
        self.get(name)
            .ok_or_else(|| SynthesisError::MissingParameter(name.to_string()))
    }

    fn invalid(name: &str, value: &ParamValue) -> SynthesisError {
        SynthesisError::InvalidParameter {
            name: name.to_string(),
            value: value.describe(),
        }
    }

    /// Required real number; text is parsed as a plain float
    pub fn f64(&self, name: &str) -> Result<f64> {
        let value = self.require(name)?;
        match value {
            ParamValue::Number(v) => Ok(*v),
            ParamValue::Text(s) => s.trim().parse().map_err(|_| Self::invalid(name, value)),
            ParamValue::List(_) => Err(Self::invalid(name, value)),
        }
    }

    /// Required non-negative integer
    pub fn usize(&self, name: &str) -> Result<usize> {
        let value = self.require(name)?;
        let number = match value {
            ParamValue::Number(v) => *v,
            ParamValue::Text(s) => s.trim().parse().map_err(|_| Self::invalid(name, value))?,
            ParamValue::List(_) => return Err(Self::invalid(name, value)),
        };
        if !number.is_finite() || number < 0.0 || number.fract() != 0.0 {
            return Err(Self::invalid(name, value));
        }
        Ok(number as usize)
    }

    /// Optional integer, `default` when absent
    pub fn usize_or(&self, name: &str, default: usize) -> Result<usize> {
        if self.contains(name) {
            self.usize(name)
        } else {
            Ok(default)
        }
    }

    /// Required text
    pub fn text(&self, name: &str) -> Result<String> {
        let value = self.require(name)?;
        match value {
            ParamValue::Text(s) => Ok(s.trim().to_string()),
            _ => Err(Self::invalid(name, value)),
        }
    }

    /// Optional angle unit, `default` when absent
    pub fn angle_unit_or(&self, default: AngleUnit) -> Result<AngleUnit> {
        match self.get("angle_unit") {
            None => Ok(default),
            Some(ParamValue::Text(s)) => s.parse(),
            Some(other) => Err(Self::invalid("angle_unit", other)),
        }
    }

    /// Required angle in `unit`; text may be an expression such as `pi/2`
    ///
    /// The value is returned as given, not converted to radians.
    pub fn angle(&self, name: &str) -> Result<f64> {
        let value = self.require(name)?;
        match value {
            ParamValue::Number(v) => Ok(*v),
            ParamValue::Text(s) => expr::evaluate(s),
            ParamValue::List(_) => Err(Self::invalid(name, value)),
        }
    }

    /// Optional angle list; `None` when absent
    ///
    /// Text is split on commas and each item evaluated as an expression.
    /// Empty text yields an empty list. Any failure is reported as `on_error`.
    pub fn angle_list(&self, name: &str, on_error: SynthesisError) -> Result<Option<Vec<f64>>> {
        match self.get(name) {
            None => Ok(None),
            Some(ParamValue::List(v)) => Ok(Some(v.clone())),
            Some(ParamValue::Number(v)) => Ok(Some(vec![*v])),
            Some(ParamValue::Text(s)) => {
                let s = s.trim();
                if s.is_empty() {
                    return Ok(Some(Vec::new()));
                }
                s.split(',')
                    .map(|item| expr::evaluate(item).map_err(|_| on_error.clone()))
                    .collect::<Result<Vec<_>>>()
                    .map(Some)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_missing_parameter_code() {
        let bag = ParamBag::new();
        assert_eq!(bag.f64("d_lambda").unwrap_err().code(), "missing_parameter:d_lambda");
    }

    #[test]
    fn test_numbers_from_text() {
        let bag = ParamBag::new().with("d_lambda", " 0.25 ").with("n_elements", "8");
        assert_eq!(bag.f64("d_lambda").unwrap(), 0.25);
        assert_eq!(bag.usize("n_elements").unwrap(), 8);
    }

    #[test]
    fn test_usize_rejects_fractional_and_negative() {
        let bag = ParamBag::new().with("a", 2.5).with("b", -1.0).with("c", "x");
        for name in ["a", "b", "c"] {
            assert_eq!(
                bag.usize(name).unwrap_err().code(),
                format!("error_invalid_parameter:{}", name)
            );
        }
    }

    #[test]
    fn test_angle_expression() {
        let bag = ParamBag::new().with("theta0", "3*pi/4");
        assert_relative_eq!(bag.angle("theta0").unwrap(), 0.75 * PI);
    }

    #[test]
    fn test_angle_list_from_text() {
        let bag = ParamBag::new()
            .with("nulls", "60, 120,pi")
            .with("empty", "")
            .with("bad", "60, sixty");
        let nulls = bag
            .angle_list("nulls", SynthesisError::UnparsableNullAngles)
            .unwrap()
            .unwrap();
        assert_eq!(nulls.len(), 3);
        assert_relative_eq!(nulls[2], PI);
        assert_eq!(
            bag.angle_list("empty", SynthesisError::UnparsableNullAngles).unwrap(),
            Some(vec![])
        );
        assert_eq!(
            bag.angle_list("bad", SynthesisError::UnparsableNullAngles),
            Err(SynthesisError::UnparsableNullAngles)
        );
        assert_eq!(
            bag.angle_list("absent", SynthesisError::UnparsableNullAngles).unwrap(),
            None
        );
    }

    #[test]
    fn test_angle_unit() {
        let bag = ParamBag::new().with("angle_unit", "radians");
        assert_eq!(bag.angle_unit_or(AngleUnit::Degrees).unwrap(), AngleUnit::Radians);
        assert_eq!(ParamBag::new().angle_unit_or(AngleUnit::Degrees).unwrap(), AngleUnit::Degrees);
    }

    #[test]
    fn test_from_json() {
        let bag = ParamBag::from_json(
            r#"{"d_lambda": 0.5, "theta0": "pi/2", "null_angles": [60, 120], "resolution": 512}"#,
        )
        .unwrap();
        assert_eq!(bag.get("null_angles"), Some(&ParamValue::List(vec![60.0, 120.0])));
        assert_eq!(bag.usize("resolution").unwrap(), 512);
        assert!(ParamBag::from_json("[1, 2]").is_err());
    }
}
