//! Dispatch over the three variants and the configured engine

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::info;

use super::catalog::MethodDescriptor;
use super::constant_ripple::{ConstantRipple, ConstantRippleInput};
use super::contract::{synthesize, synthesize_input, SynthesisMethod};
use super::fourier::{Fourier, FourierInput};
use super::null_placement::{NullPlacement, NullPlacementInput};
use super::params::ParamBag;
use super::result::SynthesisResult;
use crate::config::EngineConfig;
use crate::error::{Result, SynthesisError};
use crate::pattern::Layout;

/// Identity of a synthesis variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodKind {
    NullPlacement,
    Fourier,
    ConstantRipple,
}

impl MethodKind {
    pub const ALL: [MethodKind; 3] = [
        MethodKind::NullPlacement,
        MethodKind::Fourier,
        MethodKind::ConstantRipple,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MethodKind::NullPlacement => "null_placement",
            MethodKind::Fourier => "fourier",
            MethodKind::ConstantRipple => "constant_ripple",
        }
    }
}

impl FromStr for MethodKind {
    type Err = SynthesisError;

    /// Accepts the canonical names and the classical method names
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "null_placement" | "schelkunoff" => Ok(MethodKind::NullPlacement),
            "fourier" | "multi_beam_fourier" => Ok(MethodKind::Fourier),
            "constant_ripple" | "dolph_chebyshev" | "chebyshev" => Ok(MethodKind::ConstantRipple),
            _ => Err(SynthesisError::UnknownMethod(s.trim().to_string())),
        }
    }
}

impl std::fmt::Display for MethodKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A configured variant
#[derive(Debug, Clone, PartialEq)]
pub enum Method {
    NullPlacement(NullPlacement),
    Fourier(Fourier),
    ConstantRipple(ConstantRipple),
}

impl Method {
    pub fn new(kind: MethodKind, config: &EngineConfig) -> Self {
        match kind {
            MethodKind::NullPlacement => Method::NullPlacement(NullPlacement::from_config(config)),
            MethodKind::Fourier => Method::Fourier(Fourier::from_config(config)),
            MethodKind::ConstantRipple => Method::ConstantRipple(ConstantRipple::from_config(config)),
        }
    }

    pub fn kind(&self) -> MethodKind {
        match self {
            Method::NullPlacement(_) => MethodKind::NullPlacement,
            Method::Fourier(_) => MethodKind::Fourier,
            Method::ConstantRipple(_) => MethodKind::ConstantRipple,
        }
    }

    pub fn layout(&self) -> Layout {
        match self {
            Method::NullPlacement(m) => m.layout(),
            Method::Fourier(m) => m.layout(),
            Method::ConstantRipple(m) => m.layout(),
        }
    }

    pub fn descriptor(&self) -> MethodDescriptor {
        match self {
            Method::NullPlacement(m) => m.descriptor(),
            Method::Fourier(m) => m.descriptor(),
            Method::ConstantRipple(m) => m.descriptor(),
        }
    }

    /// Full pipeline from loosely typed parameters
    pub fn compute(&self, params: &ParamBag) -> Result<SynthesisResult> {
        match self {
            Method::NullPlacement(m) => synthesize(m, params),
            Method::Fourier(m) => synthesize(m, params),
            Method::ConstantRipple(m) => synthesize(m, params),
        }
    }
}

/// A typed request for any variant
#[derive(Debug, Clone, PartialEq)]
pub enum SynthesisRequest {
    NullPlacement(NullPlacementInput),
    Fourier(FourierInput),
    ConstantRipple(ConstantRippleInput),
}

impl SynthesisRequest {
    pub fn kind(&self) -> MethodKind {
        match self {
            SynthesisRequest::NullPlacement(_) => MethodKind::NullPlacement,
            SynthesisRequest::Fourier(_) => MethodKind::Fourier,
            SynthesisRequest::ConstantRipple(_) => MethodKind::ConstantRipple,
        }
    }
}

/// Entry point holding a validated configuration
///
/// Stateless between calls; one engine can serve any number of requests.
///
/// # Example
/// ```
/// use arraysyn_core::{Engine, ParamBag};
///
/// let engine = Engine::default();
/// let params = ParamBag::new()
///     .with("d_lambda", 0.5)
///     .with("theta0", 90.0)
///     .with("null_angles", vec![60.0, 120.0]);
/// let result = engine.compute("null_placement", &params).unwrap();
/// assert_eq!(result.n_elements, 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn method(&self, kind: MethodKind) -> Method {
        Method::new(kind, &self.config)
    }

    /// Run the variant named `method` on loosely typed parameters
    pub fn compute(&self, method: &str, params: &ParamBag) -> Result<SynthesisResult> {
        let kind: MethodKind = method.parse()?;
        info!(method = kind.as_str(), "synthesis request");
        self.method(kind).compute(params)
    }

    /// Run a typed request
    pub fn run(&self, request: SynthesisRequest) -> Result<SynthesisResult> {
        info!(method = request.kind().as_str(), "synthesis request");
        match request {
            SynthesisRequest::NullPlacement(input) => {
                synthesize_input(&NullPlacement::from_config(&self.config), input)
            }
            SynthesisRequest::Fourier(input) => synthesize_input(&Fourier::from_config(&self.config), input),
            SynthesisRequest::ConstantRipple(input) => {
                synthesize_input(&ConstantRipple::from_config(&self.config), input)
            }
        }
    }

    /// Descriptors of all variants
    pub fn catalog(&self) -> Vec<MethodDescriptor> {
        MethodKind::ALL
            .iter()
            .map(|&kind| self.method(kind).descriptor())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::AngleUnit;

    #[test]
    fn test_method_kind_aliases() {
        assert_eq!("Dolph-Chebyshev".parse::<MethodKind>(), Ok(MethodKind::ConstantRipple));
        assert_eq!("schelkunoff".parse::<MethodKind>(), Ok(MethodKind::NullPlacement));
        assert_eq!("multi beam fourier".parse::<MethodKind>(), Ok(MethodKind::Fourier));
        assert_eq!(
            "binomial".parse::<MethodKind>().unwrap_err().code(),
            "error_unknown_method:binomial"
        );
    }

    #[test]
    fn test_catalog_lists_every_variant() {
        let catalog = Engine::default().catalog();
        let names: Vec<&str> = catalog.iter().map(|d| d.name).collect();
        assert_eq!(names, ["null_placement", "fourier", "constant_ripple"]);
        assert_eq!(catalog[0].layout, Layout::Unilateral);
        assert_eq!(catalog[2].layout, Layout::Symmetric);
        assert!(catalog[1].inputs.iter().any(|i| i.name == "beam_shape"));
    }

    #[test]
    fn test_engine_rejects_bad_config() {
        let config = EngineConfig {
            resolution: 3,
            ..Default::default()
        };
        assert_eq!(Engine::new(config).unwrap_err().code(), "error_invalid_config");
    }

    #[test]
    fn test_typed_request_uses_config_normalization() {
        let mut config = EngineConfig::default();
        config.normalization.null_placement = Some(crate::pattern::NormalizationMethod::Max);
        let engine = Engine::new(config).unwrap();

        let request = SynthesisRequest::NullPlacement(NullPlacementInput::new(
            AngleUnit::Degrees,
            0.5,
            90.0,
            vec![60.0, 120.0],
        ));
        let result = engine.run(request).unwrap();
        assert_eq!(result.normalization, crate::pattern::NormalizationMethod::Max);
    }

    #[test]
    fn test_method_dispatch() {
        let engine = Engine::default();
        for kind in MethodKind::ALL {
            let method = engine.method(kind);
            assert_eq!(method.kind(), kind);
            assert_eq!(method.descriptor().name, kind.as_str());
        }
    }
}
