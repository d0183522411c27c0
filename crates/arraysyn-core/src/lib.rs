//! arraysyn-core: Linear antenna array synthesis engine
//!
//! Computes complex element excitations and the resulting array factor for a
//! uniform linear array from a handful of design parameters.
//!
//! ## Modules
//!
//! - `grid` - Angle units and the θ sampling grid
//! - `math` - Numeric building blocks (conversions, integration, peaks, polynomials)
//! - `pattern` - Steering, visible margin, directivity, normalization
//! - `synthesis` - The synthesis contract, its three variants and the engine
//! - `config` - Engine configuration
//! - `logging` - `tracing` subscriber setup

pub mod config;
pub mod constants;
pub mod error;
pub mod grid;
pub mod logging;
pub mod math;
pub mod pattern;
pub mod synthesis;

pub use config::{EngineConfig, SpacingPolicy};
pub use error::{ErrorKind, Result, SynthesisError, SynthesisWarning};
pub use grid::{AngleUnit, AngularGrid};
pub use pattern::{Layout, NormalizationMethod};
pub use synthesis::{Engine, Method, MethodKind, ParamBag, SynthesisRequest, SynthesisResult};
