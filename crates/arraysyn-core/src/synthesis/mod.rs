//! Synthesis module
//!
//! The shared six-stage contract, the three variants implementing it and the
//! dispatch layer in front of them.
//!
//! - `contract` - `SynthesisMethod` trait and the fixed orchestration
//! - `null_placement` - Schelkunoff null placement (unilateral)
//! - `fourier` - multi-beam Fourier series (symmetric)
//! - `constant_ripple` - Dolph-Chebyshev (symmetric)
//! - `method` - `Method` / `MethodKind` dispatch and the `Engine`

pub mod catalog;
pub mod constant_ripple;
pub mod contract;
pub mod expr;
pub mod fourier;
pub mod method;
pub mod null_placement;
pub mod params;
pub mod prepared;
pub mod result;

pub use catalog::{InputDescriptor, InputKind, MethodDescriptor};
pub use constant_ripple::{ChebyshevDesign, ConstantRipple, ConstantRippleInput, ConstantRippleMetrics};
pub use contract::{synthesize, synthesize_input, Diagnostics, Intermediate, SynthesisMethod};
pub use fourier::{BeamShape, Fourier, FourierInput, FourierMetrics};
pub use method::{Engine, Method, MethodKind, SynthesisRequest};
pub use null_placement::{NullDepth, NullPlacement, NullPlacementInput, NullPlacementMetrics};
pub use params::{ParamBag, ParamValue};
pub use prepared::{ArrayGeometry, PhaseReference, PreparedParameters};
pub use result::{MethodMetrics, PatternView, SynthesisResult};
