//! The six-stage synthesis contract and its orchestration
//!
//! Every variant implements [`SynthesisMethod`]. The stage order is fixed by
//! [`synthesize`] / [`synthesize_input`], which variants cannot override:
//!
//! ```text
//! parse -> validate -> prepare -> compute_excitations
//!       -> compute_array_factor -> post_process -> format_output
//! ```
//!
//! Each stage consumes the previous stage's value and returns a new one.
//! Excitations and the raw array factor are cleaned of sub-threshold
//! components as they leave their compute stage.
//! Validation and preparation errors abort the call before any excitation is
//! computed, so no partial result can escape.

use ndarray::Array1;
use num_complex::Complex64;
use tracing::{debug, debug_span, warn};

use super::catalog::MethodDescriptor;
use super::params::ParamBag;
use super::result::SynthesisResult;
use crate::error::{Result, SynthesisWarning};
use crate::pattern::{Layout, ZeroSmallParts};

/// Non-fatal conditions collected while a request runs
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    warnings: Vec<SynthesisWarning>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a warning and log it
    pub fn warn(&mut self, warning: SynthesisWarning) {
        warn!(code = %warning.code(), "{}", warning);
        self.warnings.push(warning);
    }

    pub fn warnings(&self) -> &[SynthesisWarning] {
        &self.warnings
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn into_warnings(self) -> Vec<SynthesisWarning> {
        self.warnings
    }
}

/// Raw numeric output handed from the compute stages to formatting
#[derive(Debug, Clone)]
pub struct Intermediate {
    /// Unnormalized excitations
    pub excitations: Array1<Complex64>,
    /// Raw complex array factor on the display grid
    pub af: Array1<Complex64>,
}

/// A synthesis algorithm
pub trait SynthesisMethod {
    /// Typed request
    type Input;
    /// Request after validation (may carry values derived while validating)
    type Validated;
    /// Grids and constants needed by the compute stages
    type Prepared;

    /// Stable identifier, e.g. `null_placement`
    fn name(&self) -> &'static str;

    /// Element index convention of the produced excitations
    fn layout(&self) -> Layout;

    /// Name, description, layout and inputs for external forms
    fn descriptor(&self) -> MethodDescriptor;

    fn parse(&self, params: &ParamBag) -> Result<Self::Input>;

    fn validate(&self, input: Self::Input, diagnostics: &mut Diagnostics) -> Result<Self::Validated>;

    fn prepare(&self, validated: Self::Validated, diagnostics: &mut Diagnostics) -> Result<Self::Prepared>;

    fn compute_excitations(&self, prepared: &Self::Prepared) -> Array1<Complex64>;

    fn compute_array_factor(
        &self,
        excitations: &Array1<Complex64>,
        prepared: &Self::Prepared,
    ) -> Array1<Complex64>;

    /// Optional hook between array factor and formatting; identity by default
    fn post_process(&self, intermediate: Intermediate, _prepared: &Self::Prepared) -> Intermediate {
        intermediate
    }

    fn format_output(
        &self,
        intermediate: Intermediate,
        prepared: Self::Prepared,
        diagnostics: Diagnostics,
    ) -> SynthesisResult;
}

/// Run the full pipeline from loosely typed parameters
pub fn synthesize<M: SynthesisMethod + ?Sized>(method: &M, params: &ParamBag) -> Result<SynthesisResult> {
    let span = debug_span!("synthesize", method = method.name());
    let _guard = span.enter();

    debug!(stage = "parse", n_params = params.iter().count());
    let input = method.parse(params)?;
    run_stages(method, input)
}

/// Run the pipeline from an already typed request (skips `parse`)
pub fn synthesize_input<M: SynthesisMethod + ?Sized>(method: &M, input: M::Input) -> Result<SynthesisResult> {
    let span = debug_span!("synthesize", method = method.name());
    let _guard = span.enter();

    run_stages(method, input)
}

fn run_stages<M: SynthesisMethod + ?Sized>(method: &M, input: M::Input) -> Result<SynthesisResult> {
    let mut diagnostics = Diagnostics::new();

    debug!(stage = "validate");
    let validated = method.validate(input, &mut diagnostics)?;

    debug!(stage = "prepare");
    let prepared = method.prepare(validated, &mut diagnostics)?;

    let excitations = method.compute_excitations(&prepared).zero_small_parts();
    debug!(stage = "compute_excitations", n_elements = excitations.len());

    let af = method.compute_array_factor(&excitations, &prepared).zero_small_parts();
    debug!(stage = "compute_array_factor", resolution = af.len());

    let intermediate = method.post_process(Intermediate { excitations, af }, &prepared);

    let result = method.format_output(intermediate, prepared, diagnostics);
    debug!(
        stage = "format_output",
        directivity_db = result.directivity.db,
        warnings = result.warnings.len()
    );
    Ok(result)
}
