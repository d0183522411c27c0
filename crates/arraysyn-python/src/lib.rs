//! Python bindings for arraysyn-core
//!
//! This module exposes the synthesis engine to Python via PyO3.
//!
//! ## Classes
//!
//! - `Engine` - Configured synthesis engine
//! - `SynthesisResult` - Excitations, array factor and metrics of one call

use arraysyn_core::logging::{init_logging as init_core_logging, LogConfig};
use pyo3::prelude::*;
use pyo3::types::PyDict;

mod engine;
mod result;

pub use engine::PyEngine;
pub use result::PySynthesisResult;

/// Install the stderr `tracing` subscriber
///
/// Args:
///     filter: Optional filter directive, e.g. 'arraysyn_core=debug'
///     development: Use the verbose development preset (default: False)
///
/// Returns:
///     False when a subscriber was already installed
#[pyfunction]
#[pyo3(signature = (filter=None, development=false))]
fn init_logging(filter: Option<String>, development: bool) -> bool {
    let base = if development {
        LogConfig::development()
    } else {
        LogConfig::default()
    };
    init_core_logging(&LogConfig {
        filter: filter.or(base.filter.clone()),
        ..base
    })
}

/// Run a synthesis method with the default engine
///
/// Args:
///     method: 'null_placement', 'fourier' or 'constant_ripple'
///     **kwargs: Request fields
///
/// Returns:
///     dict of numpy arrays and scalars
#[pyfunction]
#[pyo3(signature = (method, **kwargs))]
fn compute<'py>(
    py: Python<'py>,
    method: &str,
    kwargs: Option<&Bound<'py, PyDict>>,
) -> PyResult<Bound<'py, PyDict>> {
    PyEngine::new(None, None)?.compute(method, kwargs)?.to_dict(py)
}

/// arraysyn_python - Linear antenna array synthesis in Rust
///
/// Example:
///     >>> import arraysyn_python as arraysyn
///     >>> engine = arraysyn.Engine()
///     >>> r = engine.compute("null_placement", d_lambda=0.5, theta0=90, null_angles="60, 120")
///     >>> print(r.n_elements, r.polynomial)
#[pymodule]
fn arraysyn_python(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyEngine>()?;
    m.add_class::<PySynthesisResult>()?;
    m.add_function(wrap_pyfunction!(compute, m)?)?;
    m.add_function(wrap_pyfunction!(init_logging, m)?)?;

    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}
