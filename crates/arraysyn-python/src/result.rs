//! Python bindings for SynthesisResult

use arraysyn_core::synthesis::MethodMetrics;
use arraysyn_core::SynthesisResult;
use num_complex::Complex64;
use numpy::{PyArray1, ToPyArray};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;

/// Python wrapper for SynthesisResult
#[pyclass(name = "SynthesisResult")]
pub struct PySynthesisResult {
    inner: SynthesisResult,
}

impl PySynthesisResult {
    pub(crate) fn from_result(inner: SynthesisResult) -> Self {
        Self { inner }
    }
}

#[pymethods]
impl PySynthesisResult {
    /// Variant that produced this result
    #[getter]
    pub fn method(&self) -> &'static str {
        self.inner.method
    }

    /// Element layout ('unilateral' or 'symmetric')
    #[getter]
    pub fn layout(&self) -> &'static str {
        self.inner.layout.as_str()
    }

    #[getter]
    pub fn n_elements(&self) -> usize {
        self.inner.n_elements
    }

    /// Normalized excitations as complex numpy array [n_elements]
    #[getter]
    pub fn excitations<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<Complex64>> {
        self.inner.excitations.to_pyarray(py)
    }

    #[getter]
    pub fn raw_excitations<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<Complex64>> {
        self.inner.raw_excitations.to_pyarray(py)
    }

    /// Complex array factor as numpy array [resolution]
    #[getter]
    pub fn af<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<Complex64>> {
        self.inner.af.to_pyarray(py)
    }

    /// Peak-normalized pattern in dB as numpy array [resolution]
    #[getter]
    pub fn af_db<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        self.inner.af_db.to_pyarray(py)
    }

    #[getter]
    pub fn theta_rad<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        self.inner.theta_rad.to_pyarray(py)
    }

    #[getter]
    pub fn theta_deg<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        self.inner.theta_deg.to_pyarray(py)
    }

    #[getter]
    pub fn psi_rad<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        self.inner.psi_rad.to_pyarray(py)
    }

    /// Directivity in dB
    #[getter]
    pub fn directivity_db(&self) -> f64 {
        self.inner.directivity.db
    }

    /// Half-power beamwidth in degrees, None without two -3 dB crossings
    #[getter]
    pub fn hpbw_deg(&self) -> Option<f64> {
        self.inner.hpbw_deg
    }

    #[getter]
    pub fn visible_margin_deg(&self) -> String {
        self.inner.visible_margin_deg.clone()
    }

    /// Array polynomial display string
    #[getter]
    pub fn polynomial(&self) -> String {
        self.inner.polynomial.clone()
    }

    /// Warning codes
    #[getter]
    pub fn warnings(&self) -> Vec<String> {
        self.inner.warning_codes()
    }

    /// Result mapping as a dict of numpy arrays and scalars
    pub fn to_dict<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let r = &self.inner;
        let dict = PyDict::new(py);
        dict.set_item("method", r.method)?;
        dict.set_item("layout", r.layout.as_str())?;
        dict.set_item("n_elements", r.n_elements)?;
        dict.set_item("excitations", r.excitations.to_pyarray(py))?;
        dict.set_item("raw_excitations", r.raw_excitations.to_pyarray(py))?;
        dict.set_item("af", r.af.to_pyarray(py))?;
        dict.set_item("af_normalized", r.af_normalized.to_pyarray(py))?;
        dict.set_item("af_db", r.af_db.to_pyarray(py))?;
        dict.set_item("theta_rad", r.theta_rad.to_pyarray(py))?;
        dict.set_item("theta_deg", r.theta_deg.to_pyarray(py))?;
        dict.set_item("psi_rad", r.psi_rad.to_pyarray(py))?;
        dict.set_item("d_lambda", r.d_lambda)?;
        dict.set_item("theta0_rad", r.theta0_rad)?;
        dict.set_item("alpha_rad", r.alpha_rad)?;
        dict.set_item("directivity_linear", r.directivity.linear)?;
        dict.set_item("directivity_db", r.directivity.db)?;
        dict.set_item("hpbw_deg", r.hpbw_deg)?;
        dict.set_item("visible_margin_min_rad", r.visible_margin.psi_min_rad)?;
        dict.set_item("visible_margin_max_rad", r.visible_margin.psi_max_rad)?;
        dict.set_item("visible_margin_rad", &r.visible_margin_rad)?;
        dict.set_item("visible_margin_deg", &r.visible_margin_deg)?;
        dict.set_item("polynomial", &r.polynomial)?;
        dict.set_item("warnings", r.warning_codes())?;
        dict.set_item("metrics", metrics_dict(py, &r.metrics)?)?;
        Ok(dict)
    }

    /// Full result, variant metrics included, as JSON
    pub fn to_json(&self) -> PyResult<String> {
        self.inner.to_json().map_err(|e| PyValueError::new_err(e.to_string()))
    }

    fn __repr__(&self) -> String {
        format!(
            "SynthesisResult(method='{}', n_elements={}, directivity_db={:.2})",
            self.inner.method, self.inner.n_elements, self.inner.directivity.db
        )
    }
}

/// Variant metrics as a nested dict, arrays as numpy arrays
fn metrics_dict<'py>(py: Python<'py>, metrics: &MethodMetrics) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);
    match metrics {
        MethodMetrics::NullPlacement(m) => {
            dict.set_item("variant", "null_placement")?;
            dict.set_item("null_depth_threshold_db", m.null_depth_threshold_db)?;
            let requested = m
                .requested_nulls
                .iter()
                .map(|null| {
                    let entry = PyDict::new(py);
                    entry.set_item("angle_rad", null.angle_rad)?;
                    entry.set_item("angle_deg", null.angle_deg)?;
                    entry.set_item("depth_db", null.depth_db)?;
                    entry.set_item("reached", null.reached)?;
                    Ok(entry)
                })
                .collect::<PyResult<Vec<_>>>()?;
            dict.set_item("requested_nulls", requested)?;
            dict.set_item("achieved_nulls_rad", &m.achieved_nulls_rad)?;
            dict.set_item("achieved_nulls_deg", &m.achieved_nulls_deg)?;
            dict.set_item("invisible_nulls", &m.invisible_nulls)?;
        }
        MethodMetrics::Fourier(m) => {
            dict.set_item("variant", "fourier")?;
            dict.set_item("beam_shape", m.beam_shape.as_str())?;
            dict.set_item("beams_rad", m.beams_rad.clone())?;
            dict.set_item("integration_resolution", m.integration_resolution)?;
            dict.set_item("desired_af", m.desired_af.to_pyarray(py))?;
            dict.set_item("desired_af_normalized", m.desired_af_normalized.to_pyarray(py))?;
            dict.set_item("desired_af_db", m.desired_af_db.to_pyarray(py))?;
            dict.set_item("desired_directivity_linear", m.desired_directivity.linear)?;
            dict.set_item("desired_directivity_db", m.desired_directivity.db)?;
            dict.set_item("beam_energy_fraction", m.beam_energy_fraction)?;
        }
        MethodMetrics::ConstantRipple(m) => {
            dict.set_item("variant", "constant_ripple")?;
            dict.set_item("order", m.design.order)?;
            dict.set_item("sidelobe_level_db", m.design.sidelobe_level_db)?;
            dict.set_item("r", m.design.r)?;
            dict.set_item("x0", m.design.x0)?;
            dict.set_item("d_max", m.design.d_max)?;
            dict.set_item("d_opt", m.design.d_opt)?;
            dict.set_item("achieved_sll_db", m.achieved_sll_db)?;
        }
    }
    Ok(dict)
}
