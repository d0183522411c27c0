//! Python bindings for the synthesis engine

use arraysyn_core::synthesis::ParamValue;
use arraysyn_core::{Engine, EngineConfig, ParamBag, SynthesisError};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::result::PySynthesisResult;

/// Map an engine error to `ValueError` carrying its machine-readable code
pub(crate) fn to_py_err(e: SynthesisError) -> PyErr {
    PyValueError::new_err(e.code())
}

fn to_param_value(name: &str, value: &Bound<'_, PyAny>) -> PyResult<ParamValue> {
    if let Ok(text) = value.extract::<String>() {
        return Ok(ParamValue::Text(text));
    }
    if let Ok(number) = value.extract::<f64>() {
        return Ok(ParamValue::Number(number));
    }
    if let Ok(list) = value.extract::<Vec<f64>>() {
        return Ok(ParamValue::List(list));
    }
    Err(PyValueError::new_err(format!("error_invalid_parameter:{}", name)))
}

/// Python wrapper for Engine
#[pyclass(name = "Engine")]
pub struct PyEngine {
    inner: Engine,
}

#[pymethods]
impl PyEngine {
    /// Create an engine
    ///
    /// Args:
    ///     config_json: Optional JSON engine configuration
    ///     config_path: Optional path to a JSON configuration file
    #[new]
    #[pyo3(signature = (config_json=None, config_path=None))]
    pub fn new(config_json: Option<&str>, config_path: Option<&str>) -> PyResult<Self> {
        let config = match (config_json, config_path) {
            (Some(text), _) => EngineConfig::from_json_str(text).map_err(to_py_err)?,
            (None, Some(path)) => EngineConfig::from_file(path).map_err(to_py_err)?,
            (None, None) => EngineConfig::default(),
        };
        Engine::new(config).map(|inner| Self { inner }).map_err(to_py_err)
    }

    /// Run a synthesis variant
    ///
    /// Args:
    ///     method: 'null_placement', 'fourier' or 'constant_ripple'
    ///     **kwargs: Request fields; angles may be numbers or text such as 'pi/2'
    ///
    /// Raises:
    ///     ValueError: with the error code, e.g. 'missing_parameter:d_lambda'
    #[pyo3(signature = (method, **kwargs))]
    pub fn compute(&self, method: &str, kwargs: Option<&Bound<'_, PyDict>>) -> PyResult<PySynthesisResult> {
        let mut params = ParamBag::new();
        if let Some(kwargs) = kwargs {
            for (key, value) in kwargs.iter() {
                let name: String = key.extract()?;
                let value = to_param_value(&name, &value)?;
                params.insert(&name, value);
            }
        }

        self.inner
            .compute(method, &params)
            .map(PySynthesisResult::from_result)
            .map_err(to_py_err)
    }

    /// Input descriptors of every variant as a JSON string
    pub fn catalog_json(&self) -> PyResult<String> {
        serde_json::to_string(&self.inner.catalog()).map_err(|e| PyValueError::new_err(e.to_string()))
    }

    /// Names of the available variants
    #[staticmethod]
    pub fn methods() -> Vec<&'static str> {
        arraysyn_core::MethodKind::ALL.iter().map(|k| k.as_str()).collect()
    }

    /// Effective configuration as JSON
    pub fn config_json(&self) -> PyResult<String> {
        self.inner.config().to_json_string().map_err(to_py_err)
    }
}
