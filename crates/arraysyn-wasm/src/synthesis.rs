//! WASM bindings for a synthesis run

use arraysyn_core::{Engine, EngineConfig, ParamBag, SynthesisResult};
use js_sys::Float64Array;
use wasm_bindgen::prelude::*;

/// Result of one synthesis call
#[wasm_bindgen]
pub struct WasmSynthesis {
    inner: SynthesisResult,
}

fn to_array(values: impl Iterator<Item = f64>) -> Float64Array {
    let flat: Vec<f64> = values.collect();
    Float64Array::from(flat.as_slice())
}

#[wasm_bindgen]
impl WasmSynthesis {
    /// Run a synthesis method
    ///
    /// Errors are thrown as the machine-readable code string, e.g.
    /// "missing_parameter:d_lambda".
    ///
    /// @param method - "null_placement", "fourier" or "constant_ripple"
    /// @param params_json - Request fields as a JSON object
    #[wasm_bindgen(constructor)]
    pub fn new(method: &str, params_json: &str) -> Result<WasmSynthesis, JsValue> {
        Self::with_config(method, params_json, "{}")
    }

    /// Run a synthesis method with an engine configuration (JSON)
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(method: &str, params_json: &str, config_json: &str) -> Result<WasmSynthesis, JsValue> {
        let code = |e: arraysyn_core::SynthesisError| JsValue::from_str(&e.code());
        let config = EngineConfig::from_json_str(config_json).map_err(code)?;
        let params = ParamBag::from_json(params_json).map_err(code)?;
        let inner = Engine::new(config)
            .and_then(|engine| engine.compute(method, &params))
            .map_err(code)?;
        Ok(WasmSynthesis { inner })
    }

    #[wasm_bindgen(getter)]
    pub fn method(&self) -> String {
        self.inner.method.to_string()
    }

    #[wasm_bindgen(getter, js_name = nElements)]
    pub fn n_elements(&self) -> usize {
        self.inner.n_elements
    }

    /// θ samples in degrees
    #[wasm_bindgen(getter, js_name = thetaDeg)]
    pub fn theta_deg(&self) -> Float64Array {
        to_array(self.inner.theta_deg.iter().cloned())
    }

    /// Peak-normalized pattern in dB
    #[wasm_bindgen(getter, js_name = afDb)]
    pub fn af_db(&self) -> Float64Array {
        to_array(self.inner.af_db.iter().cloned())
    }

    /// Real part of the normalized excitations
    #[wasm_bindgen(getter, js_name = excitationsRe)]
    pub fn excitations_re(&self) -> Float64Array {
        to_array(self.inner.excitations.iter().map(|z| z.re))
    }

    /// Imaginary part of the normalized excitations
    #[wasm_bindgen(getter, js_name = excitationsIm)]
    pub fn excitations_im(&self) -> Float64Array {
        to_array(self.inner.excitations.iter().map(|z| z.im))
    }

    #[wasm_bindgen(getter, js_name = directivityDb)]
    pub fn directivity_db(&self) -> f64 {
        self.inner.directivity.db
    }

    #[wasm_bindgen(getter, js_name = hpbwDeg)]
    pub fn hpbw_deg(&self) -> Option<f64> {
        self.inner.hpbw_deg
    }

    #[wasm_bindgen(getter)]
    pub fn polynomial(&self) -> String {
        self.inner.polynomial.clone()
    }

    #[wasm_bindgen(getter, js_name = visibleMargin)]
    pub fn visible_margin(&self) -> String {
        self.inner.visible_margin_deg.clone()
    }

    /// Warning codes
    #[wasm_bindgen(getter)]
    pub fn warnings(&self) -> Vec<JsValue> {
        self.inner
            .warning_codes()
            .into_iter()
            .map(|c| JsValue::from_str(&c))
            .collect()
    }

    /// Full result, method metrics included
    #[wasm_bindgen(js_name = toJson)]
    pub fn to_json(&self) -> Result<String, JsValue> {
        self.inner.to_json().map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
