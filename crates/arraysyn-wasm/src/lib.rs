//! WASM bindings for arraysyn-core
//!
//! This module exposes the synthesis engine to JavaScript/WASM.

use wasm_bindgen::prelude::*;

mod synthesis;

pub use synthesis::WasmSynthesis;

/// Get the library version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Names of the available synthesis methods
#[wasm_bindgen]
pub fn methods() -> Vec<JsValue> {
    arraysyn_core::MethodKind::ALL
        .iter()
        .map(|k| JsValue::from_str(k.as_str()))
        .collect()
}

/// Input descriptors of every method as a JSON string
#[wasm_bindgen(js_name = catalogJson)]
pub fn catalog_json() -> Result<String, JsValue> {
    serde_json::to_string(&arraysyn_core::Engine::default().catalog())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
