use std::fmt;

use thiserror::Error;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

/// Which half of the shader program a compile error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

#[derive(Debug, Error)]
pub enum EffectError {
    #[error("no global `window`")]
    NoWindow,
    #[error("window has no `document`")]
    NoDocument,
    #[error("WebGL2 not supported")]
    WebGl2Unsupported,
    #[error("{stage} shader failed to compile: {log}")]
    ShaderCompile { stage: ShaderStage, log: String },
    #[error("shader program failed to link: {0}")]
    ProgramLink(String),
    #[error("shader program has no active attribute `{0}`")]
    MissingAttribute(&'static str),
    #[error("could not create WebGL {0}")]
    GlCreate(&'static str),
    #[error("fetching {url} failed with HTTP {status}")]
    Fetch { url: String, status: u16 },
    #[error("image {0} could not be decoded")]
    ImageLoad(String),
    #[error("invalid effect config: {0}")]
    Config(String),
    #[error("invalid effect config JSON: {0}")]
    ConfigJson(#[from] serde_json::Error),
    #[error("JS exception: {0}")]
    Js(String),
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for EffectError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        let message = value
            .as_string()
            .or_else(|| {
                value
                    .dyn_ref::<js_sys::Error>()
                    .map(|e| String::from(e.message()))
            })
            .unwrap_or_else(|| format!("{value:?}"));
        EffectError::Js(message)
    }
}

#[cfg(target_arch = "wasm32")]
impl From<EffectError> for wasm_bindgen::JsValue {
    fn from(err: EffectError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}
