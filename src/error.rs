use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};

#[derive(Debug, Error)]
pub enum LandingError {
    #[error("element not found: {0}")]
    MissingElement(&'static str),
    #[error("no {0} context available")]
    NoContext(&'static str),
    #[error("invalid config value for {key}: {value:?}")]
    InvalidConfig { key: String, value: String },
    #[error("js error: {0}")]
    Js(String),
}

impl From<JsValue> for LandingError {
    fn from(value: JsValue) -> Self {
        let message = value
            .as_string()
            .or_else(|| {
                value
                    .dyn_ref::<js_sys::Error>()
                    .map(|e| String::from(e.message()))
            })
            .unwrap_or_else(|| format!("{:?}", value));
        LandingError::Js(message)
    }
}
