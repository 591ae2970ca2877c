//! Structured error types for gridview.
//!
//! The engine itself never fails: out-of-range input is clamped or rejected
//! with a `false` return. Errors only come from the edges (configuration and
//! content loading, host rendering).

/// All errors that can occur while configuring or hosting a grid.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// JSON (de)serialization error from serde_json.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration values that violate an invariant.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Host rendering error.
    #[error("Render error: {0}")]
    Render(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridError>;

#[cfg(target_arch = "wasm32")]
impl From<GridError> for wasm_bindgen::JsValue {
    fn from(e: GridError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
