//! Structured error types for tabview.
//!
//! Every failure is local: callers surface the message and keep their
//! previous state.

/// All errors that can occur while talking to the calculation service or
/// decoding its payloads.
#[derive(Debug, thiserror::Error)]
pub enum TabviewError {
    /// The service answered with a non-success status. `message` is the
    /// payload's `error` field, shown to the user verbatim.
    #[error("{message}")]
    Remote { status: u16, message: String },

    /// The request never produced a response (network, CORS, timeout).
    #[error("Request failed: {0}")]
    Transport(String),

    /// Response body was not the JSON shape we expected.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid cell reference.
    #[error("Invalid cell reference: {0}")]
    CellRef(String),

    /// Configuration rejected by validation.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TabviewError>;

impl TabviewError {
    /// Message suitable for direct display in the host UI.
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    /// True for failures reported by the service itself rather than the transport.
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote { .. })
    }
}

impl From<String> for TabviewError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for TabviewError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<TabviewError> for wasm_bindgen::JsValue {
    fn from(e: TabviewError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
