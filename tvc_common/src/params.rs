//! Persisted parameter store types.
//!
//! The store itself is external; this module only names the keys the
//! controller reads and the errors a read can produce.

use thiserror::Error;

/// Feature toggle key for vision turn control.
pub const TURN_VISION_CONTROL_KEY: &str = "TurnVisionControl";

/// Error reading a persisted parameter.
#[derive(Debug, Error)]
pub enum ParamsError {
    /// Underlying I/O failure.
    #[error("param store I/O error for '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Stored value is not a boolean.
    #[error("param '{key}' has non-boolean value '{value}'")]
    InvalidValue { key: String, value: String },
}

/// Parse the stored representation of a boolean param.
///
/// `1` is true; `0` or an empty value is false. Surrounding whitespace is ignored.
pub fn parse_bool(key: &str, raw: &str) -> Result<bool, ParamsError> {
    match raw.trim() {
        "1" => Ok(true),
        "0" | "" => Ok(false),
        other => Err(ParamsError::InvalidValue {
            key: key.to_string(),
            value: other.to_string(),
        }),
    }
}
