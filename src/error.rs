// Typed errors with thiserror. Only the JSON edges of the facade can fail;
// the run state machine itself treats invalid calls as no-ops.

use thiserror::Error;

/// Widget error types.
#[derive(Error, Debug)]
pub enum WidgetError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for WidgetError {
    fn from(err: serde_json::Error) -> Self {
        WidgetError::Serialization(err.to_string())
    }
}
