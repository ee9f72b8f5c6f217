//! STT interop error types

use thiserror::Error;

/// STT interop errors
#[derive(Error, Debug)]
pub enum SttError {
    /// JSON serialization failed
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
