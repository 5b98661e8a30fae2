//! Error types for analysis drivers.

use thiserror::Error;

use flowcorr_core::CoreError;
use flowcorr_lazy::LazyError;

/// Errors that can occur while building or sweeping an analysis.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Axes were composed incorrectly.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A leaf could not be fetched and the sweep does not tolerate it.
    #[error(transparent)]
    Lazy(#[from] LazyError),

    /// Configuration could not be parsed, or a result could not be encoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Two cells of one sweep would be stored under the same name.
    #[error("Duplicate result name '{name}'")]
    DuplicateResult { name: String },

    /// Reading configuration or writing results failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The tracing subscriber could not be installed.
    #[error("Logging setup failed: {message}")]
    Logging { message: String },
}
