//! Error types for lazy evaluation.

use thiserror::Error;

use crate::leaf::LeafRequest;

/// Errors raised while evaluating an expression.
///
/// The only failure the expression tree itself can meet is a leaf whose
/// external lookup did not succeed. Structural errors belong to the tensor
/// layer ([`flowcorr_core::CoreError`]).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LazyError {
    /// An external leaf could not be resolved.
    #[error("Leaf fetch failed for '{request}': {reason}")]
    LeafFetchFailed { request: String, reason: String },
}

impl LazyError {
    /// The requested quantity is absent from the source.
    pub fn not_found(request: &LeafRequest) -> Self {
        LazyError::LeafFetchFailed {
            request: request.to_string(),
            reason: "not found".to_string(),
        }
    }

    /// The source failed for some other reason.
    pub fn failed(request: &LeafRequest, reason: impl Into<String>) -> Self {
        LazyError::LeafFetchFailed {
            request: request.to_string(),
            reason: reason.into(),
        }
    }

    /// Rendering of the request that failed.
    pub fn request(&self) -> &str {
        match self {
            LazyError::LeafFetchFailed { request, .. } => request,
        }
    }
}
