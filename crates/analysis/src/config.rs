//! # Configuration
//!
//! Analysis drivers read a small JSON document. Every field has a default,
//! so `{}` is a valid configuration.
//!
//! ```json
//! {
//!   "sweep": { "prefix": "v1", "separator": ".", "fail_fast": false },
//!   "logging": { "filter": "flowcorr=debug", "format": "compact" }
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// Top-level configuration of an analysis run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub sweep: SweepConfig,
    pub logging: LoggingConfig,
}

impl AnalysisConfig {
    /// Parse from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, AnalysisError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, AnalysisError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

/// How results of a sweep are named and how missing leaves are treated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// Prepended to every result name; empty for none.
    pub prefix: String,
    /// Placed between the prefix and the cell label.
    pub separator: String,
    /// Abort on the first missing leaf instead of skipping the cell.
    pub fail_fast: bool,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            separator: ".".to_string(),
            fail_fast: false,
        }
    }
}

impl SweepConfig {
    /// Full result name for a cell label.
    pub fn result_name(&self, label: &str) -> String {
        if self.prefix.is_empty() {
            label.to_string()
        } else {
            format!("{}{}{}", self.prefix, self.separator, label)
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Multi-line human-readable output
    #[default]
    Pretty,
    /// One line per event
    Compact,
    /// JSON objects for log shippers
    Json,
}

/// Tracing subscriber settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive; `RUST_LOG` takes precedence when set.
    pub filter: String,
    pub format: LogFormat,
    pub with_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "flowcorr=info,warn".to_string(),
            format: LogFormat::default(),
            with_target: true,
        }
    }
}
