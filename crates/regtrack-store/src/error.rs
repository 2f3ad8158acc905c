use std::path::PathBuf;

use regtrack_core::RegulationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("regulation file not found: {0}")]
    ConfigMissing(PathBuf),

    #[error("malformed regulation file {path}: {source}")]
    ConfigMalformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid regulation at index {index} in {path}: {source}")]
    InvalidRegulation {
        path: PathBuf,
        index: usize,
        #[source]
        source: RegulationError,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("could not replace {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: tempfile::PersistError,
    },
}

impl StoreError {
    /// Whether this is a configuration problem that should stop the run.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Self::ConfigMissing(_) | Self::ConfigMalformed { .. } | Self::InvalidRegulation { .. }
        )
    }
}

/// A contract document that could not be read or written.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("unsupported document type: {0:?}")]
    Unsupported(PathBuf),

    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot extract text from {path}: {reason}")]
    Extract { path: PathBuf, reason: String },

    #[error("cannot render {path}: {reason}")]
    Render { path: PathBuf, reason: String },
}
