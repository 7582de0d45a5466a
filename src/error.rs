//! Error type shared by the loading, reporting and configuration code.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors raised by the ECG rhythm pipeline.
///
/// Numeric stages (peak detection, classification) never fail; only file
/// access, configuration and summary statistics can.
#[derive(Debug, Error)]
pub enum EcgError {
    #[error("i/o failure on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
    #[error("failed to parse configuration: {0}")]
    Config(String),
    #[error("insufficient data: need at least {required} peaks, got {actual}")]
    InsufficientData { required: usize, actual: usize },
}

impl EcgError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        EcgError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Returns `true` for file access failures.
    pub fn is_io(&self) -> bool {
        matches!(self, EcgError::Io { .. })
    }
}

#[cfg(feature = "serde")]
impl From<serde_json::Error> for EcgError {
    fn from(value: serde_json::Error) -> Self {
        EcgError::Config(value.to_string())
    }
}

pub type Result<T> = std::result::Result<T, EcgError>;
