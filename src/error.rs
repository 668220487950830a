//! Errors raised while loading level data and launch parameters
//!
//! The simulation itself never fails; only the I/O boundary does.

use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum LoadError {
    Io { path: PathBuf, message: String },
    Json { what: &'static str, message: String },
}

impl LoadError {
    pub fn io(path: &Path, err: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }

    pub fn json(what: &'static str, err: serde_json::Error) -> Self {
        Self::Json {
            what,
            message: err.to_string(),
        }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, message } => {
                write!(f, "failed to read {}: {message}", path.display())
            }
            Self::Json { what, message } => write!(f, "malformed {what}: {message}"),
        }
    }
}

impl std::error::Error for LoadError {}

/// Read a whole file, mapping failures to [`LoadError::Io`]
pub(crate) fn read_file(path: &Path) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|err| LoadError::io(path, err))
}
