use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that stop a run before any file is touched.
#[derive(Debug, Error)]
pub enum ScramblrError {
    #[error("invalid directory {}: {reason}", path.display())]
    InvalidDirectory { path: PathBuf, reason: String },

    #[error("a rename run is already in progress")]
    AlreadyRunning,

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ScramblrError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn invalid_directory(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidDirectory {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T, E = ScramblrError> = std::result::Result<T, E>;
