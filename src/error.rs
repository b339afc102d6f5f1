//! Errors raised while fingerprinting a warning.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Coarse classification of a [`FingerprintError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The path could not be opened as a readable file.
    NotFound,
    /// Reading or decoding the file failed.
    Io,
}

#[derive(Debug, Error)]
pub enum FingerprintError {
    #[error("cannot open {}: {source}", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed {encoding} input in {}", path.display())]
    Malformed { path: PathBuf, encoding: &'static str },

    #[error("unsupported encoding label '{label}'")]
    UnsupportedEncoding { label: String },
}

impl FingerprintError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FingerprintError::NotFound { .. } => ErrorKind::NotFound,
            FingerprintError::Io { .. }
            | FingerprintError::Malformed { .. }
            | FingerprintError::UnsupportedEncoding { .. } => ErrorKind::Io,
        }
    }
}
