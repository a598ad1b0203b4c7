//! Conversion error types.

use delta_compiler::CompileError;
use delta_core::ErrorKind;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while converting a file.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Input unreadable or output unwritable.
    #[error("Cannot access '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Configuration file unreadable or invalid.
    #[error("Invalid config '{}': {message}", path.display())]
    Config { path: PathBuf, message: String },

    /// Error from parsing or compiling the instructions.
    #[error("{0}")]
    Compile(#[from] CompileError),
}

impl ConvertError {
    pub fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn config(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Self::Config {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ConvertError::Io { .. } => ErrorKind::Io,
            ConvertError::Config { .. } => ErrorKind::Config,
            ConvertError::Compile(err) => err.kind(),
        }
    }
}

/// Result type for conversion operations.
pub type ConvertResult<T> = Result<T, ConvertError>;
