//! Error types for I/O operations

use std::path::PathBuf;
use thiserror::Error;

/// Result type for STL I/O
pub type IoResult<T> = Result<T, IoError>;

/// Errors that can occur during I/O operations
#[derive(Error, Debug)]
pub enum IoError {
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("Unsupported mesh format: .{extension}")]
    UnsupportedFormat { extension: String },

    #[error("Invalid STL content: {message}")]
    InvalidContent { message: String },

    #[error("Invalid face count: header declares {expected}, data holds {got}")]
    InvalidFaceCount { expected: u32, got: u32 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl IoError {
    /// Create an `InvalidContent` error with the given message
    pub fn invalid_content(message: impl Into<String>) -> Self {
        Self::InvalidContent {
            message: message.into(),
        }
    }
}

impl From<IoError> for stlform_core::Error {
    fn from(e: IoError) -> Self {
        match e {
            IoError::Io(e) => stlform_core::Error::Io(e),
            IoError::FileNotFound { .. } => stlform_core::Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                e.to_string(),
            )),
            IoError::UnsupportedFormat { extension } => {
                stlform_core::Error::UnsupportedFormat(format!(".{extension}"))
            }
            other => stlform_core::Error::InvalidData(other.to_string()),
        }
    }
}
