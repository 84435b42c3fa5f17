//! Error types for I/O operations

use thiserror::Error;

/// Errors that can occur during I/O operations
#[derive(Error, Debug)]
pub enum IoError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },
    
    #[error("Invalid file format: {format}")]
    InvalidFormat { format: String },
    
    #[error("Parse error: {message}")]
    ParseError { message: String },
    
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<IoError> for scanthin_core::Error {
    fn from(err: IoError) -> Self {
        match err {
            IoError::Io(e) => scanthin_core::Error::Io(e),
            other => scanthin_core::Error::InvalidData(other.to_string()),
        }
    }
}
