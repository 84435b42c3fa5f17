//! Error types for scanthin

use thiserror::Error;

/// Main error type for scanthin operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    
    #[error("Index {index} out of range for point set of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
    
    #[error("Invalid data: {0}")]
    InvalidData(String),
    
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Result type alias for scanthin operations
pub type Result<T> = std::result::Result<T, Error>;
