//! Error types for cluster operations.

use thiserror::Error;

/// Errors raised by cluster retrieval and GeoJSON loading.
#[derive(Error, Debug)]
pub enum ClusterError {
    /// Filter argument is not a usable property-bag shape.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error while reading a collection from disk.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// GeoJSON or JSON decoding error.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for ClusterError {
    fn from(err: serde_json::Error) -> Self {
        ClusterError::Parse(err.to_string())
    }
}

/// Result type for cluster operations.
pub type Result<T> = std::result::Result<T, ClusterError>;
