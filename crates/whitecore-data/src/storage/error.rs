//! # WhiteCore Storage Errors
//!
//! Defines [`StorageSystemError`], raised by storage connectors when a
//! connection string is malformed or a file-based backend has no data path
//! to resolve against.
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageSystemError {
    #[error("I/O error during operation '{operation}' on path '{path}': {source}")]
    Io {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid connection string for {provider}: {reason}")]
    InvalidConnectionString { provider: String, reason: String },

    #[error("{provider} connector has no default data path to resolve '{file}' against")]
    MissingDataPath { provider: String, file: PathBuf },
}

// Helper for creating Io errors, ensuring path is always included.
impl StorageSystemError {
    pub fn io(source: std::io::Error, operation: impl Into<String>, path: PathBuf) -> Self {
        StorageSystemError::Io {
            source,
            operation: operation.into(),
            path,
        }
    }

    pub fn invalid_connection_string(provider: impl ToString, reason: impl Into<String>) -> Self {
        StorageSystemError::InvalidConnectionString {
            provider: provider.to_string(),
            reason: reason.into(),
        }
    }
}
