//! # Configuration Errors
//!
//! [`ConfigError`] covers reading configuration files, picking a format from
//! the file extension, and (de)serializing sections.
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error reading configuration '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported configuration format: {0}")]
    UnsupportedFormat(PathBuf),

    #[error("Serialization to '{format}' failed: {source}")]
    Serialization {
        format: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    #[error("Deserialization from '{format}' failed: {source}")]
    Deserialization {
        format: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    #[error("Configuration section '{0}' is not a table of keys")]
    InvalidSection(String),
}

impl ConfigError {
    pub(crate) fn serialization<E>(format: &str, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        ConfigError::Serialization {
            format: format.to_string(),
            source: Box::new(source),
        }
    }

    pub(crate) fn deserialization<E>(format: &str, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        ConfigError::Deserialization {
            format: format.to_string(),
            source: Box::new(source),
        }
    }
}
