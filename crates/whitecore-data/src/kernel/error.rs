//! # WhiteCore Kernel Errors
//!
//! Defines the crate-wide error type.
//!
//! [`Error`] folds the typed errors of each subsystem (plugins, storage,
//! configuration) together with kernel lifecycle and component registry
//! failures, so every public operation can return the shared [`Result`].
use std::path::PathBuf;
use std::result::Result as StdResult;

use crate::config::error::ConfigError;
use crate::plugin_system::error::PluginSystemError;
use crate::storage::error::StorageSystemError;
use thiserror::Error as ThisError;

/// Error type shared by the data service, its components and its plugins
#[derive(Debug, ThisError)]
pub enum Error {
    /// Specific, typed plugin system error
    #[error("Plugin system error: {0}")]
    PluginSystem(#[from] PluginSystemError),

    /// Specific, typed storage system error
    #[error("Storage system error: {0}")]
    StorageSystem(#[from] StorageSystemError),

    /// Configuration loading or parsing error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error occurring during a specific kernel lifecycle phase.
    #[error("Kernel lifecycle error during {phase:?}: {message}")]
    KernelLifecycleError {
        phase: KernelLifecyclePhase,
        component_name: Option<String>,
        message: String,
        #[source]
        source: Option<Box<Error>>,
    },

    /// Error related to module registry operations or lookup failures.
    #[error("Component registry error during operation '{operation}': {message}")]
    ComponentRegistryError {
        operation: String, // e.g., "RequestModuleInterface"
        component_name: Option<String>,
        message: String,
    },

    /// Generic error with message
    #[error("Error: {0}")]
    Other(String),
}

/// Represents a specific phase in the kernel's lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum KernelLifecyclePhase {
    #[error("Initialize")]
    Initialize,
    #[error("Start")]
    Start,
    #[error("RunPreCheck")]
    RunPreCheck,
    #[error("Shutdown")]
    Shutdown,
}

/// Shorthand for Result with our Error type
pub type Result<T> = StdResult<T, Error>;

impl From<&str> for Error {
    fn from(msg: &str) -> Self {
        Error::Other(msg.to_string())
    }
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::Other(msg)
    }
}

impl Error {
    /// Wrap an I/O error with the operation and path it happened on
    pub fn io(source: std::io::Error, operation: impl Into<String>, path: PathBuf) -> Self {
        Error::StorageSystem(StorageSystemError::io(source, operation, path))
    }

    /// Registry lookup failure for a component that must be present
    pub fn missing_component(operation: impl Into<String>, component_name: &str) -> Self {
        Error::ComponentRegistryError {
            operation: operation.into(),
            component_name: Some(component_name.to_string()),
            message: format!("{} is not registered", component_name),
        }
    }
}
