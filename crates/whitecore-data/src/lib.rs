pub mod config;
pub mod data_service;
pub mod kernel;
pub mod plugin_system;
pub mod storage;

// Re-export key public types/traits for the host binary and data plugins
pub use config::{ConfigData, ConfigSource};
pub use data_service::{BootstrapReport, LocalDataService};
pub use kernel::Application;
pub use kernel::error::Error as KernelError;
pub use kernel::{ModuleRegistry, SimulationBase};
pub use plugin_system::{Capability, DataPlugin, PluginDiscovery, PluginRegistry};
pub use storage::{ConnectorFactory, DataConnector, StorageProviderKind};

#[cfg(test)]
mod tests;
