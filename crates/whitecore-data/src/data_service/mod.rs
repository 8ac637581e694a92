//! # Data Service
//!
//! Bootstraps storage plugins: resolves the configured backend, builds its
//! connector, and initializes each discovered plugin with a duplicate of it.
//! See [`LocalDataService`].
pub mod backend;
pub mod report;
pub mod service;

pub use backend::BackendConfig;
pub use report::{BootstrapPhase, BootstrapReport, PluginOutcome};
pub use service::LocalDataService;

#[cfg(test)]
mod tests;
