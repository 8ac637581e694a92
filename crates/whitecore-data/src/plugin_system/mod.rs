//! # WhiteCore Plugin System
//!
//! Storage plugins and how they are found.
//!
//! ## Key Submodules and Responsibilities:
//!
//! - **[`traits`]**: the [`DataPlugin`] trait every storage plugin implements.
//! - **[`capability`]**: [`Capability`] identifiers plugins are discovered by.
//! - **[`registry`]**: [`PluginRegistry`], the statically populated set of
//!   plugins, and the [`PluginDiscovery`] trait the data service consumes.
//! - **[`error`]**: [`PluginSystemError`](error::PluginSystemError).
pub mod capability;
pub mod error;
pub mod registry;
pub mod traits;

pub use capability::Capability;
pub use registry::{PluginDiscovery, PluginRegistry};
pub use traits::DataPlugin;
