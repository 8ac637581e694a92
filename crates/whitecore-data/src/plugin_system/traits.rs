use async_trait::async_trait;

use crate::config::ConfigSource;
use crate::kernel::component::ModuleRegistry;
use crate::kernel::error::Result;
use crate::plugin_system::capability::Capability;
use crate::storage::DataConnector;

/// Core trait that all storage plugins must implement
#[async_trait]
pub trait DataPlugin: Send + Sync {
    /// The name of the plugin, used in diagnostics
    fn name(&self) -> &str;

    /// Capabilities this plugin is discovered under
    fn capabilities(&self) -> Vec<Capability> {
        vec![Capability::DATA]
    }

    /// Initialize the plugin.
    ///
    /// `connector` is a duplicate owned by this plugin from here on, or `None`
    /// when no storage provider is configured. Plugins must tolerate `None`.
    async fn initialize(
        &self,
        connector: Option<Box<dyn DataConnector>>,
        config: &ConfigSource,
        registry: &ModuleRegistry,
        connection_string: &str,
    ) -> Result<()>;

    /// Release the connector handed over by [`DataPlugin::initialize`].
    /// Also called for plugins whose initialization failed or panicked.
    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }
}
