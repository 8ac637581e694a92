use crate::kernel::component::ModuleRegistry;
use crate::kernel::error::Result;
use crate::kernel::simulation::SimulationBase;
use crate::storage::connector::DataConnector;
use crate::storage::mysql::MySqlConnector;
use crate::storage::provider::StorageProviderKind;
use crate::storage::sqlite::SqliteConnector;

/// Builds the canonical connector for a configured provider
#[derive(Debug, Clone, Copy, Default)]
pub struct ConnectorFactory;

impl ConnectorFactory {
    /// Build a connector for `provider_name`.
    ///
    /// Unknown or empty names give `Ok(None)`: plugins are still initialized,
    /// just without a connector. File-based backends need [`SimulationBase`]
    /// in the registry for their default data path; a registry without it
    /// is a provisioning bug and is returned as an error.
    pub fn build(
        provider_name: &str,
        registry: &ModuleRegistry,
    ) -> Result<Option<Box<dyn DataConnector>>> {
        let Some(kind) = StorageProviderKind::from_name(provider_name) else {
            if provider_name.is_empty() {
                log::info!("No storage provider configured, data plugins get no connector");
            } else {
                log::info!(
                    "Unsupported storage provider '{}', data plugins get no connector",
                    provider_name
                );
            }
            return Ok(None);
        };

        let connector: Box<dyn DataConnector> = match kind {
            StorageProviderKind::MySql => Box::new(MySqlConnector::new()),
            StorageProviderKind::Sqlite => {
                let mut connector = SqliteConnector::new();
                let sim_base = registry.require_module_interface::<SimulationBase>()?;
                connector.set_default_data_path(sim_base.default_data_path().to_path_buf());
                Box::new(connector)
            }
        };
        log::info!("Built {} storage connector", kind);
        Ok(Some(connector))
    }
}
