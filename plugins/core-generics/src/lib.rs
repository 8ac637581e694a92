use async_trait::async_trait;
use log::info;
use tokio::sync::Mutex;
use whitecore_data::kernel::error::Result as KernelResult;
use whitecore_data::plugin_system::error::PluginSystemError;
use whitecore_data::plugin_system::{Capability, DataPlugin};
use whitecore_data::storage::{ConnectionSession, DataConnector};
use whitecore_data::{ConfigSource, ModuleRegistry};

/// Migrator name the generics store registers its schema under
pub const MIGRATOR_NAME: &str = "Generics";

/// Core data plugin backing generic records (per-owner key/value data).
///
/// Requires a storage connector: without a configured backend there is
/// nowhere to keep the records, so initialization fails.
#[derive(Default)]
pub struct GenericsPlugin {
    connector: Mutex<Option<Box<dyn DataConnector>>>,
}

impl GenericsPlugin {
    pub fn new() -> Self {
        Self::default()
    }

    /// The session of the held connector, if connected
    pub async fn session(&self) -> Option<ConnectionSession> {
        self.connector.lock().await.as_ref().and_then(|c| c.session().cloned())
    }
}

#[async_trait]
impl DataPlugin for GenericsPlugin {
    fn name(&self) -> &str {
        "core-generics"
    }

    fn capabilities(&self) -> Vec<Capability> {
        vec![Capability::DATA]
    }

    async fn initialize(
        &self,
        connector: Option<Box<dyn DataConnector>>,
        _config: &ConfigSource,
        _registry: &ModuleRegistry,
        connection_string: &str,
    ) -> KernelResult<()> {
        let Some(mut connector) = connector else {
            return Err(PluginSystemError::InitializationError {
                plugin_id: self.name().to_string(),
                message: "no storage connector configured".to_string(),
            }
            .into());
        };

        connector.connect(connection_string, MIGRATOR_NAME)?;
        info!("Generics store connected using {}", connector.provider());
        *self.connector.lock().await = Some(connector);
        Ok(())
    }

    async fn shutdown(&self) -> KernelResult<()> {
        if let Some(mut connector) = self.connector.lock().await.take() {
            connector.close();
            info!("Generics store disconnected");
        }
        Ok(())
    }
}
