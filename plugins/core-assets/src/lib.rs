use async_trait::async_trait;
use log::{info, warn};
use tokio::sync::Mutex;
use whitecore_data::kernel::error::Result as KernelResult;
use whitecore_data::plugin_system::{Capability, DataPlugin};
use whitecore_data::storage::{ConnectionSession, DataConnector};
use whitecore_data::{ConfigSource, ModuleRegistry};

/// Capability served by asset storage plugins
pub const ASSET_DATA: Capability = Capability::new("asset-data");

/// Migrator name the asset store registers its schema under
pub const MIGRATOR_NAME: &str = "Assets";

/// Optional section letting the asset store use its own database
pub const ASSETS_SECTION: &str = "AssetsData";

/// Connection string override inside [`ASSETS_SECTION`]
pub const CONNECTION_STRING_KEY: &str = "ConnectionString";

/// Core data plugin for the asset store.
///
/// Assets may be served from a remote asset service instead of local
/// storage, so a missing connector only leaves the plugin idle.
#[derive(Default)]
pub struct AssetsPlugin {
    connector: Mutex<Option<Box<dyn DataConnector>>>,
}

impl AssetsPlugin {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn session(&self) -> Option<ConnectionSession> {
        self.connector.lock().await.as_ref().and_then(|c| c.session().cloned())
    }
}

// Non-empty AssetsData.ConnectionString wins over the shared connection string
fn effective_connection_string(config: &ConfigSource, shared: &str) -> String {
    config
        .section(ASSETS_SECTION)
        .and_then(|section| section.get_string(CONNECTION_STRING_KEY))
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| shared.to_string())
}

#[async_trait]
impl DataPlugin for AssetsPlugin {
    fn name(&self) -> &str {
        "core-assets"
    }

    fn capabilities(&self) -> Vec<Capability> {
        vec![ASSET_DATA]
    }

    async fn initialize(
        &self,
        connector: Option<Box<dyn DataConnector>>,
        config: &ConfigSource,
        _registry: &ModuleRegistry,
        connection_string: &str,
    ) -> KernelResult<()> {
        let Some(mut connector) = connector else {
            warn!("No storage connector for the asset store, staying idle");
            return Ok(());
        };

        let connection_string = effective_connection_string(config, connection_string);
        connector.connect(&connection_string, MIGRATOR_NAME)?;
        info!("Asset store connected using {}", connector.provider());
        *self.connector.lock().await = Some(connector);
        Ok(())
    }

    async fn shutdown(&self) -> KernelResult<()> {
        if let Some(mut connector) = self.connector.lock().await.take() {
            connector.close();
        }
        Ok(())
    }
}
