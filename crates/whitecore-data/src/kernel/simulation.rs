use std::path::{Path, PathBuf};
use async_trait::async_trait;

use crate::config::ConfigSource;
use crate::kernel::component::{KernelComponent, KernelContext};
use crate::kernel::constants;
use crate::kernel::error::{Error, Result};

/// Shared simulation infrastructure exposed through the module registry.
///
/// Currently this is the default data directory, which file-based storage
/// connectors use to resolve relative database files.
#[derive(Debug, Clone)]
pub struct SimulationBase {
    default_data_path: PathBuf,
}

impl SimulationBase {
    pub fn new(default_data_path: impl Into<PathBuf>) -> Self {
        Self {
            default_data_path: default_data_path.into(),
        }
    }

    /// Build from the `Startup` section, falling back to [`constants::DEFAULT_DATA_DIR`].
    pub fn from_config(config: &ConfigSource) -> Self {
        let path = config
            .section(constants::STARTUP_SECTION)
            .and_then(|section| section.get_string(constants::DATA_DIRECTORY_KEY))
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| constants::DEFAULT_DATA_DIR.to_string());
        Self::new(path)
    }

    pub fn default_data_path(&self) -> &Path {
        &self.default_data_path
    }
}

#[async_trait]
impl KernelComponent for SimulationBase {
    fn name(&self) -> &'static str {
        "SimulationBase"
    }

    async fn initialize(&self, _context: &KernelContext<'_>) -> Result<()> {
        tokio::fs::create_dir_all(&self.default_data_path)
            .await
            .map_err(|e| Error::io(e, "create_data_dir", self.default_data_path.clone()))?;
        log::debug!("Default data path: {}", self.default_data_path.display());
        Ok(())
    }

    async fn start(&self) -> Result<()> {
        Ok(())
    }

    async fn stop(&self) -> Result<()> {
        Ok(())
    }
}
