#![cfg(test)]

use std::path::PathBuf;
use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;
use log::{Level, LevelFilter, Log, Metadata, Record};

use crate::config::{ConfigData, ConfigSource};
use crate::kernel::component::ModuleRegistry;
use crate::kernel::constants;
use crate::kernel::error::{Error, Result};
use crate::kernel::simulation::SimulationBase;
use crate::plugin_system::{Capability, DataPlugin};
use crate::storage::{DataConnector, StorageProviderKind};

// ===== LOG CAPTURE =====

struct CapturingLogger {
    records: Mutex<Vec<(Level, String)>>,
}

impl Log for CapturingLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if let Ok(mut records) = self.records.lock() {
            records.push((record.level(), record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

static LOGGER: CapturingLogger = CapturingLogger {
    records: Mutex::new(Vec::new()),
};
static INSTALL: Once = Once::new();

/// Install the capturing logger for the whole test binary.
/// Tests run in parallel, so assertions must filter on something unique to the test.
pub fn install_log_capture() {
    INSTALL.call_once(|| {
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(LevelFilter::Trace);
        }
    });
}

/// Captured warn-level messages containing `needle`
pub fn warnings_mentioning(needle: &str) -> Vec<String> {
    LOGGER
        .records
        .lock()
        .unwrap()
        .iter()
        .filter(|(level, message)| *level == Level::Warn && message.contains(needle))
        .map(|(_, message)| message.clone())
        .collect()
}

// ===== CONFIG / REGISTRY HELPERS =====

pub fn data_config(provider: &str, connection_string: &str) -> ConfigSource {
    ConfigSource::new().with_section(
        constants::DATA_SECTION,
        ConfigData::new()
            .with(constants::STORAGE_PROVIDER_KEY, provider)
            .with(constants::CONNECTION_STRING_KEY, connection_string),
    )
}

pub fn registry_with_data_path(path: &str) -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    registry.register_module_interface(Arc::new(SimulationBase::new(path)));
    registry
}

// ===== MOCK PLUGINS =====

/// What a recorded plugin received on one `initialize` call
#[derive(Debug, Clone)]
pub struct InitCall {
    pub plugin: String,
    pub provider: Option<StorageProviderKind>,
    pub data_path: Option<PathBuf>,
    /// Address of the connector handed over, to tell instances apart
    pub connector_addr: Option<usize>,
    pub connection_string: String,
}

pub type Journal = Arc<Mutex<Vec<InitCall>>>;

pub fn journal() -> Journal {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn calls_for(journal: &Journal, plugin: &str) -> Vec<InitCall> {
    journal
        .lock()
        .unwrap()
        .iter()
        .filter(|call| call.plugin == plugin)
        .cloned()
        .collect()
}

pub fn call_order(journal: &Journal) -> Vec<String> {
    journal.lock().unwrap().iter().map(|call| call.plugin.clone()).collect()
}

pub enum InitBehavior {
    Succeed,
    Fail(String),
    Panic(String),
}

/// A plugin that records every initialization into a shared journal and
/// keeps the connector it was handed.
pub struct RecordingPlugin {
    name: String,
    capabilities: Vec<Capability>,
    behavior: InitBehavior,
    journal: Journal,
    connector: Mutex<Option<Box<dyn DataConnector>>>,
    shutdowns: Option<Arc<Mutex<Vec<String>>>>,
    fail_shutdown: bool,
}

impl RecordingPlugin {
    pub fn new(name: &str, journal: &Journal) -> Self {
        Self {
            name: name.to_string(),
            capabilities: vec![Capability::DATA],
            behavior: InitBehavior::Succeed,
            journal: journal.clone(),
            connector: Mutex::new(None),
            shutdowns: None,
            fail_shutdown: false,
        }
    }

    pub fn with_capabilities(mut self, capabilities: Vec<Capability>) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn failing(mut self, message: &str) -> Self {
        self.behavior = InitBehavior::Fail(message.to_string());
        self
    }

    pub fn panicking(mut self, message: &str) -> Self {
        self.behavior = InitBehavior::Panic(message.to_string());
        self
    }

    pub fn tracking_shutdown(mut self, shutdowns: &Arc<Mutex<Vec<String>>>) -> Self {
        self.shutdowns = Some(shutdowns.clone());
        self
    }

    pub fn failing_shutdown(mut self) -> Self {
        self.fail_shutdown = true;
        self
    }

    /// Run `f` against the connector this plugin holds, if any
    pub fn with_connector<R>(&self, f: impl FnOnce(&mut dyn DataConnector) -> R) -> Option<R> {
        let mut guard = self.connector.lock().unwrap();
        guard.as_mut().map(|connector| f(connector.as_mut()))
    }

    pub fn holds_connector(&self) -> bool {
        self.connector.lock().unwrap().is_some()
    }
}

#[async_trait]
impl DataPlugin for RecordingPlugin {
    fn name(&self) -> &str {
        &self.name
    }

    fn capabilities(&self) -> Vec<Capability> {
        self.capabilities.clone()
    }

    async fn initialize(
        &self,
        connector: Option<Box<dyn DataConnector>>,
        _config: &ConfigSource,
        _registry: &ModuleRegistry,
        connection_string: &str,
    ) -> Result<()> {
        let call = InitCall {
            plugin: self.name.clone(),
            provider: connector.as_ref().map(|c| c.provider()),
            data_path: connector.as_ref().and_then(|c| c.default_data_path().map(PathBuf::from)),
            connector_addr: connector
                .as_ref()
                .map(|c| c.as_ref() as *const dyn DataConnector as *const () as usize),
            connection_string: connection_string.to_string(),
        };
        self.journal.lock().unwrap().push(call);
        *self.connector.lock().unwrap() = connector;

        match &self.behavior {
            InitBehavior::Succeed => Ok(()),
            InitBehavior::Fail(message) => Err(Error::Other(message.clone())),
            InitBehavior::Panic(message) => panic!("{}", message),
        }
    }

    async fn shutdown(&self) -> Result<()> {
        if let Some(mut connector) = self.connector.lock().unwrap().take() {
            connector.close();
        }
        if let Some(shutdowns) = &self.shutdowns {
            shutdowns.lock().unwrap().push(self.name.clone());
        }
        if self.fail_shutdown {
            return Err(Error::Other(format!("{} refused to stop", self.name)));
        }
        Ok(())
    }
}
