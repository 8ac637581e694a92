use std::any::Any;
use std::collections::HashSet;
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use async_trait::async_trait;
use futures::FutureExt;
use tokio::sync::Mutex;

use crate::config::ConfigSource;
use crate::data_service::backend::BackendConfig;
use crate::data_service::report::{BootstrapPhase, BootstrapReport, PluginOutcome};
use crate::kernel::component::{KernelComponent, KernelContext, ModuleRegistry};
use crate::kernel::constants;
use crate::kernel::error::{Error, Result};
use crate::plugin_system::error::PluginSystemError;
use crate::plugin_system::{Capability, DataPlugin, PluginDiscovery};
use crate::storage::{ConnectorFactory, StorageProviderKind};

#[derive(Default)]
struct ServiceState {
    backend: BackendConfig,
    phase: BootstrapPhase,
    // Every plugin handed a call to initialize, in order, for shutdown.
    // Failed plugins are included: they may already hold their duplicate.
    attempted: Vec<Arc<dyn DataPlugin>>,
}

/// Wires a storage connector into every discovered data plugin.
///
/// Each run resolves the backend from configuration, builds one canonical
/// connector, and initializes plugins strictly one after another in discovery
/// order, each with its own duplicate of the connector. A plugin that fails
/// or panics is logged and skipped; the run always attempts every plugin.
///
/// The resolved provider and connection string persist between runs: a later
/// run whose configuration lacks the section reuses them.
pub struct LocalDataService {
    discovery: Arc<dyn PluginDiscovery>,
    // Capabilities used when run as a kernel component; None means the default
    capabilities: Option<Vec<Capability>>,
    state: Mutex<ServiceState>,
}

impl LocalDataService {
    pub fn new(discovery: Arc<dyn PluginDiscovery>) -> Self {
        Self {
            discovery,
            capabilities: None,
            state: Mutex::new(ServiceState::default()),
        }
    }

    /// Restrict the plugins initialized by the kernel lifecycle to `capabilities`
    pub fn with_capabilities(mut self, capabilities: Vec<Capability>) -> Self {
        self.capabilities = Some(capabilities);
        self
    }

    /// Backend values held from the last run
    pub async fn backend_config(&self) -> BackendConfig {
        self.state.lock().await.backend.clone()
    }

    pub async fn phase(&self) -> BootstrapPhase {
        self.state.lock().await.phase
    }

    /// Bootstrap every plugin declaring [`Capability::DATA`]
    pub async fn bootstrap(
        &self,
        config: &ConfigSource,
        registry: &ModuleRegistry,
    ) -> Result<BootstrapReport> {
        self.bootstrap_with(config, registry, &[Capability::DATA]).await
    }

    /// Bootstrap the plugins declaring any of `capabilities`.
    ///
    /// Plugin failures end up in the report, never in the returned error.
    /// `Err` means the run could not start, e.g. the registry lacks
    /// `SimulationBase` while a file-based provider is configured.
    pub async fn bootstrap_with(
        &self,
        config: &ConfigSource,
        registry: &ModuleRegistry,
        capabilities: &[Capability],
    ) -> Result<BootstrapReport> {
        // The lock is never held across plugin calls: plugins may query the service.
        let backend = {
            let mut state = self.state.lock().await;
            state.backend.resolve(config);
            state.phase = BootstrapPhase::ProviderResolved;
            state.backend.clone()
        };

        let connector = match ConnectorFactory::build(&backend.provider_name, registry) {
            Ok(connector) => connector,
            Err(e) => {
                self.enter(BootstrapPhase::Idle).await;
                return Err(e);
            }
        };
        self.enter(BootstrapPhase::ConnectorBuilt).await;

        let mut report = BootstrapReport {
            provider_name: backend.provider_name.clone(),
            provider: StorageProviderKind::from_name(&backend.provider_name),
            connector_built: connector.is_some(),
            outcomes: Vec::new(),
        };

        let plugins = self.discovery.discover(capabilities);
        log::info!(
            "{}: Initializing {} data plugin(s) for {:?}",
            constants::DATA_SERVICE_LOG_PREFIX,
            plugins.len(),
            capabilities.iter().map(Capability::as_str).collect::<Vec<_>>()
        );
        self.enter(BootstrapPhase::InitializingPlugins).await;

        let mut attempted = Vec::new();
        for plugin in plugins {
            let name = plugin.name().to_string();
            let duplicate = connector.as_ref().map(|canonical| canonical.duplicate());
            let attempt = AssertUnwindSafe(plugin.initialize(
                duplicate,
                config,
                registry,
                &backend.connection_string,
            ))
            .catch_unwind()
            .await;

            let error = match attempt {
                Ok(Ok(())) => None,
                Ok(Err(e)) => Some(e),
                Err(payload) => Some(Error::from(PluginSystemError::Panicked {
                    plugin_id: name.clone(),
                    operation: "initialize".to_string(),
                    message: panic_message(payload.as_ref()),
                })),
            };

            match &error {
                None => {
                    log::debug!("{}: Started data plugin {}", constants::DATA_SERVICE_LOG_PREFIX, name)
                }
                Some(e) => log::warn!(
                    "{}: Exception occurred starting data plugin {}, {}",
                    constants::DATA_SERVICE_LOG_PREFIX,
                    name,
                    e
                ),
            }
            attempted.push(plugin);
            report.outcomes.push(PluginOutcome { plugin: name, error });
        }

        {
            let mut state = self.state.lock().await;
            state.attempted.extend(attempted);
            state.phase = BootstrapPhase::Done;
        }
        log::info!("{}: Bootstrap complete, {}", constants::DATA_SERVICE_LOG_PREFIX, report);
        Ok(report)
    }

    /// Shut down every plugin handed a connector, in reverse order, releasing
    /// their duplicates. Plugins whose initialization failed are included.
    ///
    /// A plugin attempted by several runs is shut down once. Failures are
    /// logged and do not stop the remaining plugins.
    pub async fn shutdown(&self) -> Result<()> {
        let attempted = {
            let mut state = self.state.lock().await;
            state.phase = BootstrapPhase::Idle;
            std::mem::take(&mut state.attempted)
        };

        let mut seen = HashSet::new();
        for plugin in attempted.iter().rev() {
            let name = plugin.name().to_string();
            if !seen.insert(name.clone()) {
                continue;
            }
            let attempt = AssertUnwindSafe(plugin.shutdown()).catch_unwind().await;
            let error = match attempt {
                Ok(Ok(())) => continue,
                Ok(Err(e)) => e,
                Err(payload) => Error::from(PluginSystemError::Panicked {
                    plugin_id: name.clone(),
                    operation: "shutdown".to_string(),
                    message: panic_message(payload.as_ref()),
                }),
            };
            log::warn!(
                "{}: Error shutting down data plugin {}, {}",
                constants::DATA_SERVICE_LOG_PREFIX,
                name,
                error
            );
        }
        Ok(())
    }

    async fn enter(&self, phase: BootstrapPhase) {
        log::trace!("{}: entering {}", constants::DATA_SERVICE_LOG_PREFIX, phase);
        self.state.lock().await.phase = phase;
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

impl fmt::Debug for LocalDataService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalDataService")
            .field("capabilities", &self.capabilities)
            .finish()
    }
}

#[async_trait]
impl KernelComponent for LocalDataService {
    fn name(&self) -> &'static str {
        "LocalDataService"
    }

    async fn initialize(&self, context: &KernelContext<'_>) -> Result<()> {
        let report = match &self.capabilities {
            Some(capabilities) => {
                self.bootstrap_with(context.config, context.registry, capabilities).await?
            }
            None => self.bootstrap(context.config, context.registry).await?,
        };
        if !report.is_clean() {
            log::warn!(
                "{}: {} data plugin(s) failed to start",
                constants::DATA_SERVICE_LOG_PREFIX,
                report.failure_count()
            );
        }
        Ok(())
    }

    async fn start(&self) -> Result<()> {
        Ok(())
    }

    async fn stop(&self) -> Result<()> {
        self.shutdown().await
    }
}
