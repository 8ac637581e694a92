use std::any::TypeId;
use std::sync::Arc;

use crate::config::ConfigSource;
use crate::data_service::LocalDataService;
use crate::kernel::component::{KernelComponent, KernelContext, ModuleRegistry};
use crate::kernel::constants;
use crate::kernel::error::{Error, KernelLifecyclePhase, Result};
use crate::kernel::simulation::SimulationBase;
use crate::plugin_system::{Capability, PluginRegistry};

/// Main application struct: owns the configuration and the module registry
/// and drives registered components through their lifecycle.
pub struct Application {
    initialized: bool,
    config: ConfigSource,
    registry: Arc<ModuleRegistry>,
}

impl Application {
    /// Create an application running the data service over `plugins`,
    /// initializing plugins declaring [`Capability::DATA`].
    pub fn new(config: ConfigSource, plugins: PluginRegistry) -> Result<Self> {
        Self::build(config, LocalDataService::new(Arc::new(plugins)))
    }

    /// Like [`Application::new`], initializing plugins for `capabilities` instead.
    pub fn with_capabilities(
        config: ConfigSource,
        plugins: PluginRegistry,
        capabilities: Vec<Capability>,
    ) -> Result<Self> {
        Self::build(
            config,
            LocalDataService::new(Arc::new(plugins)).with_capabilities(capabilities),
        )
    }

    fn build(config: ConfigSource, data_service: LocalDataService) -> Result<Self> {
        log::info!("Initializing {} v{}", constants::APP_NAME, constants::APP_VERSION);

        let mut registry = ModuleRegistry::new();

        // Registration order is initialization order: the data service needs
        // the simulation base (data directory) to exist first.
        let sim_base = Arc::new(SimulationBase::from_config(&config));
        log::info!("Using data directory: {}", sim_base.default_data_path().display());
        registry.register_module_interface(sim_base);
        registry.register_module_interface(Arc::new(data_service));

        Ok(Application {
            initialized: false,
            config,
            registry: Arc::new(registry),
        })
    }

    /// Gets a specific component instance by its concrete type T.
    pub fn get_component<T: KernelComponent + 'static>(&self) -> Option<Arc<T>> {
        self.registry.request_module_interface::<T>()
    }

    pub fn registry(&self) -> &ModuleRegistry {
        &self.registry
    }

    pub fn config(&self) -> &ConfigSource {
        &self.config
    }

    /// The data service component
    pub fn data_service(&self) -> Result<Arc<LocalDataService>> {
        self.registry.require_module_interface::<LocalDataService>()
    }

    /// Initialize then start every component. Fails if already running.
    pub async fn run(&mut self) -> Result<()> {
        if self.initialized {
            return Err(Error::KernelLifecycleError {
                phase: KernelLifecyclePhase::RunPreCheck,
                component_name: None,
                message: "Application already initialized".to_string(),
                source: None,
            });
        }

        self.initialize().await?;
        self.start().await?;

        self.initialized = true;
        log::info!("Application initialized and started successfully.");
        Ok(())
    }

    /// Initialize all registered components in registration order.
    async fn initialize(&mut self) -> Result<()> {
        log::info!("Initializing components...");
        let context = KernelContext::new(&self.config, &self.registry);
        for component in self.registry.components() {
            log::info!("Initializing component: {}", component.name());
            component.initialize(&context).await.map_err(|e| {
                lifecycle_error(KernelLifecyclePhase::Initialize, component.name(), "Component failed to initialize", e)
            })?;
        }
        log::info!("Component initialization complete.");
        Ok(())
    }

    /// Start all initialized components in registration order.
    async fn start(&mut self) -> Result<()> {
        log::info!("Starting components...");
        for component in self.registry.components() {
            log::info!("Starting component: {}", component.name());
            component.start().await.map_err(|e| {
                lifecycle_error(KernelLifecyclePhase::Start, component.name(), "Component failed to start", e)
            })?;
        }
        log::info!("Component start complete.");
        Ok(())
    }

    /// Stop all components in reverse registration order.
    /// Every component is stopped; the first failure is returned.
    pub async fn shutdown(&mut self) -> Result<()> {
        log::info!("Shutting down components...");
        let mut first_error = None;
        for component in self.registry.components().iter().rev() {
            log::info!("Stopping component: {}", component.name());
            if let Err(e) = component.stop().await {
                log::error!("Error stopping component {}: {}", component.name(), e);
                if first_error.is_none() {
                    first_error = Some(lifecycle_error(
                        KernelLifecyclePhase::Shutdown,
                        component.name(),
                        "Component failed to stop",
                        e,
                    ));
                }
            }
        }
        self.initialized = false;
        log::info!("Component shutdown complete.");
        first_error.map_or(Ok(()), Err)
    }

    /// Returns whether the application has been initialized.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// TypeIds of registered components, in initialization order
    pub fn component_order(&self) -> Vec<TypeId> {
        self.registry.registered_ids().to_vec()
    }
}

fn lifecycle_error(
    phase: KernelLifecyclePhase,
    component_name: &str,
    message: &str,
    source: Error,
) -> Error {
    Error::KernelLifecycleError {
        phase,
        component_name: Some(component_name.to_string()),
        message: message.to_string(),
        source: Some(Box::new(source)),
    }
}
