use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;
use async_trait::async_trait;
use crate::config::ConfigSource;
use crate::kernel::error::{Error, Result};

/// Shared state handed to components while they initialize
#[derive(Clone, Copy)]
pub struct KernelContext<'a> {
    pub config: &'a ConfigSource,
    pub registry: &'a ModuleRegistry,
}

impl<'a> KernelContext<'a> {
    pub fn new(config: &'a ConfigSource, registry: &'a ModuleRegistry) -> Self {
        Self { config, registry }
    }
}

/// Core component lifecycle trait for all kernel components
#[async_trait]
pub trait KernelComponent: Any + Send + Sync + Debug {
    fn name(&self) -> &'static str;
    async fn initialize(&self, context: &KernelContext<'_>) -> Result<()>;
    async fn start(&self) -> Result<()>;
    async fn stop(&self) -> Result<()>;
}

struct RegisteredModule {
    component: Arc<dyn KernelComponent>,
    // Same allocation as `component`, kept typed as Any for downcasting
    any: Arc<dyn Any + Send + Sync>,
}

/// Process-wide service locator.
///
/// Modules are keyed by their concrete type and remembered in registration
/// order, which is also the order the kernel initializes them in.
#[derive(Default)]
pub struct ModuleRegistry {
    instances: HashMap<TypeId, RegisteredModule>,
    order: Vec<TypeId>,
}

impl ModuleRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a module instance under its concrete type.
    /// Registering the same type again replaces the instance but keeps its position.
    pub fn register_module_interface<V>(&mut self, instance: Arc<V>)
    where
        V: KernelComponent + 'static,
    {
        let type_id = TypeId::of::<V>();
        let module = RegisteredModule {
            component: instance.clone(),
            any: instance,
        };
        if self.instances.insert(type_id, module).is_none() {
            self.order.push(type_id);
        }
    }

    /// Look up a module by concrete type.
    pub fn request_module_interface<T: KernelComponent + 'static>(&self) -> Option<Arc<T>> {
        self.instances
            .get(&TypeId::of::<T>())
            .and_then(|module| Arc::downcast::<T>(module.any.clone()).ok())
    }

    /// Look up a module that must be present.
    pub fn require_module_interface<T: KernelComponent + 'static>(&self) -> Result<Arc<T>> {
        self.request_module_interface::<T>().ok_or_else(|| {
            Error::missing_component("RequestModuleInterface", short_type_name::<T>())
        })
    }

    /// Get a component trait object by the TypeId of its concrete type.
    pub fn get_component_by_id(&self, type_id: &TypeId) -> Option<Arc<dyn KernelComponent>> {
        self.instances.get(type_id).map(|module| module.component.clone())
    }

    /// All registered components, in registration order.
    pub fn components(&self) -> Vec<Arc<dyn KernelComponent>> {
        self.order
            .iter()
            .filter_map(|id| self.get_component_by_id(id))
            .collect()
    }

    /// TypeIds of all registered components, in registration order.
    pub fn registered_ids(&self) -> &[TypeId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl Debug for ModuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&'static str> = self.components().iter().map(|c| c.name()).collect();
        f.debug_struct("ModuleRegistry").field("modules", &names).finish()
    }
}

fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}
