use std::fmt;
use std::sync::Arc;

use crate::kernel::error::Result;
use crate::plugin_system::capability::Capability;
use crate::plugin_system::error::PluginSystemError;
use crate::plugin_system::traits::DataPlugin;

/// Enumerates data plugins by capability
pub trait PluginDiscovery: Send + Sync {
    /// Plugins declaring any of `capabilities`.
    ///
    /// Each capability is a separate pass in registration order and passes
    /// are concatenated in the order given, so a plugin declaring two
    /// requested capabilities is returned twice. Repeated calls with the
    /// same input return the same sequence.
    fn discover(&self, capabilities: &[Capability]) -> Vec<Arc<dyn DataPlugin>>;
}

struct RegisteredPlugin {
    plugin: Arc<dyn DataPlugin>,
    // Captured once at registration so discovery stays stable
    capabilities: Vec<Capability>,
}

/// Statically populated registry of data plugins.
///
/// The host registers every plugin it links against at startup; nothing is
/// scanned or loaded at run time.
#[derive(Default)]
pub struct PluginRegistry {
    plugins: Vec<RegisteredPlugin>,
}

impl PluginRegistry {
    /// Create an empty plugin registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plugin under the capabilities it declares.
    ///
    /// Rejects a second plugin with the same name and plugins declaring no
    /// capability (they could never be discovered).
    pub fn register_plugin(&mut self, plugin: Arc<dyn DataPlugin>) -> Result<()> {
        let name = plugin.name().to_string();
        if self.has_plugin(&name) {
            return Err(PluginSystemError::RegistrationError {
                plugin_id: name,
                message: "plugin already registered".to_string(),
            }
            .into());
        }

        let mut capabilities: Vec<Capability> = Vec::new();
        for capability in plugin.capabilities() {
            if !capabilities.contains(&capability) {
                capabilities.push(capability);
            }
        }
        if capabilities.is_empty() {
            return Err(PluginSystemError::RegistrationError {
                plugin_id: name,
                message: "plugin declares no capabilities".to_string(),
            }
            .into());
        }

        log::debug!("Registered data plugin '{}' for {:?}", name, capabilities);
        self.plugins.push(RegisteredPlugin { plugin, capabilities });
        Ok(())
    }

    /// Unregister a plugin by name
    pub fn unregister_plugin(&mut self, name: &str) -> Result<Arc<dyn DataPlugin>> {
        let index = self
            .plugins
            .iter()
            .position(|entry| entry.plugin.name() == name)
            .ok_or_else(|| PluginSystemError::RegistrationError {
                plugin_id: name.to_string(),
                message: "plugin not found".to_string(),
            })?;
        Ok(self.plugins.remove(index).plugin)
    }

    /// Check if a plugin is registered by name
    pub fn has_plugin(&self, name: &str) -> bool {
        self.plugins.iter().any(|entry| entry.plugin.name() == name)
    }

    /// Get a plugin Arc by name
    pub fn get_plugin(&self, name: &str) -> Option<Arc<dyn DataPlugin>> {
        self.plugins
            .iter()
            .find(|entry| entry.plugin.name() == name)
            .map(|entry| entry.plugin.clone())
    }

    /// Registered plugins and their capabilities, in registration order
    pub fn iter_plugins(&self) -> impl Iterator<Item = (&Arc<dyn DataPlugin>, &[Capability])> {
        self.plugins
            .iter()
            .map(|entry| (&entry.plugin, entry.capabilities.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}

impl PluginDiscovery for PluginRegistry {
    fn discover(&self, capabilities: &[Capability]) -> Vec<Arc<dyn DataPlugin>> {
        capabilities
            .iter()
            .flat_map(|capability| {
                self.plugins
                    .iter()
                    .filter(move |entry| entry.capabilities.contains(capability))
                    .map(|entry| entry.plugin.clone())
            })
            .collect()
    }
}

impl fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.plugins.iter().map(|entry| entry.plugin.name()).collect();
        f.debug_struct("PluginRegistry").field("plugins", &names).finish()
    }
}
