use crate::config::{ConfigData, ConfigSource};
use crate::kernel::constants;

/// Provider selection and connection string, as last resolved from configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackendConfig {
    pub provider_name: String,
    pub connection_string: String,
}

impl BackendConfig {
    pub fn new(provider_name: impl Into<String>, connection_string: impl Into<String>) -> Self {
        Self {
            provider_name: provider_name.into(),
            connection_string: connection_string.into(),
        }
    }

    /// Merge the `WhiteCoreData` section into the values held so far.
    ///
    /// A missing section or key keeps the previous value, and an empty value
    /// never replaces a non-empty one. Returns whether the section was present.
    pub fn resolve(&mut self, config: &ConfigSource) -> bool {
        let Some(section) = config.section(constants::DATA_SECTION) else {
            log::debug!(
                "No [{}] section, keeping storage provider '{}'",
                constants::DATA_SECTION,
                self.provider_name
            );
            return false;
        };
        merge_key(&mut self.provider_name, section, constants::STORAGE_PROVIDER_KEY);
        merge_key(&mut self.connection_string, section, constants::CONNECTION_STRING_KEY);
        true
    }
}

fn merge_key(field: &mut String, section: &ConfigData, key: &str) {
    match section.get_string(key) {
        Some(value) if !value.is_empty() || field.is_empty() => *field = value,
        Some(_) => log::debug!("Ignoring empty {} over previous value", key),
        None => log::debug!("No {} configured, keeping previous value", key),
    }
}
