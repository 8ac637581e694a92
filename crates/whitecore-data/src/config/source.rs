use std::collections::BTreeMap;
use std::path::Path;

use crate::config::data::{ConfigData, ConfigFormat};
use crate::config::error::ConfigError;

/// The full configuration of a process: named sections of keys.
///
/// A file maps top-level tables to sections, e.g. in TOML:
///
/// ```toml
/// [WhiteCoreData]
/// StorageProvider = "SQLite"
/// ConnectionString = "Data Source=whitecore.db"
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigSource {
    sections: BTreeMap<String, ConfigData>,
}

impl ConfigSource {
    /// Create an empty configuration (no sections)
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration file, picking the format from its extension
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let format = ConfigFormat::from_path(path)
            .ok_or_else(|| ConfigError::UnsupportedFormat(path.to_path_buf()))?;
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let source = Self::parse(&content, format)?;
        log::debug!(
            "Loaded configuration from {} with sections {:?}",
            path.display(),
            source.section_names()
        );
        Ok(source)
    }

    /// Parse configuration text in the given format
    pub fn parse(data: &str, format: ConfigFormat) -> Result<Self, ConfigError> {
        if data.trim().is_empty() {
            return Ok(Self::new());
        }
        let raw: BTreeMap<String, serde_json::Value> = match format {
            ConfigFormat::Json => {
                serde_json::from_str(data).map_err(|e| ConfigError::deserialization("json", e))?
            }
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => {
                serde_yaml::from_str(data).map_err(|e| ConfigError::deserialization("yaml", e))?
            }
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => {
                toml::from_str(data).map_err(|e| ConfigError::deserialization("toml", e))?
            }
        };

        let mut sections = BTreeMap::new();
        for (name, value) in raw {
            let section = ConfigData::from_json_value(&name, value)?;
            sections.insert(name, section);
        }
        Ok(Self { sections })
    }

    /// Render the configuration in the given format
    pub fn serialize(&self, format: ConfigFormat) -> Result<String, ConfigError> {
        match format {
            ConfigFormat::Json => serde_json::to_string_pretty(&self.sections)
                .map_err(|e| ConfigError::serialization("json", e)),
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => serde_yaml::to_string(&self.sections)
                .map_err(|e| ConfigError::serialization("yaml", e)),
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => toml::to_string_pretty(&self.sections)
                .map_err(|e| ConfigError::serialization("toml", e)),
        }
    }

    /// Look up a section by name
    pub fn section(&self, name: &str) -> Option<&ConfigData> {
        self.sections.get(name)
    }

    /// Mutable access to a section, creating it if absent
    pub fn section_mut(&mut self, name: &str) -> &mut ConfigData {
        self.sections.entry(name.to_string()).or_default()
    }

    /// Insert or replace a whole section
    pub fn insert_section(&mut self, name: impl Into<String>, data: ConfigData) {
        self.sections.insert(name.into(), data);
    }

    /// Builder form of [`ConfigSource::insert_section`]
    pub fn with_section(mut self, name: impl Into<String>, data: ConfigData) -> Self {
        self.insert_section(name, data);
        self
    }

    pub fn remove_section(&mut self, name: &str) -> Option<ConfigData> {
        self.sections.remove(name)
    }

    /// Section names, sorted
    pub fn section_names(&self) -> Vec<&str> {
        self.sections.keys().map(String::as_str).collect()
    }

    /// Merge another source into this one; keys in `other` win
    pub fn merge(&mut self, other: &ConfigSource) {
        for (name, data) in &other.sections {
            self.section_mut(name).merge(data);
        }
    }
}
