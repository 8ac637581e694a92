use crate::config::{ConfigData, ConfigSource};
use crate::data_service::backend::BackendConfig;
use crate::kernel::constants;
use crate::tests::common::data_config;

#[test]
fn test_resolve_reads_section() {
    let mut backend = BackendConfig::default();
    assert!(backend.resolve(&data_config("SQLite", "Data Source=grid.db")));
    assert_eq!(backend, BackendConfig::new("SQLite", "Data Source=grid.db"));
}

#[test]
fn test_missing_section_keeps_previous_values() {
    let mut backend = BackendConfig::default();
    backend.resolve(&data_config("MySQL", "Server=db;Database=grid"));

    assert!(!backend.resolve(&ConfigSource::new()));
    assert_eq!(backend, BackendConfig::new("MySQL", "Server=db;Database=grid"));
}

#[test]
fn test_missing_key_keeps_previous_value() {
    let mut backend = BackendConfig::new("MySQL", "Server=db;Database=grid");
    let only_provider = ConfigSource::new().with_section(
        constants::DATA_SECTION,
        ConfigData::new().with(constants::STORAGE_PROVIDER_KEY, "SQLite"),
    );

    backend.resolve(&only_provider);

    assert_eq!(backend.provider_name, "SQLite");
    assert_eq!(backend.connection_string, "Server=db;Database=grid");
}

#[test]
fn test_empty_value_never_blanks_previous() {
    let mut backend = BackendConfig::new("MySQL", "Server=db;Database=grid");
    backend.resolve(&data_config("", ""));
    assert_eq!(backend, BackendConfig::new("MySQL", "Server=db;Database=grid"));
}

#[test]
fn test_empty_value_on_fresh_state_stays_empty() {
    let mut backend = BackendConfig::default();
    backend.resolve(&data_config("SQLite", ""));
    assert_eq!(backend, BackendConfig::new("SQLite", ""));
}

#[test]
fn test_other_sections_are_ignored() {
    let mut backend = BackendConfig::new("SQLite", "");
    let config = ConfigSource::new().with_section(
        "OtherData",
        ConfigData::new().with(constants::STORAGE_PROVIDER_KEY, "MySQL"),
    );
    assert!(!backend.resolve(&config));
    assert_eq!(backend.provider_name, "SQLite");
}
