use std::path::Path;
use std::sync::{Arc, Mutex};

use tempfile::tempdir;

use crate::config::{ConfigData, ConfigFormat, ConfigSource};
use crate::kernel::bootstrap::Application;
use crate::kernel::constants;
use crate::plugin_system::{Capability, PluginRegistry};
use crate::storage::StorageProviderKind;
use crate::tests::common::{call_order, calls_for, journal, RecordingPlugin};

fn grid_config(data_dir: &Path, provider: &str, connection_string: &str) -> ConfigSource {
    ConfigSource::new()
        .with_section(
            constants::STARTUP_SECTION,
            ConfigData::new().with(constants::DATA_DIRECTORY_KEY, data_dir.to_string_lossy().to_string()),
        )
        .with_section(
            constants::DATA_SECTION,
            ConfigData::new()
                .with(constants::STORAGE_PROVIDER_KEY, provider)
                .with(constants::CONNECTION_STRING_KEY, connection_string),
        )
}

#[tokio::test]
async fn test_application_lifecycle_with_sqlite() {
    let temp_dir = tempdir().expect("Failed to create temporary directory");
    let data_dir = temp_dir.path().join("Data");
    let journal = journal();
    let shutdowns = Arc::new(Mutex::new(Vec::new()));
    let first = Arc::new(RecordingPlugin::new("app-first", &journal).tracking_shutdown(&shutdowns));
    let second = Arc::new(RecordingPlugin::new("app-second", &journal).tracking_shutdown(&shutdowns));

    let mut plugins = PluginRegistry::new();
    plugins.register_plugin(first.clone()).unwrap();
    plugins.register_plugin(second.clone()).unwrap();

    let mut app = Application::new(grid_config(&data_dir, "SQLite", "Data Source=grid.db"), plugins).unwrap();
    app.run().await.expect("Application run failed");

    let calls = calls_for(&journal, "app-first");
    assert_eq!(calls[0].provider, Some(StorageProviderKind::Sqlite));
    assert_eq!(calls[0].data_path.as_deref(), Some(data_dir.as_path()));
    assert_eq!(calls[0].connection_string, "Data Source=grid.db");

    // Plugins can connect their duplicate against the data directory
    let target = first
        .with_connector(|c| {
            c.connect("Data Source=grid.db", "app-first").unwrap();
            format!("{:?}", c.session().unwrap().target)
        })
        .unwrap();
    assert!(target.contains("grid.db"));

    let backend = app.data_service().unwrap().backend_config().await;
    assert_eq!(backend.provider_name, "SQLite");

    app.shutdown().await.unwrap();
    assert_eq!(*shutdowns.lock().unwrap(), vec!["app-second", "app-first"]);
    assert!(!first.holds_connector());
    assert!(!second.holds_connector());
}

#[tokio::test]
async fn test_application_with_capabilities() {
    let temp_dir = tempdir().unwrap();
    let journal = journal();
    let mut plugins = PluginRegistry::new();
    plugins.register_plugin(Arc::new(RecordingPlugin::new("app-general", &journal))).unwrap();
    plugins
        .register_plugin(Arc::new(
            RecordingPlugin::new("app-assets", &journal).with_capabilities(vec![Capability::new("asset-data")]),
        ))
        .unwrap();

    let mut app = Application::with_capabilities(
        grid_config(temp_dir.path(), "MySQL", "Server=db;Database=grid"),
        plugins,
        vec![Capability::new("asset-data")],
    )
    .unwrap();
    app.run().await.unwrap();

    assert_eq!(call_order(&journal), vec!["app-assets"]);
    assert_eq!(calls_for(&journal, "app-assets")[0].provider, Some(StorageProviderKind::MySql));
    app.shutdown().await.unwrap();
}

#[cfg(feature = "toml-config")]
#[tokio::test]
async fn test_application_from_config_file() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("WhiteCore.toml");
    let data_dir = temp_dir.path().join("Data");
    let text = format!(
        "[Startup]\nDataDirectory = {:?}\n\n[WhiteCoreData]\nStorageProvider = \"SQLite\"\nConnectionString = \"\"\n",
        data_dir.to_string_lossy()
    );
    std::fs::write(&config_path, text).unwrap();
    assert_eq!(ConfigFormat::from_path(&config_path), Some(ConfigFormat::Toml));

    let config = ConfigSource::load(&config_path).unwrap();
    let journal = journal();
    let mut plugins = PluginRegistry::new();
    plugins.register_plugin(Arc::new(RecordingPlugin::new("app-file", &journal))).unwrap();

    let mut app = Application::new(config, plugins).unwrap();
    app.run().await.unwrap();

    assert!(data_dir.is_dir());
    let calls = calls_for(&journal, "app-file");
    assert_eq!(calls[0].data_path.as_deref(), Some(data_dir.as_path()));
    app.shutdown().await.unwrap();
}
