use std::path::PathBuf;
use std::sync::Arc;

use crate::data_service::LocalDataService;
use crate::plugin_system::PluginRegistry;
use crate::storage::StorageProviderKind;
use crate::tests::common::{
    call_order, calls_for, data_config, install_log_capture, journal, registry_with_data_path,
    warnings_mentioning, RecordingPlugin,
};

// SQLite configured with an empty connection string, data directory /data,
// three plugins with the middle one failing.
#[tokio::test]
async fn test_sqlite_three_plugins_middle_fails() {
    install_log_capture();
    let journal = journal();
    let a = Arc::new(RecordingPlugin::new("scenario-A", &journal));
    let b = Arc::new(RecordingPlugin::new("scenario-B", &journal).failing("IO error"));
    let c = Arc::new(RecordingPlugin::new("scenario-C", &journal));

    let mut plugins = PluginRegistry::new();
    plugins.register_plugin(a.clone()).unwrap();
    plugins.register_plugin(b.clone()).unwrap();
    plugins.register_plugin(c.clone()).unwrap();
    let service = LocalDataService::new(Arc::new(plugins));
    let registry = registry_with_data_path("/data");

    let report = service.bootstrap(&data_config("SQLite", ""), &registry).await.unwrap();

    assert_eq!(call_order(&journal), vec!["scenario-A", "scenario-B", "scenario-C"]);
    let mut addrs = Vec::new();
    for name in ["scenario-A", "scenario-B", "scenario-C"] {
        let calls = calls_for(&journal, name);
        assert_eq!(calls.len(), 1, "{} should be initialized exactly once", name);
        assert_eq!(calls[0].provider, Some(StorageProviderKind::Sqlite));
        assert_eq!(calls[0].data_path, Some(PathBuf::from("/data")));
        assert_eq!(calls[0].connection_string, "");
        addrs.push(calls[0].connector_addr.unwrap());
    }
    addrs.sort_unstable();
    addrs.dedup();
    assert_eq!(addrs.len(), 3, "Each plugin gets a distinct connector");

    let warnings = warnings_mentioning("scenario-B");
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("IO error"));
    assert!(warnings_mentioning("scenario-A").is_empty());
    assert!(warnings_mentioning("scenario-C").is_empty());

    assert_eq!(report.failure_count(), 1);
    assert_eq!(
        report.to_string(),
        "provider: SQLite, plugins attempted: 3, failed: 1"
    );

    // The failing plugin still received (and kept) its own handle
    assert!(b.holds_connector());
    assert!(a.holds_connector() && c.holds_connector());
}

#[tokio::test]
async fn test_unsupported_provider_scenario() {
    let journal = journal();
    let mut plugins = PluginRegistry::new();
    plugins.register_plugin(Arc::new(RecordingPlugin::new("scenario-pg-A", &journal))).unwrap();
    plugins.register_plugin(Arc::new(RecordingPlugin::new("scenario-pg-B", &journal))).unwrap();
    let service = LocalDataService::new(Arc::new(plugins));

    let report = service
        .bootstrap(&data_config("PostgreSQL", "Host=db"), &registry_with_data_path("/data"))
        .await
        .unwrap();

    assert!(journal.lock().unwrap().iter().all(|call| call.connector_addr.is_none()));
    assert_eq!(call_order(&journal).len(), 2);
    assert_eq!(
        report.to_string(),
        "provider: none (unsupported 'PostgreSQL'), plugins attempted: 2, failed: 0"
    );
}

#[tokio::test]
async fn test_provider_names_match_exactly() {
    let journal = journal();
    let mut plugins = PluginRegistry::new();
    plugins.register_plugin(Arc::new(RecordingPlugin::new("scenario-case", &journal))).unwrap();
    let service = LocalDataService::new(Arc::new(plugins));

    let report = service
        .bootstrap(&data_config("sqlite", ""), &registry_with_data_path("/data"))
        .await
        .unwrap();

    assert!(!report.connector_built);
    assert!(calls_for(&journal, "scenario-case")[0].connector_addr.is_none());
}
