/// Application name
pub const APP_NAME: &str = "WhiteCore";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Configuration section read by the data service
pub const DATA_SECTION: &str = "WhiteCoreData";

/// Key selecting the storage backend inside [`DATA_SECTION`]
pub const STORAGE_PROVIDER_KEY: &str = "StorageProvider";

/// Key holding the connection string inside [`DATA_SECTION`]
pub const CONNECTION_STRING_KEY: &str = "ConnectionString";

/// Configuration section read by the simulation base
pub const STARTUP_SECTION: &str = "Startup";

/// Key overriding the default data directory inside [`STARTUP_SECTION`]
pub const DATA_DIRECTORY_KEY: &str = "DataDirectory";

/// Default data directory, relative to the working directory
pub const DEFAULT_DATA_DIR: &str = "Data";

/// Database file used by the SQLite backend when the connection string names none
pub const DEFAULT_SQLITE_FILE: &str = "whitecore.db";

/// Log target prefix used for data service diagnostics
pub const DATA_SERVICE_LOG_PREFIX: &str = "[DataService]";
