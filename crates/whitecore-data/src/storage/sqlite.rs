use std::path::{Path, PathBuf};

use crate::kernel::constants;
use crate::kernel::error::Result;
use crate::storage::connector::{ConnectionSession, ConnectionString, ConnectionTarget, DataConnector};
use crate::storage::error::StorageSystemError;
use crate::storage::provider::StorageProviderKind;

/// Connector for the embedded, file-based SQLite backend
#[derive(Debug, Clone, Default)]
pub struct SqliteConnector {
    default_data_path: Option<PathBuf>,
    session: Option<ConnectionSession>,
}

impl SqliteConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Database file named by a connection string, resolved against the
    /// default data path when relative.
    ///
    /// Accepts `Data Source=<file>` or `URI=file:<file>[,version=3]`; an empty
    /// string names [`constants::DEFAULT_SQLITE_FILE`].
    pub fn resolve_database_path(&self, connection_string: &str) -> Result<PathBuf> {
        let file = database_file(connection_string)?;
        if file.is_absolute() {
            return Ok(file);
        }
        match &self.default_data_path {
            Some(base) => Ok(base.join(file)),
            None => Err(StorageSystemError::MissingDataPath {
                provider: self.provider().to_string(),
                file,
            }
            .into()),
        }
    }
}

fn database_file(connection_string: &str) -> Result<PathBuf> {
    if connection_string.trim().is_empty() {
        return Ok(PathBuf::from(constants::DEFAULT_SQLITE_FILE));
    }
    let parsed = ConnectionString::parse(connection_string);
    if let Some(source) = parsed.get("Data Source") {
        return Ok(PathBuf::from(source));
    }
    if let Some(uri) = parsed.get("URI") {
        // URI=file:whitecore.db,version=3
        let location = uri.strip_prefix("file:").unwrap_or(uri);
        let file = location.split(',').next().unwrap_or(location).trim();
        if !file.is_empty() {
            return Ok(PathBuf::from(file));
        }
    }
    Err(StorageSystemError::invalid_connection_string(
        StorageProviderKind::Sqlite,
        "expected 'Data Source=<file>' or 'URI=file:<file>'",
    )
    .into())
}

impl DataConnector for SqliteConnector {
    fn provider(&self) -> StorageProviderKind {
        StorageProviderKind::Sqlite
    }

    fn duplicate(&self) -> Box<dyn DataConnector> {
        Box::new(SqliteConnector {
            default_data_path: self.default_data_path.clone(),
            session: None,
        })
    }

    fn default_data_path(&self) -> Option<&Path> {
        self.default_data_path.as_deref()
    }

    fn set_default_data_path(&mut self, path: PathBuf) {
        self.default_data_path = Some(path);
    }

    fn connect(&mut self, connection_string: &str, migrator_name: &str) -> Result<()> {
        let database = self.resolve_database_path(connection_string)?;
        log::debug!("SQLite handle for '{}' bound to {}", migrator_name, database.display());
        self.session = Some(ConnectionSession {
            migrator: migrator_name.to_string(),
            target: ConnectionTarget::File(database),
        });
        Ok(())
    }

    fn session(&self) -> Option<&ConnectionSession> {
        self.session.as_ref()
    }

    fn close(&mut self) {
        self.session = None;
    }
}
