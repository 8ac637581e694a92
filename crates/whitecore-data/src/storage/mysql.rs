use crate::kernel::error::Result;
use crate::storage::connector::{ConnectionSession, ConnectionString, ConnectionTarget, DataConnector};
use crate::storage::error::StorageSystemError;
use crate::storage::provider::StorageProviderKind;

const HOST_KEYS: &[&str] = &["Data Source", "Server", "Host"];
const USER_KEYS: &[&str] = &["User ID", "Uid", "User"];

/// Connector for the client/server MySQL backend
#[derive(Debug, Clone, Default)]
pub struct MySqlConnector {
    session: Option<ConnectionSession>,
}

impl MySqlConnector {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DataConnector for MySqlConnector {
    fn provider(&self) -> StorageProviderKind {
        StorageProviderKind::MySql
    }

    fn duplicate(&self) -> Box<dyn DataConnector> {
        Box::new(MySqlConnector::new())
    }

    fn connect(&mut self, connection_string: &str, migrator_name: &str) -> Result<()> {
        let parsed = ConnectionString::parse(connection_string);
        let host = parsed.get_any(HOST_KEYS).ok_or_else(|| {
            StorageSystemError::invalid_connection_string(self.provider(), "missing 'Data Source' (server host)")
        })?;
        let database = parsed.get("Database").ok_or_else(|| {
            StorageSystemError::invalid_connection_string(self.provider(), "missing 'Database'")
        })?;

        self.session = Some(ConnectionSession {
            migrator: migrator_name.to_string(),
            target: ConnectionTarget::Server {
                host: host.to_string(),
                database: database.to_string(),
                user: parsed.get_any(USER_KEYS).map(str::to_string),
            },
        });
        log::debug!("MySQL handle for '{}' bound to {}/{}", migrator_name, host, database);
        Ok(())
    }

    fn session(&self) -> Option<&ConnectionSession> {
        self.session.as_ref()
    }

    fn close(&mut self) {
        self.session = None;
    }
}
