use std::collections::BTreeMap;
use std::fmt::Debug;
use std::path::{Path, PathBuf};

use crate::kernel::error::Result;
use crate::storage::provider::StorageProviderKind;

/// Handle to a storage backend.
///
/// The data service owns one canonical connector per bootstrap run and only
/// ever hands out [`duplicate`](DataConnector::duplicate)s. Each duplicate
/// carries the canonical configuration but its own connection state, so a
/// plugin connecting, closing or reconfiguring its handle is invisible to
/// every other holder.
pub trait DataConnector: Send + Sync + Debug {
    /// Which backend this connector targets
    fn provider(&self) -> StorageProviderKind;

    /// An independently owned handle with the same configuration and no connection
    fn duplicate(&self) -> Box<dyn DataConnector>;

    /// Directory relative database files resolve against.
    /// Always `None` for server backends.
    fn default_data_path(&self) -> Option<&Path> {
        None
    }

    /// Set the default data path. Server backends ignore it.
    fn set_default_data_path(&mut self, _path: PathBuf) {}

    /// Validate `connection_string` and bind this handle to its target.
    /// Reconnecting replaces the previous session.
    fn connect(&mut self, connection_string: &str, migrator_name: &str) -> Result<()>;

    /// The current session, if connected
    fn session(&self) -> Option<&ConnectionSession>;

    fn is_connected(&self) -> bool {
        self.session().is_some()
    }

    /// Release the session. Closing an unconnected handle is a no-op.
    fn close(&mut self);
}

/// What a connected handle is bound to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionTarget {
    Server {
        host: String,
        database: String,
        user: Option<String>,
    },
    File(PathBuf),
}

/// State of one connected handle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionSession {
    pub migrator: String,
    pub target: ConnectionTarget,
}

/// `key=value;key=value` connection string. Keys are case-insensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionString {
    pairs: BTreeMap<String, String>,
}

impl ConnectionString {
    pub fn parse(raw: &str) -> Self {
        let pairs = raw
            .split(';')
            .filter_map(|segment| {
                let (key, value) = segment.split_once('=')?;
                let key = key.trim();
                if key.is_empty() {
                    return None;
                }
                Some((key.to_ascii_lowercase(), value.trim().to_string()))
            })
            .collect();
        Self { pairs }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .get(&key.to_ascii_lowercase())
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// First non-empty value among several key aliases
    pub fn get_any(&self, keys: &[&str]) -> Option<&str> {
        keys.iter().find_map(|key| self.get(key))
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
