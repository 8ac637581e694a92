use std::fmt;
use std::str::FromStr;

/// The closed set of storage backends the data service can target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageProviderKind {
    /// Client/server SQL backend
    MySql,
    /// Embedded, file-based SQL backend
    Sqlite,
}

impl StorageProviderKind {
    /// Every known provider, in the order they are offered to users
    pub const ALL: [StorageProviderKind; 2] = [StorageProviderKind::MySql, StorageProviderKind::Sqlite];

    /// The configuration name selecting this provider
    pub fn name(&self) -> &'static str {
        match self {
            StorageProviderKind::MySql => "MySQL",
            StorageProviderKind::Sqlite => "SQLite",
        }
    }

    /// Match a configured provider name. Names are compared exactly;
    /// anything else, including the empty string, selects no provider.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Whether connectors for this backend need a default data path
    pub fn is_file_based(&self) -> bool {
        matches!(self, StorageProviderKind::Sqlite)
    }
}

impl fmt::Display for StorageProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown provider name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown storage provider '{0}'")]
pub struct UnknownProvider(pub String);

impl FromStr for StorageProviderKind {
    type Err = UnknownProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| UnknownProvider(s.to_string()))
    }
}
