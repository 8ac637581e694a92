//! # Storage
//!
//! Storage connectors and the factory that picks one from configuration.
//!
//! - [`DataConnector`]: the handle trait plugins receive, duplicated per plugin.
//! - [`MySqlConnector`] / [`SqliteConnector`]: the two known backends.
//! - [`ConnectorFactory`]: maps a provider name to a canonical connector.
pub mod connector;
pub mod error;
pub mod factory;
pub mod mysql;
pub mod provider;
pub mod sqlite;

/// Re-export key types
pub use connector::{ConnectionSession, ConnectionString, ConnectionTarget, DataConnector};
pub use factory::ConnectorFactory;
pub use mysql::MySqlConnector;
pub use provider::StorageProviderKind;
pub use sqlite::SqliteConnector;
