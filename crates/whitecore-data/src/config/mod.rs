//! # Configuration
//!
//! Named configuration sections ([`ConfigSource`] of [`ConfigData`]) loaded
//! from JSON, YAML or TOML files. Components read the section they own by
//! name, e.g. the data service reads `WhiteCoreData`.
pub mod data;
pub mod error;
pub mod source;

pub use data::{ConfigData, ConfigFormat};
pub use error::ConfigError;
pub use source::ConfigSource;
