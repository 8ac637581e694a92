use std::fmt;

use crate::kernel::error::Error;
use crate::storage::StorageProviderKind;

/// Where a bootstrap run currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BootstrapPhase {
    #[default]
    Idle,
    ProviderResolved,
    ConnectorBuilt,
    InitializingPlugins,
    Done,
}

impl fmt::Display for BootstrapPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BootstrapPhase::Idle => "Idle",
            BootstrapPhase::ProviderResolved => "ProviderResolved",
            BootstrapPhase::ConnectorBuilt => "ConnectorBuilt",
            BootstrapPhase::InitializingPlugins => "InitializingPlugins",
            BootstrapPhase::Done => "Done",
        };
        f.write_str(name)
    }
}

/// Result of initializing one plugin
#[derive(Debug)]
pub struct PluginOutcome {
    pub plugin: String,
    pub error: Option<Error>,
}

/// Summary of one bootstrap run.
///
/// Informational only: a run that recorded failures still completed, since
/// every discovered plugin was attempted exactly once.
#[derive(Debug, Default)]
pub struct BootstrapReport {
    /// Provider name as resolved from configuration
    pub provider_name: String,
    /// The provider it matched, if any
    pub provider: Option<StorageProviderKind>,
    pub connector_built: bool,
    /// One entry per initialization attempt, in discovery order
    pub outcomes: Vec<PluginOutcome>,
}

impl BootstrapReport {
    /// Names of attempted plugins, in order
    pub fn attempted(&self) -> impl Iterator<Item = &str> {
        self.outcomes.iter().map(|o| o.plugin.as_str())
    }

    /// Failed attempts with their errors
    pub fn failures(&self) -> impl Iterator<Item = (&str, &Error)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.error.as_ref().map(|e| (o.plugin.as_str(), e)))
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }

    pub fn is_clean(&self) -> bool {
        self.failure_count() == 0
    }
}

impl fmt::Display for BootstrapReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let provider = match self.provider {
            Some(kind) => kind.to_string(),
            None if self.provider_name.is_empty() => "none".to_string(),
            None => format!("none (unsupported '{}')", self.provider_name),
        };
        write!(
            f,
            "provider: {}, plugins attempted: {}, failed: {}",
            provider,
            self.outcomes.len(),
            self.failure_count()
        )
    }
}
