use std::error::Error;
use std::io::{self, IsTerminal};

use tracing_log::LogTracer;
use tracing_subscriber::EnvFilter;
use whitecore_data::ConfigSource;

/// Configuration section holding logging settings
pub const LOGGING_SECTION: &str = "Logging";

const DEFAULT_LEVEL: &str = "info";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Logging settings read from the `Logging` section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub level: String,
    pub format: LogFormat,
}

impl LogSettings {
    pub fn from_config(config: &ConfigSource) -> Self {
        let section = config.section(LOGGING_SECTION);
        let level = section
            .and_then(|s| s.get_string("Level"))
            .filter(|level| !level.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LEVEL.to_string());
        let format = match section.and_then(|s| s.get_string("Format")) {
            Some(format) if format.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };
        Self { level, format }
    }
}

/// Install the global subscriber. `RUST_LOG` takes precedence over the configured level.
///
/// Library crates log through the `log` facade; their records are forwarded
/// into tracing. Output goes to stderr so command output stays on stdout.
pub fn init(settings: &LogSettings) -> Result<(), Box<dyn Error + Send + Sync>> {
    LogTracer::init()?;

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&settings.level)?,
    };
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal());

    match settings.format {
        LogFormat::Json => tracing::subscriber::set_global_default(builder.json().finish())?,
        LogFormat::Pretty => tracing::subscriber::set_global_default(builder.finish())?,
    }
    Ok(())
}
