mod logging;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use log::info;
use whitecore_data::{
    Application, BootstrapReport, Capability, ConfigSource, KernelError, PluginRegistry,
    StorageProviderKind,
};

use core_assets::AssetsPlugin;
use core_generics::GenericsPlugin;

/// WhiteCore: grid server data service
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Configuration file (JSON, YAML or TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Simple ping command for testing
    #[arg(long)]
    ping: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List known storage providers
    Providers,
    /// Inspect data plugins
    Plugins {
        #[command(subcommand)]
        command: PluginCommand,
    },
    /// Run one data service bootstrap and print the report
    Bootstrap {
        /// Capability to initialize plugins for (repeatable, defaults to data-plugin)
        #[arg(long = "capability")]
        capabilities: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
enum PluginCommand {
    /// List statically registered plugins
    List {},
}

/// Plugins linked into this binary
fn static_plugins() -> Result<PluginRegistry, KernelError> {
    let mut registry = PluginRegistry::new();
    registry.register_plugin(Arc::new(GenericsPlugin::new()))?;
    registry.register_plugin(Arc::new(AssetsPlugin::new()))?;
    Ok(registry)
}

fn load_config(path: Option<&PathBuf>) -> Result<ConfigSource, KernelError> {
    match path {
        Some(path) => Ok(ConfigSource::load(path)?),
        None => Ok(ConfigSource::new()),
    }
}

fn print_report(report: &BootstrapReport) {
    println!("Bootstrap report: {}", report);
    for outcome in &report.outcomes {
        match &outcome.error {
            None => println!("  - {}: ok", outcome.plugin),
            Some(e) => println!("  - {}: failed ({})", outcome.plugin, e),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    if args.ping {
        println!("pong");
        return ExitCode::SUCCESS;
    }

    let config = match load_config(args.config.as_ref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = logging::init(&logging::LogSettings::from_config(&config)) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let plugins = match static_plugins() {
        Ok(plugins) => plugins,
        Err(e) => {
            eprintln!("Fatal: Failed to register core data plugins: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(args.command, config, plugins).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Application error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(
    command: Option<Commands>,
    config: ConfigSource,
    plugins: PluginRegistry,
) -> Result<(), KernelError> {
    match command {
        Some(Commands::Providers) => {
            println!("Known storage providers:");
            for kind in StorageProviderKind::ALL {
                let kind_label = if kind.is_file_based() { "file-based" } else { "server" };
                println!("  - {} ({})", kind, kind_label);
            }
            Ok(())
        }
        Some(Commands::Plugins { command: PluginCommand::List {} }) => {
            println!("Listing registered plugins:");
            if plugins.is_empty() {
                println!("  No plugins registered.");
            }
            for (plugin, capabilities) in plugins.iter_plugins() {
                let capabilities: Vec<&str> = capabilities.iter().map(Capability::as_str).collect();
                println!("  - Name: {}, Capabilities: {}", plugin.name(), capabilities.join(", "));
            }
            Ok(())
        }
        Some(Commands::Bootstrap { capabilities }) => {
            let capabilities: Vec<Capability> = if capabilities.is_empty() {
                vec![Capability::DATA]
            } else {
                capabilities.into_iter().map(Capability::from).collect()
            };

            let app = Application::new(config, plugins)?;
            let service = app.data_service()?;
            let report = service
                .bootstrap_with(app.config(), app.registry(), &capabilities)
                .await?;
            print_report(&report);
            service.shutdown().await
        }
        None => {
            println!("Initializing application...");
            let mut app = Application::new(config, plugins)?;
            app.run().await?;
            info!("{} is up", whitecore_data::kernel::constants::APP_NAME);
            println!("Shutting down application...");
            app.shutdown().await
        }
    }
}
