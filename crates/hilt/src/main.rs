mod cli;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use log::debug;
use serde_json::json;

use hilt_core::kernel::constants::{DATA_FILE_NAME, SETTINGS_FILE_NAME};
use hilt_core::storage::{KeyValueStore, LocalStore, MemoryStore};
use hilt_core::{HostSession, KernelError, PluginHooks, PluginStatus, PluginValue};

/// Hilt: a plugin lifecycle host
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Simple ping command for smoke testing
    #[arg(long)]
    ping: bool,

    /// Directory holding the settings and plugin data stores. State is kept
    /// in memory when omitted.
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Manage plugins
    Plugin {
        #[command(subcommand)]
        command: PluginCommand,
    },
}

#[derive(Subcommand, Debug)]
enum PluginCommand {
    /// List registered plugins and their lifecycle status
    List {},
    /// Enable a plugin (persist setting)
    Enable {
        /// The name of the plugin to enable
        name: String,
    },
    /// Disable a plugin (persist setting)
    Disable {
        /// The name of the plugin to disable
        name: String,
    },
}

/// Build a session over the chosen data directory, routing notices through
/// the CLI notifier.
fn build_session(data_dir: Option<PathBuf>) -> Result<HostSession, KernelError> {
    let (settings, data): (Arc<dyn KeyValueStore>, Arc<dyn KeyValueStore>) = match data_dir {
        Some(dir) => (
            Arc::new(LocalStore::open(dir.join(SETTINGS_FILE_NAME))?),
            Arc::new(LocalStore::open(dir.join(DATA_FILE_NAME))?),
        ),
        None => (Arc::new(MemoryStore::new()), Arc::new(MemoryStore::new())),
    };
    Ok(HostSession::with_stores(
        settings,
        data,
        Arc::new(cli::CliNotifier),
    ))
}

/// Register the plugins this host ships with. Third-party registrations
/// would arrive the same way, before the view is bound.
fn register_bundled_plugins(session: &HostSession) -> Result<(), KernelError> {
    let controller = session.controller();

    controller.register(
        &json!({
            "name": "Settings",
            "description": "Core settings plugin",
        }),
        PluginHooks::on_enable(|_api| Ok(Arc::new("settings".to_string()) as PluginValue)),
    )?;

    controller.register(
        &json!({
            "name": "Hello World js",
            "description": "Sample greeting plugin",
        }),
        PluginHooks::on_enable(|api| {
            println!("Hello from '{}'", api.plugin_name());
            Ok(Arc::new("hello".to_string()) as PluginValue)
        })
        .on_disable(|_value| {
            println!("Goodbye from 'Hello World js'");
            Ok(())
        }),
    )?;

    Ok(())
}

async fn start_session(data_dir: Option<PathBuf>) -> Result<HostSession, KernelError> {
    let session = build_session(data_dir)?;
    session.start().await?;
    register_bundled_plugins(&session)?;
    session
        .controller()
        .resolve_view(Arc::new("hilt host".to_string()) as PluginValue)?;
    Ok(session)
}

async fn run(args: CliArgs) -> Result<(), KernelError> {
    match args.command {
        Some(Commands::Plugin { command }) => match command {
            PluginCommand::List {} => {
                let session = start_session(args.data_dir).await?;
                let controller = session.controller();
                let names = controller.plugin_names();
                if names.is_empty() {
                    println!("No plugins registered.");
                } else {
                    println!("Registered plugins:");
                    for name in names {
                        let enabled = if controller.is_enabled(&name) {
                            "enabled"
                        } else {
                            "disabled"
                        };
                        println!("  - {} [{}] ({})", name, controller.status(&name), enabled);
                    }
                }
                session.shutdown().await
            }
            PluginCommand::Enable { name } => {
                let session = start_session(args.data_dir).await?;
                session.controller().enable_plugin(&name)?;
                println!("Marked plugin '{}' as enabled.", name);
                session.shutdown().await
            }
            PluginCommand::Disable { name } => {
                let session = start_session(args.data_dir).await?;
                session.controller().disable_plugin(&name)?;
                println!("Marked plugin '{}' as disabled.", name);
                session.shutdown().await
            }
        },
        None => {
            println!("Initializing session...");
            let session = start_session(args.data_dir).await?;
            let controller = session.controller();
            let loaded: Vec<String> = controller
                .plugin_names()
                .into_iter()
                .filter(|name| controller.status(name) == PluginStatus::Loaded)
                .collect();
            println!("Loaded plugins: {}", loaded.join(", "));
            println!("Shutting down session...");
            session.shutdown().await
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let args = CliArgs::parse();
    debug!("parsed arguments: {:?}", args);
    if args.ping {
        println!("pong");
        return ExitCode::SUCCESS;
    }

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
