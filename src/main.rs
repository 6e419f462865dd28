//! akumi CLI
//!
//! Manage and connect to SSH targets from the terminal.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use akumi::launcher::SshLauncher;
use akumi::logging;
use akumi::report::format_targets;
use akumi::store::{ConfigStore, FileStore, default_config_path};
use akumi::types::OutputFormat;

#[derive(Parser)]
#[command(name = "akumi")]
#[command(about = "Manage and connect to SSH targets from a terminal UI")]
#[command(version)]
struct Cli {
    /// Config file (default: <config dir>/akumi/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log file (default: <cache dir>/akumi/akumi.log)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    /// SSH client to run for connections
    #[arg(long, default_value = "ssh")]
    ssh_program: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the stored targets without starting the TUI
    List {
        /// Output format
        #[arg(long, value_enum, default_value = "human")]
        format: OutputFormatArg,
    },

    /// Print the resolved config file path
    Path,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormatArg {
    Human,
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Human => OutputFormat::Human,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.log_file.clone(), cli.verbose);

    let result = match cli.command {
        None => cmd_tui(cli.config, cli.ssh_program),
        Some(Commands::List { format }) => cmd_list(cli.config, format.into()),
        Some(Commands::Path) => cmd_path(cli.config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Logging is optional: on failure, warn and carry on without it.
fn init_logging(path: Option<PathBuf>, verbose: bool) {
    let Some(path) = path.or_else(logging::default_log_path) else {
        eprintln!("warning: no cache directory found, logging disabled");
        return;
    };
    if let Err(e) = logging::init(&path, verbose) {
        eprintln!("warning: could not open log file {}: {}", path.display(), e);
    }
}

// ============================================================================
// PATH RESOLUTION
// ============================================================================

/// Use the provided path or fall back to the per-user default.
fn resolve_store(config: Option<PathBuf>) -> Result<FileStore, String> {
    match config {
        Some(path) => Ok(FileStore::new(path)),
        None => FileStore::at_default_location().map_err(|e| e.to_string()),
    }
}

// ============================================================================
// COMMANDS
// ============================================================================

fn cmd_tui(config: Option<PathBuf>, ssh_program: String) -> Result<(), String> {
    let store = resolve_store(config)?;
    log::info!("starting with config {}", store.path().display());

    akumi::tui::run(store, SshLauncher::with_program(ssh_program)).map_err(|e| e.to_string())
}

fn cmd_list(config: Option<PathBuf>, format: OutputFormat) -> Result<(), String> {
    let store = resolve_store(config)?;
    let config = store.load().map_err(|e| e.to_string())?;
    print!("{}", format_targets(&config.targets, format));
    Ok(())
}

fn cmd_path(config: Option<PathBuf>) -> Result<(), String> {
    let path = match config {
        Some(path) => path,
        None => default_config_path().map_err(|e| e.to_string())?,
    };
    println!("{}", path.display());
    Ok(())
}
