use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use salon_ledger::cli::{
    handle_backup_command, handle_client_command, handle_config_command, handle_export_command,
    handle_history_command, handle_import_command, handle_payment_command, handle_report_command,
    handle_service_command,
};
use salon_ledger::config::{paths::SalonPaths, settings::Settings};
use salon_ledger::storage::Storage;

/// Environment variable holding the log filter
const LOG_ENV: &str = "SALON_LOG";

#[derive(Parser)]
#[command(
    name = "salon",
    version,
    about = "Client accounting for a hair salon",
    long_about = "salon-ledger keeps a salon's clients with their services and \
                  payments, tracks who owes what and reports revenue, from the \
                  command line."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Client management commands
    #[command(subcommand)]
    Client(salon_ledger::cli::ClientCommands),

    /// Record, edit and delete services
    #[command(subcommand)]
    Service(salon_ledger::cli::ServiceCommands),

    /// Record, edit and delete payments
    #[command(subcommand, alias = "pay")]
    Payment(salon_ledger::cli::PaymentCommands),

    /// Reports: stats, arrears, client statements
    #[command(subcommand)]
    Report(salon_ledger::cli::ReportCommands),

    /// Export data
    #[command(subcommand)]
    Export(salon_ledger::cli::ExportCommands),

    /// Replace the client list with an exported JSON or YAML file
    Import {
        /// Path to the file
        file: PathBuf,
        /// Replace existing clients instead of only showing the preview
        #[arg(short, long)]
        force: bool,
    },

    /// Backup management commands
    #[command(subcommand)]
    Backup(salon_ledger::cli::BackupCommands),

    /// Show recent changes
    History {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        count: usize,
    },

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        command: Option<salon_ledger::cli::ConfigCommands>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = SalonPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Client(cmd)) => handle_client_command(&storage, &settings, cmd)?,
        Some(Commands::Service(cmd)) => handle_service_command(&storage, &settings, cmd)?,
        Some(Commands::Payment(cmd)) => handle_payment_command(&storage, &settings, cmd)?,
        Some(Commands::Report(cmd)) => handle_report_command(&storage, &settings, cmd)?,
        Some(Commands::Export(cmd)) => handle_export_command(&storage, cmd)?,
        Some(Commands::Import { file, force }) => {
            handle_import_command(&storage, &settings, &file, force)?
        }
        Some(Commands::Backup(cmd)) => handle_backup_command(&storage, &settings, cmd)?,
        Some(Commands::History { count }) => handle_history_command(&storage, count)?,
        Some(Commands::Config { command }) => handle_config_command(
            &paths,
            &mut settings,
            command.unwrap_or(salon_ledger::cli::ConfigCommands::Show),
        )?,
        None => {
            println!("salon-ledger - client accounting for a hair salon");
            println!();
            println!("Run 'salon --help' for usage information.");
            println!("Run 'salon client add NAME' to add your first client.");
        }
    }

    Ok(())
}
