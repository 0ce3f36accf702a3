//! CLI commands for moving data in and out
//!
//! Export to CSV, JSON or YAML, import a JSON/YAML client list, and show
//! the audit history.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::Subcommand;

use crate::backup::BackupManager;
use crate::config::settings::Settings;
use crate::error::{SalonError, SalonResult};
use crate::export::{
    export_clients_json, export_clients_yaml, export_services_csv, read_client_file,
};
use crate::services::ClientService;
use crate::storage::Storage;

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export every service as a CSV row
    Csv {
        /// Output file path (default: standard output)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export the client list as JSON (can be imported back)
    Json {
        /// Output file path (default: standard output)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export the client list as YAML
    Yaml {
        /// Output file path (default: standard output)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn open_output(output: Option<&Path>) -> SalonResult<Box<dyn Write>> {
    match output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                SalonError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(std::io::stdout().lock())),
    }
}

/// Handle export commands
pub fn handle_export_command(storage: &Storage, cmd: ExportCommands) -> SalonResult<()> {
    let clients = ClientService::new(storage).list()?;

    match cmd {
        ExportCommands::Csv { output } => {
            let rows = export_services_csv(&clients, open_output(output.as_deref())?)?;
            if let Some(path) = output {
                println!("Exported {} service(s) to: {}", rows, path.display());
            }
        }
        ExportCommands::Json { output } => {
            let mut writer = open_output(output.as_deref())?;
            export_clients_json(&clients, &mut writer)?;
            writeln!(writer)?;
            writer.flush()?;
            if let Some(path) = output {
                println!("Exported {} client(s) to: {}", clients.len(), path.display());
            }
        }
        ExportCommands::Yaml { output } => {
            let mut writer = open_output(output.as_deref())?;
            export_clients_yaml(&clients, &mut writer)?;
            writer.flush()?;
            if let Some(path) = output {
                println!("Exported {} client(s) to: {}", clients.len(), path.display());
            }
        }
    }

    Ok(())
}

/// Handle the import command
///
/// The imported list replaces every client. Current data is backed up
/// first.
pub fn handle_import_command(
    storage: &Storage,
    settings: &Settings,
    file: &Path,
    force: bool,
) -> SalonResult<()> {
    let service = ClientService::new(storage);

    if !file.exists() {
        return Err(SalonError::Import(format!(
            "File not found: {}",
            file.display()
        )));
    }

    let clients = read_client_file(file)?;
    let existing = service.count()?;

    println!("Import Preview");
    println!("{}", "=".repeat(40));
    println!("  Clients in file:     {}", clients.len());
    println!("  Clients replaced:    {}", existing);
    println!();

    if existing > 0 && !force {
        println!("WARNING: This will replace ALL current client data!");
        println!("To proceed, run again with --force flag:");
        println!("  salon import {} --force", file.display());
        return Ok(());
    }

    let manager = BackupManager::new(storage.paths().clone(), settings.backup_retention.clone());
    let backup_path = manager.create_backup()?;
    println!("Backup of current data: {}", backup_path.display());

    let imported = service.replace_all(clients, "import")?;
    println!("Imported {} client(s).", imported);

    Ok(())
}

/// Print the most recent audit entries
pub fn handle_history_command(storage: &Storage, count: usize) -> SalonResult<()> {
    let entries = storage.audit().read_recent(count)?;

    if entries.is_empty() {
        println!("No history yet.");
        return Ok(());
    }

    for entry in entries.iter().rev() {
        println!("{}", entry.format_human_readable());
    }

    Ok(())
}
