//! CLI commands for reports
//!
//! Salon overview, arrears list and per-client statements.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::DisplayOptions;
use crate::error::{SalonError, SalonResult};
use crate::reports::{ArrearsReport, ClientStatement, OverviewReport};
use crate::services::ClientService;
use crate::storage::Storage;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Salon totals: clients, revenue, arrears, most popular service
    #[command(alias = "overview")]
    Stats,

    /// Clients who owe money, largest debt first
    Arrears {
        /// Print as CSV instead of a table
        #[arg(long)]
        csv: bool,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Settlement statement for one client
    Statement {
        /// Client name or ID
        client: String,

        /// List every service
        #[arg(short, long)]
        all: bool,
    },
}

/// Handle a report command
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> SalonResult<()> {
    let opts = DisplayOptions::from_settings(settings);

    match cmd {
        ReportCommands::Stats => {
            let report = OverviewReport::generate(storage)?;
            print!("{}", report.format_terminal(&opts));
        }

        ReportCommands::Arrears { csv, output } => {
            let report = ArrearsReport::generate(storage)?;

            if let Some(path) = output {
                let file = File::create(&path).map_err(|e| {
                    SalonError::Export(format!("Failed to create file {}: {}", path.display(), e))
                })?;
                report.export_csv(BufWriter::new(file))?;
                println!("Arrears exported to: {}", path.display());
            } else if csv {
                report.export_csv(std::io::stdout().lock())?;
            } else {
                print!("{}", report.format_terminal(&opts));
            }
        }

        ReportCommands::Statement { client, all } => {
            let found = ClientService::new(storage).resolve(&client)?;
            let statement = ClientStatement::generate(storage, found.id)?;
            print!("{}", statement.format_terminal(&opts, all));
        }
    }

    Ok(())
}
