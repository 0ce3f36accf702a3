//! Service CLI commands
//!
//! Adds, edits and deletes entries in a client's service history.
//! Positions are the numbers shown by `salon client show`, starting at 1.

use clap::Subcommand;

use super::{parse_amount, parse_date, parse_date_or_today, to_index};
use crate::config::settings::Settings;
use crate::display::DisplayOptions;
use crate::error::{SalonError, SalonResult};
use crate::services::{ClientService, NewService, ServiceEntryService};
use crate::storage::Storage;

/// Service subcommands
#[derive(Subcommand)]
pub enum ServiceCommands {
    /// Record a service for a client
    Add {
        /// Client name or ID
        client: String,
        /// Service type (e.g., "Haircut")
        service_type: String,
        /// Price (e.g., "150" or "150.50")
        price: String,
        /// Service date (YYYY-MM-DD, default today)
        #[arg(short, long)]
        date: Option<String>,
        /// Notes
        #[arg(short, long, default_value = "")]
        notes: String,
    },
    /// Edit a recorded service
    Edit {
        /// Client name or ID
        client: String,
        /// Service number as shown by `salon client show`
        position: usize,
        /// New service type
        #[arg(short = 't', long = "type")]
        service_type: Option<String>,
        /// New price
        #[arg(short, long)]
        price: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        /// New notes
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// Delete a recorded service
    Delete {
        /// Client name or ID
        client: String,
        /// Service number as shown by `salon client show`
        position: usize,
    },
}

/// Handle a service command
pub fn handle_service_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ServiceCommands,
) -> SalonResult<()> {
    let clients = ClientService::new(storage);
    let entries = ServiceEntryService::new(storage);
    let opts = DisplayOptions::from_settings(settings);

    match cmd {
        ServiceCommands::Add {
            client,
            service_type,
            price,
            date,
            notes,
        } => {
            let found = clients.resolve(&client)?;
            let input = NewService {
                service_type,
                date: parse_date_or_today(date.as_deref())?,
                price: parse_amount(&price)?,
                notes,
            };
            let date = input.date;
            let price = input.price;

            let position = entries.add(found.id, input)?;
            println!(
                "Recorded service #{} for {}: {} on {}",
                position + 1,
                found.name,
                opts.money(price),
                opts.date(Some(date))
            );
        }

        ServiceCommands::Edit {
            client,
            position,
            service_type,
            price,
            date,
            notes,
        } => {
            let found = clients.resolve(&client)?;
            let index = to_index(position)?;
            let current = found
                .service(index)
                .ok_or_else(|| SalonError::service_not_found(format!("{}#{}", found.id, position)))?;

            let date = match date {
                Some(d) => parse_date(&d)?,
                None => current.date.ok_or_else(|| {
                    SalonError::Validation(format!(
                        "Service #{} has no readable date. Pass --date.",
                        position
                    ))
                })?,
            };
            let price = match price {
                Some(p) => parse_amount(&p)?,
                None => current.price,
            };

            let updated = entries.update(
                found.id,
                index,
                NewService {
                    service_type: service_type.unwrap_or_else(|| current.service_type.clone()),
                    date,
                    price,
                    notes: notes.unwrap_or_else(|| current.notes.clone()),
                },
            )?;
            println!(
                "Updated service #{} for {}: {} {}",
                position,
                found.name,
                updated.service_type,
                opts.money(updated.price)
            );
        }

        ServiceCommands::Delete { client, position } => {
            let found = clients.resolve(&client)?;
            let removed = entries.remove(found.id, to_index(position)?)?;
            println!(
                "Deleted service #{} for {}: {} on {}",
                position,
                found.name,
                removed.service_type,
                opts.date(removed.date)
            );
        }
    }

    Ok(())
}
