//! Client CLI commands
//!
//! Implements CLI commands for client management.

use clap::Subcommand;

use crate::accounting::{ClientQuery, Collator, SortMode};
use crate::config::settings::Settings;
use crate::display::{format_client_list, DisplayOptions};
use crate::error::SalonResult;
use crate::reports::ClientStatement;
use crate::services::{ClientService, ClientUpdate, NewClient};
use crate::storage::Storage;

/// Client subcommands
#[derive(Subcommand)]
pub enum ClientCommands {
    /// Add a new client
    Add {
        /// Client name
        name: String,
        /// Phone number
        #[arg(short, long, default_value = "")]
        phone: String,
        /// Email address
        #[arg(short, long, default_value = "")]
        email: String,
        /// Notes
        #[arg(short, long, default_value = "")]
        notes: String,
    },
    /// List clients
    List {
        /// Only clients whose name or phone contains this text
        #[arg(short, long)]
        search: Option<String>,
        /// Only clients who had this service type
        #[arg(short = 't', long = "type")]
        service_type: Option<String>,
        /// Sort order (name, name-desc, lastService, totalSpent)
        #[arg(long, default_value = "name")]
        sort: String,
    },
    /// Show a client's details and settlement
    Show {
        /// Client name or ID
        client: String,
        /// Show every service instead of the most recent ones
        #[arg(short, long)]
        all: bool,
    },
    /// Edit a client's contact data
    Edit {
        /// Client name or ID
        client: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New phone number
        #[arg(short, long)]
        phone: Option<String>,
        /// New email address
        #[arg(short, long)]
        email: Option<String>,
        /// New notes (an empty value clears them)
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// Delete a client with all services and payments
    Delete {
        /// Client name or ID
        client: String,
        /// Delete now instead of printing what would be removed
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle a client command
pub fn handle_client_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ClientCommands,
) -> SalonResult<()> {
    let service = ClientService::new(storage);
    let opts = DisplayOptions::from_settings(settings);

    match cmd {
        ClientCommands::Add {
            name,
            phone,
            email,
            notes,
        } => {
            let client = service.create(NewClient {
                name,
                phone,
                email,
                notes,
            })?;

            println!("Added client: {}", client.name);
            if !client.phone.is_empty() {
                println!("  Phone: {}", client.phone);
            }
            println!("  ID: {}", client.id);
        }

        ClientCommands::List {
            search,
            service_type,
            sort,
        } => {
            let clients = service.list()?;
            let collator = Collator::new(settings.locale);

            let mut query = ClientQuery::new().sort(SortMode::from_key(&sort));
            if let Some(search) = search {
                query = query.search(search);
            }
            if let Some(service_type) = service_type {
                query = query.service_type(service_type);
            }

            let view = query.apply(&clients, &collator);
            print!("{}", format_client_list(&view, &opts));
        }

        ClientCommands::Show { client, all } => {
            let found = service.resolve(&client)?;
            let statement = ClientStatement::for_client(found);
            print!("{}", statement.format_terminal(&opts, all));
        }

        ClientCommands::Edit {
            client,
            name,
            phone,
            email,
            notes,
        } => {
            let found = service.resolve(&client)?;

            if name.is_none() && phone.is_none() && email.is_none() && notes.is_none() {
                println!("No changes specified. Use --name, --phone, --email or --notes.");
                return Ok(());
            }

            let updated = service.update(
                found.id,
                ClientUpdate {
                    name,
                    phone,
                    email,
                    notes,
                },
            )?;
            println!("Updated client: {}", updated.name);
        }

        ClientCommands::Delete { client, force } => {
            let found = service.resolve(&client)?;

            if !force {
                println!(
                    "This will delete '{}' with {} service(s) and {} payment(s).",
                    found.name,
                    found.services.len(),
                    found.payments.len()
                );
                println!("To proceed, run again with --force flag:");
                println!("  salon client delete {} --force", found.id);
                return Ok(());
            }

            let deleted = service.delete(found.id)?;
            println!("Deleted client: {}", deleted.name);
        }
    }

    Ok(())
}
