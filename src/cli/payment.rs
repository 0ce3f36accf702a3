//! Payment CLI commands
//!
//! Positions are the numbers shown by `salon client show`, starting at 1.

use clap::Subcommand;

use super::{parse_amount, parse_date, parse_date_or_today, to_index};
use crate::accounting::compute_client_financials;
use crate::config::settings::Settings;
use crate::display::DisplayOptions;
use crate::error::{SalonError, SalonResult};
use crate::services::{ClientService, NewPayment, PaymentService};
use crate::storage::Storage;

/// Payment subcommands
#[derive(Subcommand)]
pub enum PaymentCommands {
    /// Record a payment from a client
    Add {
        /// Client name or ID
        client: String,
        /// Amount (e.g., "150" or "150.50")
        amount: String,
        /// Payment date (YYYY-MM-DD, default today)
        #[arg(short, long)]
        date: Option<String>,
        /// Payment method
        #[arg(short, long, default_value = "cash")]
        method: String,
    },
    /// Edit a recorded payment
    Edit {
        /// Client name or ID
        client: String,
        /// Payment number as shown by `salon client show`
        position: usize,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        /// New payment method
        #[arg(short, long)]
        method: Option<String>,
    },
    /// Delete a recorded payment
    Delete {
        /// Client name or ID
        client: String,
        /// Payment number as shown by `salon client show`
        position: usize,
    },
}

/// Handle a payment command
pub fn handle_payment_command(
    storage: &Storage,
    settings: &Settings,
    cmd: PaymentCommands,
) -> SalonResult<()> {
    let clients = ClientService::new(storage);
    let payments = PaymentService::new(storage);
    let opts = DisplayOptions::from_settings(settings);

    match cmd {
        PaymentCommands::Add {
            client,
            amount,
            date,
            method,
        } => {
            let found = clients.resolve(&client)?;
            let amount = parse_amount(&amount)?;

            payments.add(
                found.id,
                NewPayment {
                    amount,
                    date: parse_date_or_today(date.as_deref())?,
                    method,
                },
            )?;

            let due = compute_client_financials(&clients.require(found.id)?).due;
            println!("Recorded payment of {} from {}", opts.money(amount), found.name);
            println!("  Still due: {}", opts.money(due));
        }

        PaymentCommands::Edit {
            client,
            position,
            amount,
            date,
            method,
        } => {
            let found = clients.resolve(&client)?;
            let index = to_index(position)?;
            let current = found
                .payment(index)
                .ok_or_else(|| SalonError::payment_not_found(format!("{}#{}", found.id, position)))?;

            let date = match date {
                Some(d) => parse_date(&d)?,
                None => current.date.ok_or_else(|| {
                    SalonError::Validation(format!(
                        "Payment #{} has no readable date. Pass --date.",
                        position
                    ))
                })?,
            };
            let amount = match amount {
                Some(a) => parse_amount(&a)?,
                None => current.amount,
            };

            let updated = payments.update(
                found.id,
                index,
                NewPayment {
                    amount,
                    date,
                    method: method.unwrap_or_else(|| current.method.clone()),
                },
            )?;
            println!(
                "Updated payment #{} for {}: {}",
                position,
                found.name,
                opts.money(updated.amount)
            );
        }

        PaymentCommands::Delete { client, position } => {
            let found = clients.resolve(&client)?;
            let removed = payments.remove(found.id, to_index(position)?)?;
            println!(
                "Deleted payment #{} for {}: {}",
                position,
                found.name,
                opts.money(removed.amount)
            );
        }
    }

    Ok(())
}
