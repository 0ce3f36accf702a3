//! Client statement
//!
//! The per-client detail view: contact data, settlement, services newest
//! first (each labelled with its stored position, which is what the edit
//! and delete commands take) and payments in stored order.

use crate::accounting::{compute_client_financials, ClientFinancials};
use crate::display::{column_width, services_newest_first, DisplayOptions};
use crate::error::SalonResult;
use crate::models::{Client, ClientId};
use crate::services::ClientService;
use crate::storage::Storage;

#[derive(Debug, Clone)]
pub struct ClientStatement {
    pub client: Client,
    pub financials: ClientFinancials,
}

impl ClientStatement {
    pub fn generate(storage: &Storage, id: ClientId) -> SalonResult<Self> {
        let client = ClientService::new(storage).require(id)?;
        Ok(Self::for_client(client))
    }

    pub fn for_client(client: Client) -> Self {
        Self {
            financials: compute_client_financials(&client),
            client,
        }
    }

    /// Format the statement; without `show_all` only the most recent
    /// services are listed
    pub fn format_terminal(&self, opts: &DisplayOptions, show_all: bool) -> String {
        let client = &self.client;
        let mut output = String::new();

        output.push_str(&format!("{}  [{}]\n", client.name, client.id));
        output.push_str(&"=".repeat(50));
        output.push('\n');

        for (label, value) in [
            ("Phone:", &client.phone),
            ("Email:", &client.email),
            ("Notes:", &client.notes),
        ] {
            if !value.is_empty() {
                output.push_str(&format!("{:<8}{}\n", label, value));
            }
        }
        if let Some(created) = client.created_at {
            output.push_str(&format!(
                "{:<8}{}\n",
                "Since:",
                opts.date(Some(created.date_naive()))
            ));
        }

        output.push('\n');
        output.push_str(&format!("Total spent: {:>14}\n", opts.money(self.financials.total_spent)));
        output.push_str(&format!("Total paid:  {:>14}\n", opts.money(self.financials.total_paid)));
        output.push_str(&format!("Due:         {:>14}\n", opts.money(self.financials.due)));

        output.push_str(&format!("\nServices ({})\n", client.services.len()));
        let services = services_newest_first(client);
        if services.is_empty() {
            output.push_str("  No services yet.\n");
        }

        let limit = if show_all {
            services.len()
        } else {
            services.len().min(opts.recent_services_shown)
        };
        let shown = &services[..limit];
        let type_width = column_width(shown.iter().map(|(_, s)| s.service_type.as_str()), 4);

        for (position, service) in shown {
            output.push_str(&format!(
                "  {:>3}. {:<10}  {:<type_width$}  {:>12}",
                position + 1,
                opts.date(service.date),
                service.service_type,
                opts.money(service.price),
            ));
            if !service.notes.is_empty() {
                output.push_str(&format!("  {}", service.notes));
            }
            output.push('\n');
        }
        if limit < services.len() {
            output.push_str(&format!(
                "  ... {} more, show all {} with --all\n",
                services.len() - limit,
                services.len()
            ));
        }

        output.push_str(&format!("\nPayments ({})\n", client.payments.len()));
        if client.payments.is_empty() {
            output.push_str("  No payments yet.\n");
        }
        for (position, payment) in client.payments.iter().enumerate() {
            output.push_str(&format!(
                "  {:>3}. {:<10}  {:>12}  {}\n",
                position + 1,
                opts.date(payment.date),
                opts.money(payment.amount),
                payment.method,
            ));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounting::test_support::{client, payment, service};

    fn sample() -> Client {
        let mut c = client(
            5,
            "Anna Nowak",
            &[
                service("Cut", "2024-01-10", 100),
                service("Color", "2024-03-01", 200),
                service("Trim", "2024-02-01", 40),
                service("Wash", "2023-12-01", 20),
            ],
            &[payment(300, "2024-03-01")],
        );
        c.phone = "600100200".into();
        c
    }

    #[test]
    fn test_statement_settlement() {
        let statement = ClientStatement::for_client(sample());
        assert_eq!(statement.financials.total_spent.units(), 360);
        assert_eq!(statement.financials.due.units(), 60);

        let text = statement.format_terminal(&DisplayOptions::default(), false);
        assert!(text.contains("Phone:  600100200"));
        assert!(!text.contains("Email:"));
        assert!(text.contains("Due:"));
        assert!(text.contains("60.00 zł"));
    }

    #[test]
    fn test_services_newest_first_with_positions() {
        let text = ClientStatement::for_client(sample())
            .format_terminal(&DisplayOptions::default(), false);

        let color = text.find("2. 01.03.2024").unwrap();
        let trim = text.find("3. 01.02.2024").unwrap();
        let cut = text.find("1. 10.01.2024").unwrap();
        assert!(color < trim && trim < cut);
        assert!(!text.contains("01.12.2023"));
        assert!(text.contains("... 1 more, show all 4 with --all"));
    }

    #[test]
    fn test_show_all() {
        let text = ClientStatement::for_client(sample())
            .format_terminal(&DisplayOptions::default(), true);
        assert!(text.contains("4. 01.12.2023"));
        assert!(!text.contains("more, show all"));
    }
}
