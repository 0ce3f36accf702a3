//! Client list formatting

use super::{column_width, DisplayOptions};
use crate::accounting::{compute_client_financials, ClientView};
use crate::models::{Client, Service};

/// A client's services newest first, each with its stored position
///
/// Services with an unknown date come last; equal dates keep stored order.
pub fn services_newest_first(client: &Client) -> Vec<(usize, &Service)> {
    let mut services: Vec<(usize, &Service)> = client.services.iter().enumerate().collect();
    services.sort_by(|a, b| b.1.date.cmp(&a.1.date));
    services
}

/// Format a searched, filtered and sorted client list
///
/// Each client shows its settlement and at most
/// `opts.recent_services_shown` services, newest first.
pub fn format_client_list(view: &ClientView<'_>, opts: &DisplayOptions) -> String {
    if view.clients.is_empty() {
        return "No clients found.\n".to_string();
    }

    let mut output = format!("Clients: {}\n", view.count);

    for client in &view.clients {
        let financials = compute_client_financials(client);

        output.push('\n');
        output.push_str(&format!("{}  [{}]\n", client.name, client.id));

        let contact: Vec<&str> = [client.phone.as_str(), client.email.as_str()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect();
        if !contact.is_empty() {
            output.push_str(&format!("  {}\n", contact.join(" | ")));
        }

        output.push_str(&format!(
            "  Spent: {}   Paid: {}   Due: {}\n",
            opts.money(financials.total_spent),
            opts.money(financials.total_paid),
            opts.money(financials.due),
        ));

        let services = services_newest_first(client);
        let shown = &services[..services.len().min(opts.recent_services_shown)];
        let type_width = column_width(shown.iter().map(|(_, s)| s.service_type.as_str()), 4);

        for (position, service) in shown {
            output.push_str(&format!(
                "  {:>3}. {:<10}  {:<type_width$}  {:>12}\n",
                position + 1,
                opts.date(service.date),
                service.service_type,
                opts.money(service.price),
                type_width = type_width,
            ));
        }

        let hidden = services.len() - shown.len();
        if hidden > 0 {
            output.push_str(&format!(
                "       ... {} more (salon client show {})\n",
                hidden, client.id
            ));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounting::{ClientQuery, Collator};
    use crate::models::lenient::parse_date;
    use crate::models::{ClientId, Money};

    fn service(ty: &str, date: &str, price: i64) -> Service {
        Service {
            service_type: ty.into(),
            date: parse_date(date),
            price: Money::from_units(price),
            notes: String::new(),
        }
    }

    #[test]
    fn test_services_newest_first() {
        let mut client = Client::new(ClientId::from_raw(1), "Anna");
        client.services = vec![
            service("Cut", "2024-01-05", 50),
            service("Perm", "garbage", 80),
            service("Color", "2024-03-01", 120),
            service("Trim", "2024-01-05", 30),
        ];

        let order: Vec<usize> = services_newest_first(&client).iter().map(|(i, _)| *i).collect();
        assert_eq!(order, vec![2, 0, 3, 1]);
    }

    #[test]
    fn test_list_limits_services() {
        let mut client = Client::new(ClientId::from_raw(7), "Anna").with_phone("600100200");
        client.services = (1..=5)
            .map(|d| service("Cut", &format!("2024-02-0{}", d), 10))
            .collect();
        let clients = vec![client];

        let view = ClientQuery::new().apply(&clients, &Collator::default());
        let output = format_client_list(&view, &DisplayOptions::default());

        assert!(output.starts_with("Clients: 1\n"));
        assert!(output.contains("600100200"));
        assert!(output.contains("Due: 50.00 zł"));
        assert!(output.contains("05.02.2024"));
        assert!(!output.contains("01.02.2024"));
        assert!(output.contains("... 2 more (salon client show 7)"));
    }

    #[test]
    fn test_empty_list() {
        let clients: Vec<Client> = Vec::new();
        let view = ClientQuery::new().apply(&clients, &Collator::default());
        assert_eq!(format_client_list(&view, &DisplayOptions::default()), "No clients found.\n");
    }
}
