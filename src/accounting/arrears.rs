//! Clients who still owe money

use chrono::NaiveDate;
use serde::Serialize;

use super::financials::compute_client_financials;
use crate::models::{Client, ClientId, Money};

/// One client with an outstanding balance
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrearEntry {
    pub client_id: ClientId,
    pub name: String,
    pub phone: String,
    /// Amount owed, always positive
    pub due: Money,
    /// Date of the last service in stored order
    pub last_service_date: Option<NaiveDate>,
    /// Type of the last service in stored order
    pub last_service_type: Option<String>,
}

/// List clients with a positive balance, largest balance first
///
/// "Last service" is the service at the last stored position, not the one
/// with the latest date. Clients with equal balances keep their input order.
pub fn compute_arrears(clients: &[Client]) -> Vec<ArrearEntry> {
    let mut entries: Vec<ArrearEntry> = clients
        .iter()
        .filter_map(|client| {
            let due = compute_client_financials(client).due;
            if !due.is_positive() {
                return None;
            }

            let last = client.services.last();
            Some(ArrearEntry {
                client_id: client.id,
                name: client.name.clone(),
                phone: client.phone.clone(),
                due,
                last_service_date: last.and_then(|s| s.date),
                last_service_type: last.map(|s| s.service_type.clone()),
            })
        })
        .collect();

    entries.sort_by(|a, b| b.due.cmp(&a.due));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounting::test_support::{client, payment, service};

    #[test]
    fn test_arrears_order_and_exclusion() {
        let clients = vec![
            client(1, "Anna", &[service("Cut", "2024-01-01", 30)], &[]),
            client(2, "Zenon", &[service("Color", "2024-01-01", 100)], &[payment(20, "2024-01-02")]),
            client(3, "Kasia", &[service("Cut", "2024-01-01", 50)], &[payment(50, "2024-01-02")]),
        ];

        let arrears = compute_arrears(&clients);
        let names: Vec<&str> = arrears.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Zenon", "Anna"]);
        assert_eq!(arrears[0].due, Money::from_units(80));
        assert_eq!(arrears[1].due, Money::from_units(30));
    }

    #[test]
    fn test_last_service_is_positional() {
        let clients = vec![client(
            1,
            "Anna",
            &[
                service("Color", "2024-05-01", 100),
                service("Cut", "2024-01-01", 50),
            ],
            &[],
        )];

        let arrears = compute_arrears(&clients);
        assert_eq!(arrears[0].last_service_type.as_deref(), Some("Cut"));
        assert_eq!(
            arrears[0].last_service_date,
            NaiveDate::from_ymd_opt(2024, 1, 1)
        );
    }

    #[test]
    fn test_ties_keep_input_order_and_sorted_descending() {
        let clients = vec![
            client(1, "B", &[service("Cut", "2024-01-01", 10)], &[]),
            client(2, "A", &[service("Cut", "2024-01-01", 40)], &[]),
            client(3, "C", &[service("Cut", "2024-01-01", 10)], &[]),
            client(4, "D", &[], &[payment(10, "2024-01-01")]),
        ];

        let arrears = compute_arrears(&clients);
        let ids: Vec<i64> = arrears.iter().map(|e| e.client_id.as_i64()).collect();
        assert_eq!(ids, vec![2, 1, 3]);
        assert!(arrears.windows(2).all(|w| w[0].due >= w[1].due));
        assert!(arrears.iter().all(|e| e.due.is_positive()));
    }

    #[test]
    fn test_empty_input() {
        assert!(compute_arrears(&[]).is_empty());
    }
}
