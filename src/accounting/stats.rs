//! Salon-wide statistics

use chrono::{Duration, Local, NaiveDate};
use serde::Serialize;
use std::collections::HashMap;

use super::financials::compute_client_financials;
use crate::models::{Client, Money};

/// Length of the trailing revenue window
pub const REVENUE_WINDOW_DAYS: i64 = 30;

/// A service type with its number of occurrences
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePopularity {
    pub service_type: String,
    pub count: usize,
}

/// Aggregate figures over every client
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_clients: usize,
    /// Sum of all payments
    pub total_revenue: Money,
    /// Sum of payments dated within the revenue window
    #[serde(rename = "revenue30Days")]
    pub revenue_30_days: Money,
    /// Sum of every client's clamped balance
    pub total_arrears: Money,
    /// Absent when no services exist
    pub most_popular_service: Option<ServicePopularity>,
}

/// Compute statistics relative to today's date
pub fn compute_global_stats(clients: &[Client]) -> Stats {
    compute_global_stats_at(clients, Local::now().date_naive())
}

/// Compute statistics relative to `today`
///
/// A payment counts toward the window when its date is on or after
/// `today - 30 days`. Payments with an unknown date still count toward
/// total revenue but never toward the window.
pub fn compute_global_stats_at(clients: &[Client], today: NaiveDate) -> Stats {
    let window_start = today - Duration::days(REVENUE_WINDOW_DAYS);

    let mut total_revenue = Money::zero();
    let mut revenue_30_days = Money::zero();
    let mut total_arrears = Money::zero();

    for client in clients {
        for payment in &client.payments {
            total_revenue += payment.amount;
            if payment.date.is_some_and(|d| d >= window_start) {
                revenue_30_days += payment.amount;
            }
        }
        total_arrears += compute_client_financials(client).due;
    }

    Stats {
        total_clients: clients.len(),
        total_revenue,
        revenue_30_days,
        total_arrears,
        most_popular_service: most_popular_service(clients),
    }
}

/// Find the most frequent service type
///
/// Ties go to the type that was seen first, scanning clients and then their
/// services in stored order.
pub fn most_popular_service(clients: &[Client]) -> Option<ServicePopularity> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for service in clients.iter().flat_map(|c| c.services.iter()) {
        let ty = service.service_type.as_str();
        match index.get(ty) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(ty, counts.len());
                counts.push((ty, 1));
            }
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for &(ty, count) in &counts {
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((ty, count));
        }
    }

    best.map(|(ty, count)| ServicePopularity {
        service_type: ty.to_string(),
        count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounting::test_support::{client, payment, service};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
    }

    #[test]
    fn test_empty_list() {
        let stats = compute_global_stats_at(&[], today());
        assert_eq!(stats.total_clients, 0);
        assert_eq!(stats.total_revenue, Money::zero());
        assert_eq!(stats.revenue_30_days, Money::zero());
        assert_eq!(stats.total_arrears, Money::zero());
        assert_eq!(stats.most_popular_service, None);
    }

    #[test]
    fn test_revenue_window() {
        let clients = vec![client(
            1,
            "Anna",
            &[],
            &[payment(100, "2024-05-21"), payment(40, "2024-06-25")],
        )];

        let stats = compute_global_stats_at(&clients, today());
        assert_eq!(stats.total_revenue, Money::from_units(140));
        assert_eq!(stats.revenue_30_days, Money::from_units(40));
    }

    #[test]
    fn test_window_boundary_is_inclusive() {
        let clients = vec![client(
            1,
            "Anna",
            &[],
            &[payment(10, "2024-05-31"), payment(20, "2024-05-30")],
        )];

        let stats = compute_global_stats_at(&clients, today());
        assert_eq!(stats.revenue_30_days, Money::from_units(10));
    }

    #[test]
    fn test_unknown_payment_date_outside_window() {
        let clients = vec![client(1, "Anna", &[], &[payment(25, "not a date")])];

        let stats = compute_global_stats_at(&clients, today());
        assert_eq!(stats.total_revenue, Money::from_units(25));
        assert_eq!(stats.revenue_30_days, Money::zero());
    }

    #[test]
    fn test_live_clock_window() {
        let now = Local::now().date_naive();
        let fmt = |d: NaiveDate| d.format("%Y-%m-%d").to_string();
        let clients = vec![client(
            1,
            "Anna",
            &[],
            &[
                payment(70, &fmt(now - Duration::days(40))),
                payment(30, &fmt(now - Duration::days(5))),
            ],
        )];

        let stats = compute_global_stats(&clients);
        assert_eq!(stats.total_revenue, Money::from_units(100));
        assert_eq!(stats.revenue_30_days, Money::from_units(30));
    }

    #[test]
    fn test_revenue_is_payment_based_and_arrears_clamped() {
        let clients = vec![
            client(1, "Anna", &[service("Cut", "2024-06-01", 100)], &[payment(30, "2024-06-01")]),
            client(2, "Ewa", &[service("Cut", "2024-06-01", 10)], &[payment(50, "2024-06-01")]),
        ];

        let stats = compute_global_stats_at(&clients, today());
        assert_eq!(stats.total_clients, 2);
        assert_eq!(stats.total_revenue, Money::from_units(80));
        assert_eq!(stats.total_arrears, Money::from_units(70));
    }

    #[test]
    fn test_most_popular_counts_every_service() {
        let clients = vec![
            client(1, "Anna", &[service("Cut", "2024-01-01", 1), service("Color", "2024-01-02", 1)], &[]),
            client(2, "Ewa", &[service("Cut", "2024-01-03", 1)], &[]),
        ];

        let popular = most_popular_service(&clients).unwrap();
        assert_eq!(popular.service_type, "Cut");
        assert_eq!(popular.count, 2);
    }

    #[test]
    fn test_most_popular_tie_goes_to_first_seen() {
        let clients = vec![
            client(1, "Anna", &[service("Color", "2024-01-01", 1), service("Cut", "2024-01-02", 1)], &[]),
            client(2, "Ewa", &[service("Cut", "2024-01-03", 1), service("Color", "2024-01-04", 1)], &[]),
        ];

        let popular = most_popular_service(&clients).unwrap();
        assert_eq!(popular.service_type, "Color");
        assert_eq!(popular.count, 2);
    }
}
