//! Salon overview report
//!
//! The dashboard figures: client count, revenue, revenue over the trailing
//! window, outstanding balances and the most popular service.

use chrono::NaiveDate;

use crate::accounting::{compute_global_stats_at, Stats, REVENUE_WINDOW_DAYS};
use crate::display::{DisplayOptions, PLACEHOLDER};
use crate::error::SalonResult;
use crate::models::Client;
use crate::storage::Storage;

/// Salon-wide statistics ready for display
#[derive(Debug, Clone)]
pub struct OverviewReport {
    pub stats: Stats,
    /// Day the revenue window ends
    pub as_of: NaiveDate,
}

impl OverviewReport {
    /// Generate the report for today
    pub fn generate(storage: &Storage) -> SalonResult<Self> {
        let clients = storage.clients.get_all()?;
        Ok(Self::from_clients(&clients, chrono::Local::now().date_naive()))
    }

    pub fn from_clients(clients: &[Client], as_of: NaiveDate) -> Self {
        Self {
            stats: compute_global_stats_at(clients, as_of),
            as_of,
        }
    }

    /// `Type (count)`, or a placeholder when no services exist
    pub fn most_popular_label(&self) -> String {
        match &self.stats.most_popular_service {
            Some(p) => format!("{} ({})", p.service_type, p.count),
            None => PLACEHOLDER.to_string(),
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, opts: &DisplayOptions) -> String {
        let mut output = String::new();

        output.push_str("Salon Overview\n");
        output.push_str(&"=".repeat(44));
        output.push('\n');

        let window_label = format!("Revenue ({} days):", REVENUE_WINDOW_DAYS);
        let rows = [
            ("Clients:", self.stats.total_clients.to_string()),
            ("Total revenue:", opts.money(self.stats.total_revenue)),
            (window_label.as_str(), opts.money(self.stats.revenue_30_days)),
            ("Outstanding:", opts.money(self.stats.total_arrears)),
            ("Most popular service:", self.most_popular_label()),
        ];

        for (label, value) in rows {
            output.push_str(&format!("{:<24}{:>20}\n", label, value));
        }

        output.push_str(&format!("\nAs of {}\n", opts.date(Some(self.as_of))));
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounting::test_support::{client, payment, service};

    #[test]
    fn test_overview_figures() {
        let clients = vec![
            client(
                1,
                "Anna",
                &[service("Cut", "2024-06-01", 100), service("Cut", "2024-06-10", 100)],
                &[payment(150, "2024-06-20"), payment(20, "2024-01-01")],
            ),
            client(2, "Ewa", &[service("Color", "2024-06-02", 80)], &[]),
        ];
        let today = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();

        let report = OverviewReport::from_clients(&clients, today);
        let text = report.format_terminal(&DisplayOptions::default());

        assert!(text.contains("Clients:"));
        assert!(text.contains("170.00 zł"));
        assert!(text.contains("150.00 zł"));
        assert!(text.contains("Cut (2)"));
        assert!(text.contains("As of 30.06.2024"));
        assert_eq!(report.stats.total_arrears.units(), 80 + 30);
    }

    #[test]
    fn test_placeholder_without_services() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        let report = OverviewReport::from_clients(&[], today);
        assert_eq!(report.most_popular_label(), "—");
        assert!(report.format_terminal(&DisplayOptions::default()).contains("0.00 zł"));
    }
}
