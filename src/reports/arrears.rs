//! Arrears report
//!
//! Clients who owe money, largest balance first, with the last service in
//! stored order.

use std::io::Write;

use crate::accounting::{compute_arrears, ArrearEntry};
use crate::display::{column_width, DisplayOptions};
use crate::error::{SalonError, SalonResult};
use crate::models::{Client, Money};
use crate::storage::Storage;

#[derive(Debug, Clone)]
pub struct ArrearsReport {
    pub entries: Vec<ArrearEntry>,
    pub total_due: Money,
}

impl ArrearsReport {
    pub fn generate(storage: &Storage) -> SalonResult<Self> {
        let clients = storage.clients.get_all()?;
        Ok(Self::from_clients(&clients))
    }

    pub fn from_clients(clients: &[Client]) -> Self {
        let entries = compute_arrears(clients);
        let total_due = entries.iter().map(|e| e.due).sum();
        Self { entries, total_due }
    }

    fn last_service_label(entry: &ArrearEntry, opts: &DisplayOptions) -> String {
        match &entry.last_service_type {
            Some(ty) => format!("{} ({})", ty, opts.date(entry.last_service_date)),
            None => "no data".to_string(),
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, opts: &DisplayOptions) -> String {
        if self.entries.is_empty() {
            return "No arrears. Every client is settled.\n".to_string();
        }

        let name_width = column_width(self.entries.iter().map(|e| e.name.as_str()), 6);
        let phone_width = column_width(self.entries.iter().map(|e| e.phone.as_str()), 5);

        let mut output = String::new();
        output.push_str(&format!(
            "{:<name_width$}  {:<phone_width$}  {:>14}  {}\n",
            "Client",
            "Phone",
            "Due",
            "Last service",
        ));
        output.push_str(&format!(
            "{:-<name_width$}  {:-<phone_width$}  {:->14}  {:-<20}\n",
            "", "", "", "",
        ));

        for entry in &self.entries {
            output.push_str(&format!(
                "{:<name_width$}  {:<phone_width$}  {:>14}  {}\n",
                entry.name,
                entry.phone,
                opts.money(entry.due),
                Self::last_service_label(entry, opts),
            ));
        }

        output.push_str(&format!(
            "\n{} client(s) owe {}\n",
            self.entries.len(),
            opts.money(self.total_due)
        ));
        output
    }

    /// Write the report as CSV
    pub fn export_csv<W: Write>(&self, writer: W) -> SalonResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        let err = |e: csv::Error| SalonError::Export(e.to_string());

        csv.write_record(["Client ID", "Name", "Phone", "Due", "Last Service Type", "Last Service Date"])
            .map_err(err)?;

        for entry in &self.entries {
            let date = entry
                .last_service_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default();
            csv.write_record([
                entry.client_id.to_string(),
                entry.name.clone(),
                entry.phone.clone(),
                entry.due.to_string(),
                entry.last_service_type.clone().unwrap_or_default(),
                date,
            ])
            .map_err(err)?;
        }

        csv.flush()
            .map_err(|e| SalonError::Export(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounting::test_support::{client, payment, service};

    fn sample() -> Vec<Client> {
        let mut zenon = client(2, "Zenon", &[service("Color", "2024-02-01", 100)], &[payment(20, "2024-02-01")]);
        zenon.phone = "501222333".into();
        vec![
            client(1, "Anna", &[service("Cut", "2024-01-01", 30)], &[]),
            zenon,
            client(3, "Kasia", &[service("Cut", "2024-01-01", 50)], &[payment(50, "2024-01-01")]),
            client(4, "Ola", &[], &[]),
        ]
    }

    #[test]
    fn test_terminal_output() {
        let report = ArrearsReport::from_clients(&sample());
        let text = report.format_terminal(&DisplayOptions::default());

        let zenon = text.find("Zenon").unwrap();
        let anna = text.find("Anna").unwrap();
        assert!(zenon < anna);
        assert!(!text.contains("Kasia"));
        assert!(text.contains("Color (01.02.2024)"));
        assert!(text.contains("2 client(s) owe 110.00 zł"));
    }

    #[test]
    fn test_no_service_label() {
        let entry = ArrearEntry {
            client_id: crate::models::ClientId::from_raw(4),
            name: "Ola".into(),
            phone: String::new(),
            due: Money::from_units(5),
            last_service_date: None,
            last_service_type: None,
        };
        assert_eq!(
            ArrearsReport::last_service_label(&entry, &DisplayOptions::default()),
            "no data"
        );
    }

    #[test]
    fn test_empty() {
        let report = ArrearsReport::from_clients(&[]);
        assert!(report
            .format_terminal(&DisplayOptions::default())
            .starts_with("No arrears"));
    }

    #[test]
    fn test_export_csv() {
        let report = ArrearsReport::from_clients(&sample());
        let mut buf = Vec::new();
        report.export_csv(&mut buf).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "2,Zenon,501222333,80.00,Color,2024-02-01");
        assert_eq!(lines[2], "1,Anna,,30.00,Cut,2024-01-01");
    }
}
