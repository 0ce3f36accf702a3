//! CSV export
//!
//! One row per service, with the owning client's contact data repeated on
//! each row. Clients without services produce no rows.

use std::io::Write;

use crate::error::{SalonError, SalonResult};
use crate::models::Client;

/// Column headers of the service export
pub const CSV_HEADER: [&str; 7] = [
    "Name",
    "Phone",
    "Email",
    "Service Type",
    "Service Date",
    "Price",
    "Notes",
];

/// Write every service as a CSV row; returns the number of rows written
pub fn export_services_csv<W: Write>(clients: &[Client], writer: W) -> SalonResult<usize> {
    if clients.is_empty() {
        return Err(SalonError::Export("No clients to export".into()));
    }

    let err = |e: csv::Error| SalonError::Export(e.to_string());
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(CSV_HEADER).map_err(err)?;

    let mut rows = 0;
    for client in clients {
        for service in &client.services {
            let date = service
                .date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default();
            let price = service.price.to_string();

            csv.write_record([
                client.name.as_str(),
                client.phone.as_str(),
                client.email.as_str(),
                service.service_type.as_str(),
                date.as_str(),
                price.as_str(),
                service.notes.as_str(),
            ])
            .map_err(err)?;
            rows += 1;
        }
    }

    csv.flush()
        .map_err(|e| SalonError::Export(e.to_string()))?;
    Ok(rows)
}
