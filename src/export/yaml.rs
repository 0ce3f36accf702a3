//! YAML export and import
//!
//! Same content as the JSON export, for reading by people.

use std::io::Write;

use chrono::Utc;

use crate::error::{SalonError, SalonResult};
use crate::models::Client;

/// Write the client list as YAML with a comment header
pub fn export_clients_yaml<W: Write>(clients: &[Client], mut writer: W) -> SalonResult<()> {
    let err = |e: std::io::Error| SalonError::Export(e.to_string());

    writeln!(writer, "# salon-ledger client export").map_err(err)?;
    writeln!(writer, "# Generated: {}", Utc::now().to_rfc3339()).map_err(err)?;
    writeln!(writer, "# Clients: {}", clients.len()).map_err(err)?;
    writeln!(writer).map_err(err)?;

    serde_yaml::to_writer(writer, clients).map_err(|e| SalonError::Export(e.to_string()))
}

/// Parse a YAML client list
pub fn import_clients_yaml(yaml: &str) -> SalonResult<Vec<Client>> {
    serde_yaml::from_str(yaml).map_err(|e| SalonError::Import(e.to_string()))
}
