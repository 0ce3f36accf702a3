//! Export and import of the client list
//!
//! - CSV: one row per service, for spreadsheets
//! - JSON: the whole client list as one array, importable
//! - YAML: the same list for reading, also importable

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::{export_services_csv, CSV_HEADER};
pub use json::{export_clients_json, import_clients_json};
pub use yaml::{export_clients_yaml, import_clients_yaml};

use std::path::Path;

use crate::error::{SalonError, SalonResult};
use crate::models::Client;

/// Read a client list from a `.json`, `.yaml` or `.yml` file
pub fn read_client_file(path: &Path) -> SalonResult<Vec<Client>> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| SalonError::Import(format!("Failed to read {}: {}", path.display(), e)))?;

    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "yaml" | "yml" => import_clients_yaml(&contents),
        _ => import_clients_json(&contents),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_by_extension() {
        let temp_dir = TempDir::new().unwrap();
        let json = temp_dir.path().join("clients.json");
        let yaml = temp_dir.path().join("clients.YML");
        std::fs::write(&json, r#"[{"id": 1, "name": "Anna"}]"#).unwrap();
        std::fs::write(&yaml, "- id: 2\n  name: Ewa\n").unwrap();

        assert_eq!(read_client_file(&json).unwrap()[0].name, "Anna");
        assert_eq!(read_client_file(&yaml).unwrap()[0].name, "Ewa");
        assert!(read_client_file(&temp_dir.path().join("none.json")).is_err());
    }
}
