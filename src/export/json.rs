//! JSON export and import
//!
//! The export is the client list as one JSON array, the same shape as the
//! data file, so an export can be imported back as-is.

use std::io::Write;

use crate::error::{SalonError, SalonResult};
use crate::models::Client;

/// Write the client list as a pretty-printed JSON array
pub fn export_clients_json<W: Write>(clients: &[Client], writer: W) -> SalonResult<()> {
    serde_json::to_writer_pretty(writer, clients)
        .map_err(|e| SalonError::Export(e.to_string()))
}

/// Parse an exported client list; the document must be a JSON array
pub fn import_clients_json(json: &str) -> SalonResult<Vec<Client>> {
    let value: serde_json::Value =
        serde_json::from_str(json).map_err(|e| SalonError::Import(e.to_string()))?;

    if !value.is_array() {
        return Err(SalonError::Import(
            "Expected a JSON array of clients".into(),
        ));
    }

    serde_json::from_value(value).map_err(|e| SalonError::Import(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounting::test_support::{client, payment, service};

    #[test]
    fn test_export_is_an_array() {
        let clients = vec![client(
            1,
            "Anna",
            &[service("Cut", "2024-01-02", 100)],
            &[payment(40, "2024-01-02")],
        )];

        let mut buf = Vec::new();
        export_clients_json(&clients, &mut buf).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value[0]["services"][0]["price"], 100);
        assert_eq!(value[0]["payments"][0]["amount"], 40);

        let back = import_clients_json(std::str::from_utf8(&buf).unwrap()).unwrap();
        assert_eq!(back, clients);
    }

    #[test]
    fn test_import_requires_array() {
        let err = import_clients_json(r#"{"clients": []}"#).unwrap_err();
        assert!(err.to_string().contains("JSON array"));

        assert!(matches!(
            import_clients_json("not json"),
            Err(SalonError::Import(_))
        ));
    }

    #[test]
    fn test_import_is_lenient_per_field() {
        let clients = import_clients_json(
            r#"[{"id": 3, "name": "Ewa", "services": [{"type": "Cut", "date": "bad", "price": "12.5"}]}]"#,
        )
        .unwrap();

        assert_eq!(clients[0].services[0].price.cents(), 1250);
        assert_eq!(clients[0].services[0].date, None);
        assert!(clients[0].payments.is_empty());
    }
}
