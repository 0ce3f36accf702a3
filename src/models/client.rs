//! Client model
//!
//! A salon customer with contact data and the services and payments it owns.
//! The serialized form is the record shape of the client document, one JSON
//! object per client with camelCase keys.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::ClientId;
use super::lenient;
use super::payment::Payment;
use super::service::Service;

/// A salon client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    /// Unique identifier
    pub id: ClientId,

    /// Full name
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub name: String,

    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub phone: String,

    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub email: String,

    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub notes: String,

    /// Services in insertion order
    #[serde(default, deserialize_with = "null_as_empty_vec")]
    pub services: Vec<Service>,

    /// Payments in insertion order
    #[serde(default, deserialize_with = "null_as_empty_vec")]
    pub payments: Vec<Payment>,

    /// When the client was added
    #[serde(default, with = "lenient::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

fn null_as_empty_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Client {
    /// Create a new client with empty history
    pub fn new(id: ClientId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            phone: String::new(),
            email: String::new(),
            notes: String::new(),
            services: Vec::new(),
            payments: Vec::new(),
            created_at: Some(Utc::now()),
        }
    }

    /// Set the phone number
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    /// Set the email address
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Set the notes
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Validate the client
    pub fn validate(&self) -> Result<(), ClientValidationError> {
        if self.name.trim().is_empty() {
            return Err(ClientValidationError::EmptyName);
        }

        Ok(())
    }

    /// Normalize a name for duplicate detection
    pub fn normalize_name(name: &str) -> String {
        name.trim().to_lowercase()
    }

    /// Check if this client's name matches (case-insensitive, exact)
    pub fn matches_name(&self, name: &str) -> bool {
        Self::normalize_name(&self.name) == Self::normalize_name(name)
    }

    /// Get a service by position
    pub fn service(&self, position: usize) -> Option<&Service> {
        self.services.get(position)
    }

    /// Get a payment by position
    pub fn payment(&self, position: usize) -> Option<&Payment> {
        self.payments.get(position)
    }
}

impl fmt::Display for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Validation errors for clients
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientValidationError {
    EmptyName,
}

impl fmt::Display for ClientValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Client name cannot be empty"),
        }
    }
}

impl std::error::Error for ClientValidationError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::NaiveDate;

    #[test]
    fn test_new_client() {
        let client = Client::new(ClientId::from_raw(1), "Anna Nowak").with_phone("600100200");
        assert_eq!(client.name, "Anna Nowak");
        assert_eq!(client.phone, "600100200");
        assert!(client.services.is_empty());
        assert!(client.payments.is_empty());
        assert!(client.created_at.is_some());
    }

    #[test]
    fn test_name_matching() {
        let client = Client::new(ClientId::from_raw(1), "Anna Nowak");
        assert!(client.matches_name("anna nowak"));
        assert!(client.matches_name("  ANNA NOWAK "));
        assert!(!client.matches_name("Anna"));
    }

    #[test]
    fn test_validation() {
        let mut client = Client::new(ClientId::from_raw(1), "Anna");
        assert!(client.validate().is_ok());

        client.name = "   ".into();
        assert_eq!(client.validate(), Err(ClientValidationError::EmptyName));

        client.name = "Ą".repeat(60);
        assert!(client.validate().is_ok());

        client.name = "a".repeat(500);
        assert!(client.validate().is_ok());
    }

    #[test]
    fn test_document_shape() {
        let mut client = Client::new(ClientId::from_raw(1_700_000_000_000), "Anna");
        client.services.push(Service::new(
            "Cut",
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            Money::from_units(100),
        ));

        let json = serde_json::to_value(&client).unwrap();
        assert_eq!(json["id"], 1_700_000_000_000_i64);
        assert!(json["createdAt"].is_string());
        assert_eq!(json["services"][0]["type"], "Cut");
        assert!(json["payments"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_missing_collections_are_empty() {
        let client: Client =
            serde_json::from_str(r#"{"id": 5, "name": "Ewa", "phone": null, "payments": null}"#)
                .unwrap();

        assert_eq!(client.id, ClientId::from_raw(5));
        assert_eq!(client.phone, "");
        assert!(client.services.is_empty());
        assert!(client.payments.is_empty());
        assert_eq!(client.created_at, None);
    }
}
