//! Service model
//!
//! One performed salon service, stored inside its client. Services have no
//! identity of their own: they are addressed by position in the client's
//! service sequence, and removing one shifts every later position down.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::lenient;
use super::money::Money;

/// A performed service (haircut, colouring, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    /// Free-text category, e.g. "Haircut"
    #[serde(rename = "type", default, deserialize_with = "lenient::string_or_empty")]
    pub service_type: String,

    /// Day the service was performed; `None` when the stored date is unreadable
    #[serde(default, with = "lenient::date")]
    pub date: Option<NaiveDate>,

    /// Price charged
    #[serde(default)]
    pub price: Money,

    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub notes: String,
}

impl Service {
    /// Create a new service entry
    pub fn new(service_type: impl Into<String>, date: NaiveDate, price: Money) -> Self {
        Self {
            service_type: service_type.into(),
            date: Some(date),
            price,
            notes: String::new(),
        }
    }

    /// Attach notes
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Validate a service before it is stored
    pub fn validate(&self) -> Result<(), ServiceValidationError> {
        if self.service_type.trim().is_empty() {
            return Err(ServiceValidationError::EmptyType);
        }

        if self.price.is_negative() {
            return Err(ServiceValidationError::NegativePrice(self.price));
        }

        Ok(())
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.date {
            Some(date) => write!(f, "{} ({})", self.service_type, date),
            None => write!(f, "{}", self.service_type),
        }
    }
}

/// Validation errors for services
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceValidationError {
    EmptyType,
    NegativePrice(Money),
}

impl fmt::Display for ServiceValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyType => write!(f, "Service type cannot be empty"),
            Self::NegativePrice(price) => write!(f, "Service price cannot be negative: {}", price),
        }
    }
}

impl std::error::Error for ServiceValidationError {}
