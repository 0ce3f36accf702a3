//! Payment model
//!
//! One payment received from a client, addressed by position like services.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::lenient;
use super::money::Money;

/// A payment event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    /// Amount received
    #[serde(default)]
    pub amount: Money,

    /// Day of payment; `None` when the stored date is unreadable
    #[serde(default, with = "lenient::date")]
    pub date: Option<NaiveDate>,

    /// Free-text payment method, e.g. "cash" or "card"
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub method: String,
}

impl Payment {
    /// Create a new payment
    pub fn new(amount: Money, date: NaiveDate, method: impl Into<String>) -> Self {
        Self {
            amount,
            date: Some(date),
            method: method.into(),
        }
    }

    /// Validate a payment before it is stored
    pub fn validate(&self) -> Result<(), PaymentValidationError> {
        if self.amount.is_negative() {
            return Err(PaymentValidationError::NegativeAmount(self.amount));
        }
        Ok(())
    }
}

impl fmt::Display for Payment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.amount)?;
        if let Some(date) = self.date {
            write!(f, " on {}", date)?;
        }
        if !self.method.is_empty() {
            write!(f, " ({})", self.method)?;
        }
        Ok(())
    }
}

/// Validation errors for payments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentValidationError {
    NegativeAmount(Money),
}

impl fmt::Display for PaymentValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeAmount(amount) => {
                write!(f, "Payment amount cannot be negative: {}", amount)
            }
        }
    }
}

impl std::error::Error for PaymentValidationError {}
