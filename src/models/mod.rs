//! Core data models for salon-ledger
//!
//! This module contains the records the ledger keeps: clients, the services
//! performed for them and the payments they made, plus the money and id
//! types shared by every layer.

pub mod client;
pub mod ids;
pub mod lenient;
pub mod money;
pub mod payment;
pub mod service;

pub use client::{Client, ClientValidationError};
pub use ids::ClientId;
pub use money::{Money, MoneyParseError};
pub use payment::{Payment, PaymentValidationError};
pub use service::{Service, ServiceValidationError};
