//! Service layer for salon-ledger
//!
//! Business logic on top of the storage layer: input validation, the
//! duplicate-name check and positional edits of services and payments.
//! Every mutation saves the client document and writes an audit entry.

pub mod client;
pub mod payment;
pub mod service_entry;

pub use client::{ClientService, ClientUpdate, NewClient};
pub use payment::{NewPayment, PaymentService};
pub use service_entry::{NewService, ServiceEntryService};
