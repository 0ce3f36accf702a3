//! Audit trail for salon-ledger
//!
//! Every change to a client, service or payment is appended to `audit.log`
//! as one JSON line holding the state before and after plus a short list
//! of changed fields. `salon history` reads it back.

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
