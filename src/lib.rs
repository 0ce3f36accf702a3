//! salon-ledger - client accounting for a hair salon
//!
//! Keeps the salon's client list with each client's service history and
//! payments, and answers the questions the front desk asks every day: how
//! much a client owes, who is in arrears, what the salon earned in the last
//! month, and which clients match a search.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `accounting`: Pure settlement, arrears, statistics and query functions
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (clients, services, payments, money)
//! - `storage`: JSON file storage layer
//! - `services`: Business logic layer
//! - `audit`: Audit logging system
//! - `backup`: Backup and restore of the client list
//! - `display`, `reports`: Terminal rendering
//! - `export`: CSV, JSON and YAML export and import
//! - `cli`: Command handlers for the `salon` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use salon_ledger::accounting::{compute_arrears, compute_global_stats};
//! use salon_ledger::config::paths::SalonPaths;
//! use salon_ledger::storage::Storage;
//!
//! let mut storage = Storage::new(SalonPaths::new()?)?;
//! storage.load_all()?;
//! let clients = storage.clients.get_all()?;
//! let arrears = compute_arrears(&clients);
//! let stats = compute_global_stats(&clients);
//! ```

pub mod accounting;
pub mod audit;
pub mod backup;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::SalonError;
