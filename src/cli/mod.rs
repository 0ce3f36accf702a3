//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod backup;
pub mod client;
pub mod config;
pub mod payment;
pub mod report;
pub mod service;
pub mod transfer;

pub use backup::{handle_backup_command, BackupCommands};
pub use client::{handle_client_command, ClientCommands};
pub use config::{handle_config_command, ConfigCommands};
pub use payment::{handle_payment_command, PaymentCommands};
pub use report::{handle_report_command, ReportCommands};
pub use service::{handle_service_command, ServiceCommands};
pub use transfer::{
    handle_export_command, handle_history_command, handle_import_command, ExportCommands,
};

use chrono::{Local, NaiveDate};

use crate::error::{SalonError, SalonResult};
use crate::models::Money;

/// Parse a `YYYY-MM-DD` date, defaulting to today
pub(crate) fn parse_date_or_today(date: Option<&str>) -> SalonResult<NaiveDate> {
    match date {
        Some(s) => parse_date(s),
        None => Ok(Local::now().date_naive()),
    }
}

pub(crate) fn parse_date(s: &str) -> SalonResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        SalonError::Validation(format!("Invalid date: '{}'. Use YYYY-MM-DD.", s))
    })
}

pub(crate) fn parse_amount(s: &str) -> SalonResult<Money> {
    Money::parse(s).map_err(|e| {
        SalonError::Validation(format!(
            "Invalid amount: '{}'. Use a format like '150' or '150.50'. Error: {}",
            s, e
        ))
    })
}

/// Convert a 1-based position from the command line to an index
pub(crate) fn to_index(position: usize) -> SalonResult<usize> {
    position
        .checked_sub(1)
        .ok_or_else(|| SalonError::Validation("Positions start at 1".into()))
}
