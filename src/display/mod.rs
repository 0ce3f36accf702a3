//! Display formatting for terminal output
//!
//! Renders money and dates the way the salon reads them (`150.00 zł`,
//! `14.03.2024`) and lays out the client list.

pub mod client;

pub use client::{format_client_list, services_newest_first};

use chrono::NaiveDate;
use std::fmt::Write;

use crate::config::Settings;
use crate::models::Money;

/// Placeholder for values that are absent
pub const PLACEHOLDER: &str = "—";

/// Rendering preferences taken from the settings
#[derive(Debug, Clone)]
pub struct DisplayOptions {
    pub currency_symbol: String,
    pub date_format: String,
    pub recent_services_shown: usize,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl DisplayOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            currency_symbol: settings.currency_symbol.clone(),
            date_format: settings.date_format.clone(),
            recent_services_shown: settings.recent_services_shown,
        }
    }

    /// `150.00 zł`
    pub fn money(&self, amount: Money) -> String {
        amount.format_with_symbol(&self.currency_symbol)
    }

    /// A date in the configured format, or `unknown` when the date is unreadable
    pub fn date(&self, date: Option<NaiveDate>) -> String {
        let Some(date) = date else {
            return "unknown".to_string();
        };

        // A bad format string fails while rendering; fall back to ISO dates
        let mut out = String::new();
        if write!(out, "{}", date.format(&self.date_format)).is_err() {
            return date.format("%Y-%m-%d").to_string();
        }
        out
    }
}

/// Width of the widest value in characters, at least `min`
pub(crate) fn column_width<'a, I>(values: I, min: usize) -> usize
where
    I: IntoIterator<Item = &'a str>,
{
    values
        .into_iter()
        .map(|v| v.chars().count())
        .max()
        .unwrap_or(min)
        .max(min)
}
