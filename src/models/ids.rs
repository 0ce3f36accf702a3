//! Client identifiers
//!
//! Clients are identified by a number derived from their creation time in
//! epoch milliseconds. Services and payments have no identifier of their own;
//! they are addressed by position inside their client.

use chrono::Utc;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Numeric client identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ClientId(i64);

impl ClientId {
    /// Wrap an existing numeric id
    pub const fn from_raw(raw: i64) -> Self {
        Self(raw)
    }

    /// Get the numeric value
    pub const fn as_i64(&self) -> i64 {
        self.0
    }

    /// Generate an id from the current time that is distinct from every id
    /// in `existing`. Two clients created in the same millisecond get
    /// consecutive ids.
    pub fn generate<I>(existing: I) -> Self
    where
        I: IntoIterator<Item = ClientId>,
    {
        let now = Utc::now().timestamp_millis();
        match existing.into_iter().max() {
            Some(max) if max.0 >= now => Self(max.0.saturating_add(1)),
            _ => Self(now),
        }
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reads integers, integral floats such as `1.7e12` and numeric strings.
/// Anything else is an error.
impl<'de> Deserialize<'de> for ClientId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        let invalid = || D::Error::custom(format!("invalid client id: {}", value));

        match &value {
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(raw) => Ok(Self(raw)),
                None => n
                    .as_f64()
                    .filter(|f| f.fract() == 0.0 && f.abs() < 9.0e15)
                    .map(|f| Self(f as i64))
                    .ok_or_else(invalid),
            },
            serde_json::Value::String(s) => s.parse().map_err(|_| invalid()),
            _ => Err(invalid()),
        }
    }
}

impl FromStr for ClientId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        Ok(Self(s.parse()?))
    }
}
