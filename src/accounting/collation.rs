//! Locale-aware ordering of client names
//!
//! Names are compared on three levels: base letters first, then accents,
//! then case (lowercase before uppercase). Two names that tie on every
//! level fall back to plain code point order so the result is total.
//!
//! For Polish the letters `ą ć ę ł ń ó ś ź ż` are letters of their own that
//! sort right after their base letter, so "Zenon" < "Źdźbło" < "Żaneta".
//! The root locale treats them like any other accented letter.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Ordering locale for name sorts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Locale {
    /// Polish alphabet order
    #[default]
    #[serde(rename = "pl")]
    Polish,
    /// Language-neutral order
    #[serde(rename = "root")]
    Root,
}

impl Locale {
    /// Short locale code as stored in the settings file
    pub fn code(&self) -> &'static str {
        match self {
            Self::Polish => "pl",
            Self::Root => "root",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pl" | "pl-pl" | "polish" => Ok(Self::Polish),
            "root" | "und" => Ok(Self::Root),
            other => Err(format!("Unknown locale: {}", other)),
        }
    }
}

/// Polish letters with their base letter and rank after it
const POLISH_LETTERS: [(char, char, u8); 9] = [
    ('ą', 'a', 1),
    ('ć', 'c', 1),
    ('ę', 'e', 1),
    ('ł', 'l', 1),
    ('ń', 'n', 1),
    ('ó', 'o', 1),
    ('ś', 's', 1),
    ('ź', 'z', 1),
    ('ż', 'z', 2),
];

/// Precomputed comparison key for one string
///
/// Field order is the comparison order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SortKey {
    primary: Vec<(char, u8)>,
    secondary: Vec<u32>,
    tertiary: Vec<u8>,
    raw: String,
}

/// Compares strings for a fixed locale
#[derive(Debug, Clone, Copy, Default)]
pub struct Collator {
    locale: Locale,
}

impl Collator {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Compare two strings
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        self.sort_key(a).cmp(&self.sort_key(b))
    }

    /// Build the key used by [`Collator::compare`]
    ///
    /// Sorting many strings is cheaper with keys computed once per string.
    pub fn sort_key(&self, s: &str) -> SortKey {
        // Composed and decomposed spellings of a name get the same key
        let composed: String = s.nfc().collect();
        let mut key = SortKey {
            primary: Vec::with_capacity(composed.len()),
            secondary: Vec::with_capacity(composed.len()),
            tertiary: Vec::with_capacity(composed.len()),
            raw: String::new(),
        };

        for ch in composed.chars() {
            // A mark with no precomposed form accents the letter before it
            if is_combining_mark(ch) {
                if let Some(accent) = key.secondary.last_mut() {
                    if *accent == 0 {
                        *accent = ch as u32;
                    }
                    continue;
                }
            }

            let lower = ch.to_lowercase().next().unwrap_or(ch);
            key.tertiary.push(u8::from(ch.is_uppercase()));

            if self.locale == Locale::Polish {
                if let Some(&(_, base, rank)) =
                    POLISH_LETTERS.iter().find(|(letter, _, _)| *letter == lower)
                {
                    key.primary.push((base, rank));
                    key.secondary.push(0);
                    continue;
                }
            }

            // ł has no canonical decomposition
            if lower == 'ł' {
                key.primary.push(('l', 0));
                key.secondary.push('ł' as u32);
                continue;
            }

            let mut base = None;
            let mut accent = 0u32;
            for c in std::iter::once(lower).nfd() {
                if is_combining_mark(c) {
                    if accent == 0 {
                        accent = c as u32;
                    }
                } else if base.is_none() {
                    base = Some(c);
                }
            }

            key.primary.push((base.unwrap_or(lower), 0));
            key.secondary.push(accent);
        }

        key.raw = composed;
        key
    }
}
