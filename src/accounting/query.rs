//! Search, filter and sort over the client list
//!
//! Every function takes borrowed clients and returns a new sequence of
//! references; the input is never reordered.

use chrono::NaiveDate;
use std::fmt;

use super::collation::Collator;
use super::financials::compute_client_financials;
use crate::models::Client;

/// Keep clients whose name contains `query` (ignoring case) or whose phone
/// contains it verbatim. An empty query keeps everyone.
pub fn search_clients<'a, I>(clients: I, query: &str) -> Vec<&'a Client>
where
    I: IntoIterator<Item = &'a Client>,
{
    if query.is_empty() {
        return clients.into_iter().collect();
    }

    let needle = query.to_lowercase();
    clients
        .into_iter()
        .filter(|c| c.name.to_lowercase().contains(&needle) || c.phone.contains(query))
        .collect()
}

/// Keep clients with at least one service of exactly `service_type`.
/// An empty type keeps everyone.
pub fn filter_by_service_type<'a, I>(clients: I, service_type: &str) -> Vec<&'a Client>
where
    I: IntoIterator<Item = &'a Client>,
{
    if service_type.is_empty() {
        return clients.into_iter().collect();
    }

    clients
        .into_iter()
        .filter(|c| c.services.iter().any(|s| s.service_type == service_type))
        .collect()
}

/// Client list orderings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Name ascending, locale-aware
    #[default]
    Name,
    /// Name descending
    NameDesc,
    /// Most recent service first; clients without dated services last
    LastService,
    /// Highest total spent first
    TotalSpent,
}

impl SortMode {
    /// Look up a mode by key; unknown keys fall back to [`SortMode::Name`]
    pub fn from_key(key: &str) -> Self {
        match key {
            "name" => Self::Name,
            "name-desc" => Self::NameDesc,
            "lastService" => Self::LastService,
            "totalSpent" => Self::TotalSpent,
            other => {
                tracing::warn!(mode = other, "Unknown sort mode, sorting by name");
                Self::Name
            }
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::NameDesc => "name-desc",
            Self::LastService => "lastService",
            Self::TotalSpent => "totalSpent",
        }
    }

    pub fn all() -> &'static [SortMode] {
        &[
            Self::Name,
            Self::NameDesc,
            Self::LastService,
            Self::TotalSpent,
        ]
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Latest known service date of a client
pub fn last_service_date(client: &Client) -> Option<NaiveDate> {
    client.services.iter().filter_map(|s| s.date).max()
}

/// Order clients by `mode`. The sort is stable.
pub fn sort_clients<'a, I>(clients: I, mode: SortMode, collator: &Collator) -> Vec<&'a Client>
where
    I: IntoIterator<Item = &'a Client>,
{
    let clients = clients.into_iter();

    match mode {
        SortMode::Name | SortMode::NameDesc => {
            let mut keyed: Vec<_> = clients.map(|c| (collator.sort_key(&c.name), c)).collect();
            if mode == SortMode::Name {
                keyed.sort_by(|a, b| a.0.cmp(&b.0));
            } else {
                keyed.sort_by(|a, b| b.0.cmp(&a.0));
            }
            keyed.into_iter().map(|(_, c)| c).collect()
        }
        SortMode::LastService => {
            // None orders below every date, so descending puts it last
            let mut keyed: Vec<_> = clients.map(|c| (last_service_date(c), c)).collect();
            keyed.sort_by(|a, b| b.0.cmp(&a.0));
            keyed.into_iter().map(|(_, c)| c).collect()
        }
        SortMode::TotalSpent => {
            let mut keyed: Vec<_> = clients
                .map(|c| (compute_client_financials(c).total_spent, c))
                .collect();
            keyed.sort_by(|a, b| b.0.cmp(&a.0));
            keyed.into_iter().map(|(_, c)| c).collect()
        }
    }
}

/// A combined search, type filter and sort
#[derive(Debug, Clone, Default)]
pub struct ClientQuery {
    pub search: String,
    pub service_type: String,
    pub sort: SortMode,
}

/// The result of a [`ClientQuery`]
#[derive(Debug, Clone)]
pub struct ClientView<'a> {
    pub clients: Vec<&'a Client>,
    /// Number of clients left after searching and filtering
    pub count: usize,
}

impl ClientQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, query: impl Into<String>) -> Self {
        self.search = query.into();
        self
    }

    pub fn service_type(mut self, service_type: impl Into<String>) -> Self {
        self.service_type = service_type.into();
        self
    }

    pub fn sort(mut self, sort: SortMode) -> Self {
        self.sort = sort;
        self
    }

    /// Search first, then filter by type, then sort
    pub fn apply<'a>(&self, clients: &'a [Client], collator: &Collator) -> ClientView<'a> {
        let found = search_clients(clients, &self.search);
        let filtered = filter_by_service_type(found, &self.service_type);
        let count = filtered.len();

        ClientView {
            clients: sort_clients(filtered, self.sort, collator),
            count,
        }
    }
}
