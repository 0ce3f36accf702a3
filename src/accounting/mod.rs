//! Accounting and query engine
//!
//! Pure functions over a borrowed client list: per-client settlement,
//! arrears, salon-wide statistics and the search, filter and sort used by
//! the client list. Nothing here fails or mutates its input; unreadable
//! amounts count as zero and unknown dates are left out of date
//! comparisons.

pub mod arrears;
pub mod collation;
pub mod financials;
pub mod query;
pub mod stats;

pub use arrears::{compute_arrears, ArrearEntry};
pub use collation::{Collator, Locale};
pub use financials::{compute_client_financials, ClientFinancials};
pub use query::{
    filter_by_service_type, last_service_date, search_clients, sort_clients, ClientQuery,
    ClientView, SortMode,
};
pub use stats::{
    compute_global_stats, compute_global_stats_at, most_popular_service, ServicePopularity,
    Stats, REVENUE_WINDOW_DAYS,
};
