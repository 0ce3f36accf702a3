//! Reports for salon-ledger
//!
//! The salon overview, the arrears list and the per-client statement. All
//! figures come from the accounting engine; this module only lays them out.

pub mod arrears;
pub mod overview;
pub mod statement;

pub use arrears::ArrearsReport;
pub use overview::OverviewReport;
pub use statement::ClientStatement;
