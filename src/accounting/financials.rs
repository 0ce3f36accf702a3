//! Per-client settlement figures

use serde::Serialize;

use crate::models::{Client, Money};

/// What a client was charged, what they paid and what they still owe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientFinancials {
    /// Sum of service prices
    pub total_spent: Money,
    /// Sum of payment amounts
    pub total_paid: Money,
    /// Outstanding balance, never negative
    pub due: Money,
}

/// Compute the settlement figures of one client
///
/// Overpayment is not carried as credit: `due` is clamped at zero.
pub fn compute_client_financials(client: &Client) -> ClientFinancials {
    let total_spent: Money = client.services.iter().map(|s| s.price).sum();
    let total_paid: Money = client.payments.iter().map(|p| p.amount).sum();

    ClientFinancials {
        total_spent,
        total_paid,
        due: (total_spent - total_paid).clamp_non_negative(),
    }
}
