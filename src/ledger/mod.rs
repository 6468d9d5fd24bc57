//! Aggregation views over the parsed transactions.

pub mod daily_ledger;
pub mod entity_ledger;
