//! # cashflow-report
//!
//! Settlement-date aware cashflow reporting over a trade feed.
//!
//! Each trade is converted to USD with the FX rate it carries, its desired
//! settlement date is rolled past the weekend of its currency's market, and
//! the result is aggregated two ways: per settlement day and per
//! counterparty.
//!
//! ## Architecture
//!
//! - **core** — Currencies and weekend conventions, entities, transactions,
//!   the settlement date rule
//! - **input** — Feed line parsing, sample and random feeds
//! - **ledger** — Per-entity and per-day aggregation
//! - **report** — Report engine, configuration and output sinks

pub mod core;
pub mod input;
pub mod ledger;
pub mod report;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::core::currency::{CurrencyCode, WeekendConvention};
    pub use crate::core::entity::{Entity, EntityName};
    pub use crate::core::settlement::compute_actual_settlement_date;
    pub use crate::core::transaction::{CashflowDirection, CashflowTotals, Transaction};
    pub use crate::input::parser::{CsvRecordParser, ParseOutcome, RecordParser};
    pub use crate::ledger::daily_ledger::{DailyLedger, DailySummary};
    pub use crate::ledger::entity_ledger::EntityLedger;
    pub use crate::report::config::ReportConfig;
    pub use crate::report::engine::{ReportEngine, ReportError};
    pub use crate::report::output::{ConsoleOutput, MemoryOutput, OutputSink};
}
