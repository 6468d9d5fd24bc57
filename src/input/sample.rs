//! Sample and randomly generated trade feeds.
//!
//! The random generator is used by the CLI `generate` command and by the
//! ingestion benchmark.

use crate::input::parser::DATE_FORMAT;
use chrono::{Days, NaiveDate};
use rand::Rng;

/// The feed reported on when no input file is given.
pub const SAMPLE_FEED: &str = "foo,B,0.50,SGP,01 Jan 2016,02 Jan 2016,200,100.25\n\
bar,S,0.22,AED,05 Jan 2016,07 Jan 2016,450,150.5\n\
covfefe,S,0.26,AED,05 Mar 2016,07 Mar 2016,450,150.5\n\
test2,B,0.7,AED,05 Oct 2016,07 Oct 2016,100,120.5\n\
test,S,0.1,SGP,01 Jan 2016,02 Jan 2016,10,10\n\
test2,B,0.25,SGP,01 Jan 2016,02 Jan 2016,100,10";

/// Configuration for generating a random trade feed.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Number of lines to generate.
    pub rows: usize,
    /// Number of distinct counterparties.
    pub entity_count: usize,
    /// Currencies to draw from.
    pub currencies: Vec<String>,
    /// First possible trade date.
    pub start_date: NaiveDate,
    /// Trade dates are spread over this many days from `start_date`.
    pub span_days: u64,
    /// Largest number of units per trade.
    pub max_units: u32,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            rows: 100,
            entity_count: 10,
            currencies: ["USD", "SGP", "AED", "SAR", "EUR"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
            start_date: NaiveDate::from_ymd_opt(2016, 1, 1).unwrap_or_default(),
            span_days: 365,
            max_units: 1_000,
        }
    }
}

/// Generate a random feed, one trade per line.
///
/// Every generated line is well formed. Settlement dates fall zero to three
/// days after the trade date, so some land on weekends.
pub fn generate_random_feed(config: &FeedConfig) -> String {
    let mut rng = rand::thread_rng();
    let entity_count = config.entity_count.max(1);

    let mut lines = Vec::with_capacity(config.rows);
    for _ in 0..config.rows {
        let entity = format!("ENTITY-{:03}", rng.gen_range(0..entity_count));
        let marker = if rng.gen_bool(0.5) { "S" } else { "B" };
        let currency = if config.currencies.is_empty() {
            "USD"
        } else {
            config.currencies[rng.gen_range(0..config.currencies.len())].as_str()
        };
        let fx_cents: u32 = rng.gen_range(1..=500);
        let price_cents: u32 = rng.gen_range(1..=100_000);
        let units = rng.gen_range(1..=config.max_units.max(1));

        let trade_offset = rng.gen_range(0..=config.span_days);
        let trade_date = config
            .start_date
            .checked_add_days(Days::new(trade_offset))
            .unwrap_or(config.start_date);
        let settlement_date = trade_date
            .checked_add_days(Days::new(rng.gen_range(0..=3)))
            .unwrap_or(trade_date);

        lines.push(format!(
            "{},{},{}.{:02},{},{},{},{},{}.{:02}",
            entity,
            marker,
            fx_cents / 100,
            fx_cents % 100,
            currency,
            trade_date.format(DATE_FORMAT),
            settlement_date.format(DATE_FORMAT),
            units,
            price_cents / 100,
            price_cents % 100,
        ));
    }
    lines.join("\n")
}
