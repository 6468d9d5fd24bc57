use crate::core::entity::EntityName;
use crate::core::transaction::{CashflowDirection, Transaction, TransactionError};
use crate::input::parser::{CsvRecordParser, ParseOutcome, RecordParser, DATE_FORMAT};
use crate::ledger::daily_ledger::DailyLedger;
use crate::ledger::entity_ledger::EntityLedger;
use crate::report::config::ReportConfig;
use crate::report::output::{OutputSink, BLANK_LINE};
use chrono::NaiveDate;
use log::{debug, info, warn};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

const BANNER_RULE: &str = "-------------------------------------------------";
const DAILY_BANNER: &str = "------------- Print Daily Summaries -------------";
const INCOMING_BANNER: &str = "------------- Print Incoming Ranking ------------";
const OUTGOING_BANNER: &str = "------------- Print Outgoing Ranking ------------";

/// Errors raised while setting up a report.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("missing required argument: {0}")]
    MissingArgument(&'static str),
    #[error("failed to read trade feed: {0}")]
    Io(#[from] std::io::Error),
}

/// Counts of what happened to each input line during ingestion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestStats {
    /// Lines in the input, blank ones included.
    pub lines: usize,
    /// Blank or whitespace-only lines, skipped silently.
    pub blank: usize,
    /// Lines turned into transactions.
    pub records: usize,
    /// Lines the parser rejected.
    pub dropped: usize,
}

/// One row of the daily cashflow summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailySummaryRow {
    pub date: NaiveDate,
    pub incoming: Decimal,
    pub outgoing: Decimal,
}

/// One row of a counterparty ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankingRow {
    /// 1-based position in the ranking.
    pub rank: usize,
    pub entity: EntityName,
    pub total: Decimal,
}

/// Every report view at once, for machine-readable output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportSnapshot {
    pub daily_summaries: Vec<DailySummaryRow>,
    pub incoming_ranking: Vec<RankingRow>,
    pub outgoing_ranking: Vec<RankingRow>,
    pub ingest: IngestStats,
}

/// Builds the cashflow ledgers from a trade feed and renders the reports.
///
/// The whole feed is ingested when the engine is constructed. Lines that
/// cannot be parsed are dropped without failing the run; they only show
/// up in [`IngestStats`] and in the debug log. After construction the
/// ledgers never change, so the report methods can be called any number
/// of times with the same result.
///
/// # Examples
///
/// ```
/// use cashflow_report::core::transaction::CashflowDirection;
/// use cashflow_report::report::engine::ReportEngine;
/// use cashflow_report::report::output::MemoryOutput;
///
/// let feed = "foo,B,0.50,SGP,01 Jan 2016,02 Jan 2016,200,100.25\n\
///             bar,S,0.22,AED,05 Jan 2016,07 Jan 2016,450,150.5";
/// let mut engine = ReportEngine::new(feed, MemoryOutput::new());
/// engine.print_ranking(CashflowDirection::Incoming);
///
/// let lines = engine.sink().lines();
/// assert_eq!(lines.len(), 3);
/// assert!(lines[1].starts_with("bar"));
/// ```
pub struct ReportEngine<S> {
    sink: S,
    config: ReportConfig,
    entities: EntityLedger,
    daily: DailyLedger,
    stats: IngestStats,
}

impl<S: OutputSink> ReportEngine<S> {
    /// Ingest `input` with the default parser and configuration.
    pub fn new(input: &str, sink: S) -> Self {
        Self::with_parts(input, sink, ReportConfig::default(), &CsvRecordParser)
    }

    pub fn builder() -> ReportEngineBuilder<S> {
        ReportEngineBuilder::new()
    }

    fn with_parts(input: &str, sink: S, config: ReportConfig, parser: &dyn RecordParser) -> Self {
        let mut engine = Self {
            sink,
            config,
            entities: EntityLedger::new(),
            daily: DailyLedger::new(),
            stats: IngestStats::default(),
        };
        engine.ingest(input, parser);
        engine
    }

    fn ingest(&mut self, input: &str, parser: &dyn RecordParser) {
        for (idx, line) in input.lines().enumerate() {
            self.stats.lines += 1;
            if line.trim().is_empty() {
                self.stats.blank += 1;
                continue;
            }
            match parser.parse_line(line) {
                ParseOutcome::Record(tx) => match self.book(tx) {
                    Ok(()) => self.stats.records += 1,
                    Err(e) => {
                        debug!("dropping line {}: {}", idx + 1, e);
                        self.stats.dropped += 1;
                    }
                },
                ParseOutcome::NotParsable(reason) => {
                    debug!("dropping line {}: {}", idx + 1, reason);
                    self.stats.dropped += 1;
                }
            }
        }

        if self.stats.dropped > 0 {
            warn!(
                "dropped {} of {} non-blank lines that could not be booked",
                self.stats.dropped,
                self.stats.lines - self.stats.blank
            );
        }
        info!(
            "ingested {} transactions: {} entities, {} settlement days",
            self.stats.records,
            self.entities.len(),
            self.daily.len()
        );
    }

    /// Fold a transaction into both ledgers, or into neither.
    fn book(&mut self, tx: Transaction) -> Result<(), TransactionError> {
        let (date, direction, amount) =
            (tx.actual_settlement_date(), tx.direction(), tx.usd_value());
        self.entities.can_add(&tx)?;
        self.daily.can_add(date, direction, amount)?;
        self.daily.add_to_daily_summary(date, direction, amount)?;
        self.entities.add_transaction(tx)
    }

    // --- Accessors ---

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    pub fn entity_ledger(&self) -> &EntityLedger {
        &self.entities
    }

    pub fn daily_ledger(&self) -> &DailyLedger {
        &self.daily
    }

    pub fn ingest_stats(&self) -> IngestStats {
        self.stats
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    // --- Views ---

    /// Daily totals, most recent settlement date first.
    pub fn daily_summaries(&self) -> Vec<DailySummaryRow> {
        self.daily
            .iter_descending()
            .map(|(date, summary)| DailySummaryRow {
                date,
                incoming: summary.incoming,
                outgoing: summary.outgoing,
            })
            .collect()
    }

    /// Every known entity by descending total in `direction`.
    pub fn ranking(&self, direction: CashflowDirection) -> Vec<RankingRow> {
        self.entities
            .ranked_by(direction)
            .into_iter()
            .enumerate()
            .map(|(idx, entity)| RankingRow {
                rank: idx + 1,
                entity: entity.name().clone(),
                total: entity.total_directed_cashflow(direction),
            })
            .collect()
    }

    pub fn snapshot(&self) -> ReportSnapshot {
        ReportSnapshot {
            daily_summaries: self.daily_summaries(),
            incoming_ranking: self.ranking(CashflowDirection::Incoming),
            outgoing_ranking: self.ranking(CashflowDirection::Outgoing),
            ingest: self.stats,
        }
    }

    // --- Text reports ---

    /// Print the reverse chronological daily summary.
    ///
    /// Only days with cashflow in either direction are printed.
    pub fn print_daily_summaries(&mut self) {
        let header = self.row(&["Date", "Incoming", "Outgoing"]);
        let lines: Vec<String> = self
            .daily_summaries()
            .iter()
            .map(|row| {
                self.row(&[
                    &row.date.format(DATE_FORMAT).to_string(),
                    &format_amount(row.incoming),
                    &format_amount(row.outgoing),
                ])
            })
            .collect();

        self.sink.output_line(&header);
        for line in &lines {
            self.sink.output_line(line);
        }
    }

    /// Print every entity with its total cashflow in `direction`, largest
    /// first.
    pub fn print_ranking(&mut self, direction: CashflowDirection) {
        let header = self.row(&["Entity", direction.label()]);
        let lines: Vec<String> = self
            .ranking(direction)
            .iter()
            .map(|row| self.row(&[row.entity.as_str(), &format_amount(row.total)]))
            .collect();

        self.sink.output_line(&header);
        for line in &lines {
            self.sink.output_line(line);
        }
    }

    /// Print the daily summary and both rankings, each framed by banner
    /// lines and followed by a blank separator.
    pub fn print_all(&mut self) {
        self.sink.output_line(DAILY_BANNER);
        self.print_daily_summaries();
        self.close_block();

        self.sink.output_line(INCOMING_BANNER);
        self.print_ranking(CashflowDirection::Incoming);
        self.close_block();

        self.sink.output_line(OUTGOING_BANNER);
        self.print_ranking(CashflowDirection::Outgoing);
        self.close_block();
    }

    fn close_block(&mut self) {
        self.sink.output_line(BANNER_RULE);
        self.sink.output_line(BLANK_LINE);
    }

    fn row(&self, fields: &[&str]) -> String {
        let width = self.config.column_width;
        fields
            .iter()
            .map(|field| format!("{:<width$}", field, width = width))
            .collect()
    }
}

/// Two fraction digits, halves rounded away from zero.
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

/// Step-by-step construction of a [`ReportEngine`].
///
/// Input and sink are required; `build` reports whichever is missing.
pub struct ReportEngineBuilder<S> {
    input: Option<String>,
    sink: Option<S>,
    config: ReportConfig,
    parser: Box<dyn RecordParser>,
}

impl<S: OutputSink> ReportEngineBuilder<S> {
    pub fn new() -> Self {
        Self {
            input: None,
            sink: None,
            config: ReportConfig::default(),
            parser: Box::new(CsvRecordParser),
        }
    }

    pub fn input(mut self, input: impl Into<String>) -> Self {
        self.input = Some(input.into());
        self
    }

    /// Read the whole feed from a file.
    pub fn input_file(mut self, path: impl AsRef<Path>) -> Result<Self, ReportError> {
        self.input = Some(fs::read_to_string(path)?);
        Ok(self)
    }

    pub fn sink(mut self, sink: S) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn config(mut self, config: ReportConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the default comma-separated parser.
    pub fn parser(mut self, parser: impl RecordParser + 'static) -> Self {
        self.parser = Box::new(parser);
        self
    }

    pub fn build(self) -> Result<ReportEngine<S>, ReportError> {
        let input = self.input.ok_or(ReportError::MissingArgument("input"))?;
        let sink = self.sink.ok_or(ReportError::MissingArgument("sink"))?;
        Ok(ReportEngine::with_parts(
            &input,
            sink,
            self.config,
            self.parser.as_ref(),
        ))
    }
}

impl<S: OutputSink> Default for ReportEngineBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}
