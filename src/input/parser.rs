//! Turning raw feed lines into transactions.
//!
//! A feed line has eight comma-separated fields:
//!
//! ```text
//! entity,marker,agreed_fx,currency,trade_date,settlement_date,units,price_per_unit
//! foo,B,0.50,SGP,01 Jan 2016,02 Jan 2016,200,100.25
//! ```
//!
//! Dates use the `dd Mon yyyy` layout. A line that does not fit is reported
//! as [`ParseOutcome::NotParsable`] so the caller can drop it and move on.

use crate::core::currency::CurrencyCode;
use crate::core::transaction::{CashflowDirection, Transaction, TransactionError};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;

/// Layout of every date in the feed and in the reports, e.g. `04 Jan 2016`.
pub const DATE_FORMAT: &str = "%d %b %Y";

/// Number of fields in a feed line.
pub const FIELD_COUNT: usize = 8;

/// Why a line was not turned into a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expected 8 fields, found {0}")]
    FieldCount(usize),
    #[error("unknown buy/sell marker '{0}'")]
    Direction(String),
    #[error("invalid {field}: '{value}'")]
    Number { field: &'static str, value: String },
    #[error("invalid {field}: '{value}' (expected dd Mon yyyy)")]
    Date { field: &'static str, value: String },
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: Decimal },
    #[error(transparent)]
    Record(#[from] TransactionError),
}

/// Result of parsing one feed line.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    Record(Transaction),
    NotParsable(ParseError),
}

impl ParseOutcome {
    pub fn is_record(&self) -> bool {
        matches!(self, ParseOutcome::Record(_))
    }

    /// The transaction, discarding the failure reason.
    pub fn record(self) -> Option<Transaction> {
        match self {
            ParseOutcome::Record(tx) => Some(tx),
            ParseOutcome::NotParsable(_) => None,
        }
    }
}

impl From<Result<Transaction, ParseError>> for ParseOutcome {
    fn from(result: Result<Transaction, ParseError>) -> Self {
        match result {
            Ok(tx) => ParseOutcome::Record(tx),
            Err(e) => ParseOutcome::NotParsable(e),
        }
    }
}

/// Something that can turn a raw line into a transaction.
pub trait RecordParser {
    fn parse_line(&self, line: &str) -> ParseOutcome;
}

/// Parser for the comma-separated eight-field trade feed.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvRecordParser;

impl CsvRecordParser {
    pub fn new() -> Self {
        Self
    }

    fn parse_fields(line: &str) -> Result<Transaction, ParseError> {
        let mut fields: Vec<&str> = line.split(',').collect();
        // A trailing delimiter does not add a field.
        while fields.len() > FIELD_COUNT && fields.last().is_some_and(|f| f.is_empty()) {
            fields.pop();
        }
        if fields.len() != FIELD_COUNT {
            return Err(ParseError::FieldCount(fields.len()));
        }

        let direction = CashflowDirection::from_marker(fields[1])
            .ok_or_else(|| ParseError::Direction(fields[1].to_string()))?;
        let agreed_fx = parse_amount("agreed FX", fields[2])?;
        let currency = CurrencyCode::new(fields[3]);
        let trade_date = parse_date("trade date", fields[4]).ok();
        let desired_settlement_date = parse_date("settlement date", fields[5])?;
        let units: u32 = fields[6].trim().parse().map_err(|_| ParseError::Number {
            field: "units",
            value: fields[6].to_string(),
        })?;
        let price_per_unit = parse_amount("price per unit", fields[7])?;

        let tx = Transaction::new(
            fields[0],
            direction,
            agreed_fx,
            currency,
            desired_settlement_date,
            units,
            price_per_unit,
        )?;
        Ok(match trade_date {
            Some(date) => tx.with_trade_date(date),
            None => tx,
        })
    }
}

impl RecordParser for CsvRecordParser {
    fn parse_line(&self, line: &str) -> ParseOutcome {
        Self::parse_fields(line).into()
    }
}

fn parse_amount(field: &'static str, raw: &str) -> Result<Decimal, ParseError> {
    let value = Decimal::from_str(raw.trim()).map_err(|_| ParseError::Number {
        field,
        value: raw.to_string(),
    })?;
    if value < Decimal::ZERO {
        return Err(ParseError::Negative { field, value });
    }
    Ok(value)
}

/// Parse a `dd Mon yyyy` date.
pub fn parse_date(field: &'static str, raw: &str) -> Result<NaiveDate, ParseError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|_| ParseError::Date {
        field,
        value: raw.to_string(),
    })
}
