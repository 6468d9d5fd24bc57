use crate::core::currency::CurrencyCode;
use crate::core::entity::EntityName;
use crate::core::settlement::compute_actual_settlement_date;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Direction of a cashflow relative to the report owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CashflowDirection {
    /// Cash received: the counterparty bought from us (`S` marker).
    Incoming,
    /// Cash paid: we bought from the counterparty (`B` marker).
    Outgoing,
}

impl CashflowDirection {
    /// Resolve a buy/sell marker from a trade feed.
    pub fn from_marker(marker: &str) -> Option<Self> {
        match marker {
            "S" => Some(CashflowDirection::Incoming),
            "B" => Some(CashflowDirection::Outgoing),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CashflowDirection::Incoming => "Incoming",
            CashflowDirection::Outgoing => "Outgoing",
        }
    }
}

impl fmt::Display for CashflowDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Incoming and outgoing USD totals.
///
/// Additions are checked: a total that would leave the decimal range is
/// reported as [`TransactionError::ValueOverflow`] and the totals are left
/// untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashflowTotals {
    pub incoming: Decimal,
    pub outgoing: Decimal,
}

impl CashflowTotals {
    pub fn total(&self, direction: CashflowDirection) -> Decimal {
        match direction {
            CashflowDirection::Incoming => self.incoming,
            CashflowDirection::Outgoing => self.outgoing,
        }
    }

    /// The totals after adding `amount` in `direction`.
    pub fn checked_add(
        &self,
        direction: CashflowDirection,
        amount: Decimal,
    ) -> Result<Self, TransactionError> {
        let total = self
            .total(direction)
            .checked_add(amount)
            .ok_or(TransactionError::ValueOverflow)?;
        let mut next = *self;
        match direction {
            CashflowDirection::Incoming => next.incoming = total,
            CashflowDirection::Outgoing => next.outgoing = total,
        }
        Ok(next)
    }
}

/// Errors raised when a transaction cannot be constructed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransactionError {
    #[error("transaction entity name must not be empty")]
    EmptyEntityName,
    #[error("transaction currency code must not be empty")]
    EmptyCurrency,
    #[error("USD value overflows the decimal range")]
    ValueOverflow,
}

/// One trade, reduced to what the reports need.
///
/// The USD value and actual settlement date are derived once at
/// construction. Transactions are immutable afterwards; ledgers only
/// read them.
///
/// # Examples
///
/// ```
/// use cashflow_report::core::currency::CurrencyCode;
/// use cashflow_report::core::transaction::{CashflowDirection, Transaction};
/// use chrono::NaiveDate;
/// use rust_decimal_macros::dec;
///
/// let tx = Transaction::new(
///     "foo",
///     CashflowDirection::Outgoing,
///     dec!(0.50),
///     CurrencyCode::new("SGP"),
///     NaiveDate::from_ymd_opt(2016, 1, 2).unwrap(),
///     200,
///     dec!(100.25),
/// )
/// .unwrap();
///
/// assert_eq!(tx.usd_value(), dec!(10025));
/// assert_eq!(tx.actual_settlement_date(), NaiveDate::from_ymd_opt(2016, 1, 4).unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    /// The counterparty of the trade.
    entity_name: EntityName,
    direction: CashflowDirection,
    /// price per unit × units × agreed FX.
    usd_value: Decimal,
    /// Currency the trade settles in. Only its weekend convention matters.
    currency: CurrencyCode,
    desired_settlement_date: NaiveDate,
    /// Desired date rolled past the currency's weekend.
    actual_settlement_date: NaiveDate,
    /// Informational only, never used by the reports.
    trade_date: Option<NaiveDate>,
}

impl Transaction {
    /// Create a new transaction, converting its value to USD.
    pub fn new(
        entity_name: impl Into<EntityName>,
        direction: CashflowDirection,
        agreed_fx: Decimal,
        currency: CurrencyCode,
        desired_settlement_date: NaiveDate,
        units: u32,
        price_per_unit: Decimal,
    ) -> Result<Self, TransactionError> {
        let usd_value = price_per_unit
            .checked_mul(Decimal::from(units))
            .and_then(|value| value.checked_mul(agreed_fx))
            .ok_or(TransactionError::ValueOverflow)?;
        Self::with_usd_value(
            entity_name,
            direction,
            usd_value,
            currency,
            desired_settlement_date,
        )
    }

    /// Create a transaction whose USD value has already been computed.
    pub fn with_usd_value(
        entity_name: impl Into<EntityName>,
        direction: CashflowDirection,
        usd_value: Decimal,
        currency: CurrencyCode,
        desired_settlement_date: NaiveDate,
    ) -> Result<Self, TransactionError> {
        let entity_name = entity_name.into();
        if entity_name.is_empty() {
            return Err(TransactionError::EmptyEntityName);
        }
        if currency.is_empty() {
            return Err(TransactionError::EmptyCurrency);
        }
        let actual_settlement_date =
            compute_actual_settlement_date(desired_settlement_date, &currency);
        Ok(Self {
            entity_name,
            direction,
            usd_value,
            currency,
            desired_settlement_date,
            actual_settlement_date,
            trade_date: None,
        })
    }

    /// Attach the trade date.
    pub fn with_trade_date(mut self, date: NaiveDate) -> Self {
        self.trade_date = Some(date);
        self
    }

    // --- Accessors ---

    pub fn entity_name(&self) -> &EntityName {
        &self.entity_name
    }

    pub fn direction(&self) -> CashflowDirection {
        self.direction
    }

    pub fn usd_value(&self) -> Decimal {
        self.usd_value
    }

    pub fn currency(&self) -> &CurrencyCode {
        &self.currency
    }

    pub fn desired_settlement_date(&self) -> NaiveDate {
        self.desired_settlement_date
    }

    pub fn actual_settlement_date(&self) -> NaiveDate {
        self.actual_settlement_date
    }

    pub fn trade_date(&self) -> Option<NaiveDate> {
        self.trade_date
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_transaction() -> Transaction {
        Transaction::new(
            "foo",
            CashflowDirection::Outgoing,
            dec!(0.50),
            CurrencyCode::new("SGP"),
            date(2016, 1, 2),
            200,
            dec!(100.25),
        )
        .unwrap()
    }

    #[test]
    fn test_transaction_creation() {
        let tx = sample_transaction();
        assert_eq!(tx.entity_name().as_str(), "foo");
        assert_eq!(tx.direction(), CashflowDirection::Outgoing);
        assert_eq!(tx.usd_value(), dec!(10025.00));
        assert_eq!(tx.currency().as_str(), "SGP");
        assert_eq!(tx.desired_settlement_date(), date(2016, 1, 2));
        assert_eq!(tx.actual_settlement_date(), date(2016, 1, 4));
        assert_eq!(tx.trade_date(), None);
    }

    #[test]
    fn test_usd_value_is_exact() {
        let tx = Transaction::new(
            "bar",
            CashflowDirection::Incoming,
            dec!(0.22),
            CurrencyCode::new("AED"),
            date(2016, 1, 7),
            450,
            dec!(150.5),
        )
        .unwrap();
        assert_eq!(tx.usd_value(), dec!(14899.5));
        // Thursday is a working day for AED.
        assert_eq!(tx.actual_settlement_date(), date(2016, 1, 7));
    }

    #[test]
    fn test_empty_entity_rejected() {
        let result = Transaction::new(
            "",
            CashflowDirection::Incoming,
            dec!(1),
            CurrencyCode::new("USD"),
            date(2016, 1, 4),
            1,
            dec!(1),
        );
        assert_eq!(result, Err(TransactionError::EmptyEntityName));
    }

    #[test]
    fn test_empty_currency_rejected() {
        let result = Transaction::with_usd_value(
            "foo",
            CashflowDirection::Incoming,
            dec!(1),
            CurrencyCode::new(""),
            date(2016, 1, 4),
        );
        assert_eq!(result, Err(TransactionError::EmptyCurrency));
    }

    #[test]
    fn test_value_overflow_rejected() {
        let result = Transaction::new(
            "foo",
            CashflowDirection::Incoming,
            Decimal::MAX,
            CurrencyCode::new("USD"),
            date(2016, 1, 4),
            10,
            dec!(2),
        );
        assert_eq!(result, Err(TransactionError::ValueOverflow));
    }

    #[test]
    fn test_trade_date_is_informational() {
        let tx = sample_transaction().with_trade_date(date(2016, 1, 1));
        assert_eq!(tx.trade_date(), Some(date(2016, 1, 1)));
        assert_eq!(tx.actual_settlement_date(), date(2016, 1, 4));
    }

    #[test]
    fn test_direction_markers() {
        assert_eq!(CashflowDirection::from_marker("S"), Some(CashflowDirection::Incoming));
        assert_eq!(CashflowDirection::from_marker("B"), Some(CashflowDirection::Outgoing));
        assert_eq!(CashflowDirection::from_marker("YY"), None);
        assert_eq!(CashflowDirection::from_marker("s"), None);
        assert_eq!(CashflowDirection::Incoming.to_string(), "Incoming");
    }

    #[test]
    fn test_totals_checked_add() {
        let totals = CashflowTotals::default()
            .checked_add(CashflowDirection::Incoming, dec!(10))
            .unwrap()
            .checked_add(CashflowDirection::Outgoing, dec!(2.5))
            .unwrap();
        assert_eq!(totals.total(CashflowDirection::Incoming), dec!(10));
        assert_eq!(totals.total(CashflowDirection::Outgoing), dec!(2.5));
    }

    #[test]
    fn test_totals_overflow_is_an_error() {
        let totals = CashflowTotals {
            incoming: Decimal::MAX,
            outgoing: Decimal::ZERO,
        };
        assert_eq!(
            totals.checked_add(CashflowDirection::Incoming, dec!(1)),
            Err(TransactionError::ValueOverflow)
        );
        // the other direction is independent
        assert!(totals.checked_add(CashflowDirection::Outgoing, Decimal::MAX).is_ok());
    }
}
