use crate::core::transaction::{CashflowDirection, CashflowTotals, Transaction, TransactionError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of a counterparty as it appears in the trade feed.
///
/// Names are compared exactly: `"foo"` and `"Foo"` are two entities.
///
/// # Examples
///
/// ```
/// use cashflow_report::core::entity::EntityName;
///
/// let foo = EntityName::new("foo");
/// let bar = EntityName::new("bar");
/// assert_ne!(foo, bar);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityName(String);

impl EntityName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the string representation of this name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the name is empty or whitespace only.
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for EntityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for EntityName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for EntityName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A counterparty and every transaction booked against it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entity {
    name: EntityName,
    transactions: Vec<Transaction>,
    totals: CashflowTotals,
}

impl Entity {
    pub fn new(name: EntityName) -> Self {
        Self {
            name,
            transactions: Vec::new(),
            totals: CashflowTotals::default(),
        }
    }

    pub fn name(&self) -> &EntityName {
        &self.name
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Link a transaction to this entity.
    ///
    /// The transaction is expected to name this entity; the ledger
    /// guarantees it. Fails without linking it when the entity's total in
    /// that direction would overflow.
    pub fn add_transaction(&mut self, transaction: Transaction) -> Result<(), TransactionError> {
        debug_assert_eq!(transaction.entity_name(), &self.name);
        self.totals = self
            .totals
            .checked_add(transaction.direction(), transaction.usd_value())?;
        self.transactions.push(transaction);
        Ok(())
    }

    pub fn totals(&self) -> &CashflowTotals {
        &self.totals
    }

    /// Sum of USD values of the transactions flowing in `direction`.
    /// Zero when there are none.
    pub fn total_directed_cashflow(&self, direction: CashflowDirection) -> Decimal {
        self.totals.total(direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::currency::CurrencyCode;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn transaction(name: &str, direction: CashflowDirection, usd: Decimal) -> Transaction {
        Transaction::with_usd_value(
            name,
            direction,
            usd,
            CurrencyCode::new("USD"),
            NaiveDate::from_ymd_opt(2016, 1, 4).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_name_equality() {
        let a = EntityName::new("foo");
        let b = EntityName::new("foo");
        let c = EntityName::new("Foo");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_name_display() {
        let name = EntityName::new("covfefe");
        assert_eq!(format!("{}", name), "covfefe");
    }

    #[test]
    fn test_total_without_transactions_is_zero() {
        let entity = Entity::new(EntityName::new("foo"));
        assert_eq!(entity.total_directed_cashflow(CashflowDirection::Incoming), Decimal::ZERO);
        assert_eq!(entity.total_directed_cashflow(CashflowDirection::Outgoing), Decimal::ZERO);
    }

    #[test]
    fn test_totals_split_by_direction() {
        let mut entity = Entity::new(EntityName::new("foo"));
        entity.add_transaction(transaction("foo", CashflowDirection::Incoming, dec!(12.5))).unwrap();
        entity.add_transaction(transaction("foo", CashflowDirection::Incoming, dec!(7.5))).unwrap();
        entity.add_transaction(transaction("foo", CashflowDirection::Outgoing, dec!(100))).unwrap();

        assert_eq!(entity.total_directed_cashflow(CashflowDirection::Incoming), dec!(20));
        assert_eq!(entity.total_directed_cashflow(CashflowDirection::Outgoing), dec!(100));
        assert_eq!(entity.transactions().len(), 3);
    }

    #[test]
    fn test_only_outgoing_reports_zero_incoming() {
        let mut entity = Entity::new(EntityName::new("test2"));
        entity.add_transaction(transaction("test2", CashflowDirection::Outgoing, dec!(250))).unwrap();
        assert_eq!(entity.total_directed_cashflow(CashflowDirection::Incoming), Decimal::ZERO);
    }

    #[test]
    fn test_overflowing_transaction_is_not_linked() {
        let mut entity = Entity::new(EntityName::new("a"));
        let huge = Decimal::MAX - dec!(1);
        entity.add_transaction(transaction("a", CashflowDirection::Incoming, huge)).unwrap();

        let result = entity.add_transaction(transaction("a", CashflowDirection::Incoming, huge));
        assert_eq!(result, Err(TransactionError::ValueOverflow));
        assert_eq!(entity.transactions().len(), 1);
        assert_eq!(entity.total_directed_cashflow(CashflowDirection::Incoming), huge);
    }
}
