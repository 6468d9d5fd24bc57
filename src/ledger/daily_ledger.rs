use crate::core::transaction::{CashflowDirection, CashflowTotals, TransactionError};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Incoming and outgoing USD totals settling on one day.
pub type DailySummary = CashflowTotals;

/// Running cashflow totals per actual settlement date.
///
/// Only dates that received at least one transaction have an entry.
#[derive(Debug, Clone, Default)]
pub struct DailyLedger {
    summaries: BTreeMap<NaiveDate, DailySummary>,
    /// Running totals over every day.
    totals: CashflowTotals,
}

impl DailyLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold `amount` into the summary for `date`, creating it if needed.
    ///
    /// Nothing changes when the day's total or the running total would
    /// overflow.
    pub fn add_to_daily_summary(
        &mut self,
        date: NaiveDate,
        direction: CashflowDirection,
        amount: Decimal,
    ) -> Result<(), TransactionError> {
        let (day, totals) = self.check_addition(date, direction, amount)?;
        self.summaries.insert(date, day);
        self.totals = totals;
        Ok(())
    }

    /// Whether `amount` can be folded into `date` without overflow.
    pub fn can_add(
        &self,
        date: NaiveDate,
        direction: CashflowDirection,
        amount: Decimal,
    ) -> Result<(), TransactionError> {
        self.check_addition(date, direction, amount).map(|_| ())
    }

    fn check_addition(
        &self,
        date: NaiveDate,
        direction: CashflowDirection,
        amount: Decimal,
    ) -> Result<(DailySummary, CashflowTotals), TransactionError> {
        let day = self
            .summaries
            .get(&date)
            .copied()
            .unwrap_or_default()
            .checked_add(direction, amount)?;
        let totals = self.totals.checked_add(direction, amount)?;
        Ok((day, totals))
    }

    pub fn get(&self, date: NaiveDate) -> Option<&DailySummary> {
        self.summaries.get(&date)
    }

    /// Dates with cashflow, most recent first.
    pub fn chronological_descending(&self) -> Vec<NaiveDate> {
        self.summaries.keys().rev().copied().collect()
    }

    /// Summaries paired with their date, most recent first.
    pub fn iter_descending(&self) -> impl Iterator<Item = (NaiveDate, &DailySummary)> {
        self.summaries.iter().rev().map(|(date, summary)| (*date, summary))
    }

    pub fn len(&self) -> usize {
        self.summaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.summaries.is_empty()
    }

    /// Sum over all days in `direction`.
    pub fn total(&self, direction: CashflowDirection) -> Decimal {
        self.totals.total(direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_same_day_combines_directions() {
        let mut ledger = DailyLedger::new();
        let day = date(2016, 1, 4);
        ledger.add_to_daily_summary(day, CashflowDirection::Outgoing, dec!(10025)).unwrap();
        ledger.add_to_daily_summary(day, CashflowDirection::Incoming, dec!(10)).unwrap();
        ledger.add_to_daily_summary(day, CashflowDirection::Outgoing, dec!(250)).unwrap();

        assert_eq!(ledger.len(), 1);
        let summary = ledger.get(day).unwrap();
        assert_eq!(summary.incoming, dec!(10));
        assert_eq!(summary.outgoing, dec!(10275));
    }

    #[test]
    fn test_dates_descending() {
        let mut ledger = DailyLedger::new();
        ledger.add_to_daily_summary(date(2016, 1, 4), CashflowDirection::Outgoing, dec!(1)).unwrap();
        ledger.add_to_daily_summary(date(2016, 3, 7), CashflowDirection::Incoming, dec!(1)).unwrap();
        ledger.add_to_daily_summary(date(2016, 1, 7), CashflowDirection::Incoming, dec!(1)).unwrap();
        ledger.add_to_daily_summary(date(2016, 1, 4), CashflowDirection::Incoming, dec!(1)).unwrap();

        assert_eq!(
            ledger.chronological_descending(),
            vec![date(2016, 3, 7), date(2016, 1, 7), date(2016, 1, 4)]
        );
        let iterated: Vec<NaiveDate> = ledger.iter_descending().map(|(d, _)| d).collect();
        assert_eq!(iterated, ledger.chronological_descending());
    }

    #[test]
    fn test_untouched_dates_absent() {
        let mut ledger = DailyLedger::new();
        ledger.add_to_daily_summary(date(2016, 1, 4), CashflowDirection::Outgoing, dec!(1)).unwrap();
        assert!(ledger.get(date(2016, 1, 5)).is_none());
    }

    #[test]
    fn test_totals_never_decrease() {
        let mut ledger = DailyLedger::new();
        let day = date(2016, 1, 4);
        let mut previous = DailySummary::default();
        for amount in [dec!(0), dec!(1.25), dec!(300), dec!(0.01)] {
            ledger.add_to_daily_summary(day, CashflowDirection::Incoming, amount).unwrap();
            let current = *ledger.get(day).unwrap();
            assert!(current.incoming >= previous.incoming);
            assert_eq!(current.outgoing, Decimal::ZERO);
            previous = current;
        }
        assert_eq!(ledger.total(CashflowDirection::Incoming), dec!(301.26));
    }

    #[test]
    fn test_overflow_leaves_ledger_unchanged() {
        let mut ledger = DailyLedger::new();
        let day = date(2016, 1, 4);
        let half = dec!(50000000000000000000000000000);
        ledger.add_to_daily_summary(day, CashflowDirection::Incoming, half).unwrap();

        let result = ledger.add_to_daily_summary(day, CashflowDirection::Incoming, half);
        assert_eq!(result, Err(TransactionError::ValueOverflow));
        assert_eq!(ledger.get(day).unwrap().incoming, half);

        // different day, but the running total would still overflow
        let other = date(2016, 1, 5);
        assert!(ledger.can_add(other, CashflowDirection::Incoming, half).is_err());
        assert!(ledger.add_to_daily_summary(other, CashflowDirection::Incoming, half).is_err());
        assert!(ledger.get(other).is_none());
        assert_eq!(ledger.total(CashflowDirection::Incoming), half);
    }
}
