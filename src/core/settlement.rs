//! Settlement date adjustment.
//!
//! A trade settles on its desired date unless that date falls on the
//! weekend of the currency's market, in which case it rolls forward to the
//! next working day. Both weekend patterns are two consecutive days, so a
//! single shift always lands on a working day.

use crate::core::currency::{CurrencyCode, WeekendConvention};
use chrono::{Datelike, Days, NaiveDate};

/// Compute the date a trade actually settles on.
///
/// # Examples
///
/// ```
/// use cashflow_report::core::currency::CurrencyCode;
/// use cashflow_report::core::settlement::compute_actual_settlement_date;
/// use chrono::NaiveDate;
///
/// // 02 Jan 2016 is a Saturday.
/// let desired = NaiveDate::from_ymd_opt(2016, 1, 2).unwrap();
/// let actual = compute_actual_settlement_date(desired, &CurrencyCode::new("SGP"));
/// assert_eq!(actual, NaiveDate::from_ymd_opt(2016, 1, 4).unwrap());
/// ```
pub fn compute_actual_settlement_date(desired: NaiveDate, currency: &CurrencyCode) -> NaiveDate {
    roll_forward(desired, currency.weekend_convention())
}

/// Shift `date` past the weekend described by `convention`.
///
/// The result is not checked again. Dates too close to the end of the
/// representable calendar to be shifted are returned unchanged.
pub fn roll_forward(date: NaiveDate, convention: WeekendConvention) -> NaiveDate {
    let shift = convention.days_to_next_working_day(date.weekday());
    if shift == 0 {
        return date;
    }
    date.checked_add_days(Days::new(shift)).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_saturday_sunday_weekend() {
        let sgp = CurrencyCode::new("SGP");
        // 01 Jan 2016 is a Friday.
        assert_eq!(compute_actual_settlement_date(date(2016, 1, 1), &sgp), date(2016, 1, 1));
        assert_eq!(compute_actual_settlement_date(date(2016, 1, 2), &sgp), date(2016, 1, 4));
        assert_eq!(compute_actual_settlement_date(date(2016, 1, 3), &sgp), date(2016, 1, 4));
        assert_eq!(compute_actual_settlement_date(date(2016, 1, 4), &sgp), date(2016, 1, 4));
    }

    #[test]
    fn test_friday_saturday_weekend() {
        let aed = CurrencyCode::new("AED");
        assert_eq!(compute_actual_settlement_date(date(2016, 1, 7), &aed), date(2016, 1, 7));
        assert_eq!(compute_actual_settlement_date(date(2016, 1, 8), &aed), date(2016, 1, 10));
        assert_eq!(compute_actual_settlement_date(date(2016, 1, 9), &aed), date(2016, 1, 10));
        assert_eq!(compute_actual_settlement_date(date(2016, 1, 10), &aed), date(2016, 1, 10));
    }

    #[test]
    fn test_lowercase_sar_uses_friday_saturday() {
        let sar = CurrencyCode::new("sar");
        // 07 Oct 2016 is a Friday.
        assert_eq!(compute_actual_settlement_date(date(2016, 10, 7), &sar), date(2016, 10, 9));
    }

    #[test]
    fn test_whole_week_lands_on_working_days() {
        for convention in [WeekendConvention::FridaySaturday, WeekendConvention::SaturdaySunday] {
            for offset in 0..7 {
                let d = date(2016, 1, 1) + Days::new(offset);
                let rolled = roll_forward(d, convention);
                assert!(!convention.is_weekend(rolled.weekday()));
                assert!(rolled >= d);
                assert!((rolled - d).num_days() <= 2);
            }
        }
    }

    #[test]
    fn test_end_of_calendar_is_total() {
        // The last representable date either needs no shift or cannot be shifted.
        for convention in [WeekendConvention::FridaySaturday, WeekendConvention::SaturdaySunday] {
            assert_eq!(roll_forward(NaiveDate::MAX, convention), NaiveDate::MAX);
        }
    }
}
