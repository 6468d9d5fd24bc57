use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Currencies whose markets close on Friday and Saturday.
const FRIDAY_SATURDAY_CURRENCIES: [&str; 2] = ["AED", "SAR"];

/// ISO 4217-style currency code as it appears in a trade feed.
///
/// The code is kept exactly as supplied; comparisons against the
/// weekend tables are case-insensitive.
///
/// # Examples
///
/// ```
/// use cashflow_report::core::currency::{CurrencyCode, WeekendConvention};
///
/// let aed = CurrencyCode::new("aed");
/// assert_eq!(aed.weekend_convention(), WeekendConvention::FridaySaturday);
/// assert_eq!(
///     CurrencyCode::new("SGP").weekend_convention(),
///     WeekendConvention::SaturdaySunday,
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// The weekend convention of the market settling this currency.
    ///
    /// Unknown codes fall back to the Saturday/Sunday weekend.
    pub fn weekend_convention(&self) -> WeekendConvention {
        let code = self.0.trim();
        if FRIDAY_SATURDAY_CURRENCIES
            .iter()
            .any(|c| c.eq_ignore_ascii_case(code))
        {
            WeekendConvention::FridaySaturday
        } else {
            WeekendConvention::SaturdaySunday
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for CurrencyCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Which two days of the week a currency's market does not settle on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeekendConvention {
    /// Sunday to Thursday working week (e.g. AED, SAR).
    FridaySaturday,
    /// Monday to Friday working week.
    SaturdaySunday,
}

impl WeekendConvention {
    /// Days to add so that a date falling on `day` lands on the next
    /// working day. Zero for working days.
    pub fn days_to_next_working_day(self, day: Weekday) -> u64 {
        match (self, day) {
            (WeekendConvention::FridaySaturday, Weekday::Fri) => 2,
            (WeekendConvention::FridaySaturday, Weekday::Sat) => 1,
            (WeekendConvention::SaturdaySunday, Weekday::Sat) => 2,
            (WeekendConvention::SaturdaySunday, Weekday::Sun) => 1,
            _ => 0,
        }
    }

    pub fn is_weekend(self, day: Weekday) -> bool {
        self.days_to_next_working_day(day) > 0
    }
}

impl fmt::Display for WeekendConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeekendConvention::FridaySaturday => write!(f, "Fri/Sat"),
            WeekendConvention::SaturdaySunday => write!(f, "Sat/Sun"),
        }
    }
}
