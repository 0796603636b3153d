use chrono::{Days, Months, NaiveDate};

use common::{Error, Result};

/// Half-open date window `[start, end)` requested from the price source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookbackWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl LookbackWindow {
    /// Window of `years` calendar years ending `lag_days` before `today`.
    ///
    /// The lag keeps an incomplete latest session out of the data. A Feb 29
    /// end date maps to Feb 28 in a non-leap start year.
    pub fn ending_today(years: u32, lag_days: u32, today: NaiveDate) -> Result<Self> {
        let end = today
            .checked_sub_days(Days::new(u64::from(lag_days)))
            .ok_or_else(|| Error::Config(format!("end lag of {lag_days} days underflows")))?;
        let start = years
            .checked_mul(12)
            .and_then(|months| end.checked_sub_months(Months::new(months)))
            .ok_or_else(|| Error::Config(format!("lookback of {years} years underflows")))?;
        Ok(Self { start, end })
    }
}

impl std::fmt::Display for LookbackWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn window_ends_two_days_back_and_spans_twenty_years() {
        let w = LookbackWindow::ending_today(20, 2, d(2026, 10, 18)).unwrap();
        assert_eq!(w.end, d(2026, 10, 16));
        assert_eq!(w.start, d(2006, 10, 16));
    }

    #[test]
    fn leap_day_clamps_to_end_of_february() {
        let w = LookbackWindow::ending_today(1, 0, d(2024, 2, 29)).unwrap();
        assert_eq!(w.start, d(2023, 2, 28));
    }

    #[test]
    fn lag_crosses_month_boundary() {
        let w = LookbackWindow::ending_today(20, 2, d(2025, 3, 1)).unwrap();
        assert_eq!(w.end, d(2025, 2, 27));
    }
}
