//! Billing periods formatted `YYYY-MM`.

use chrono::{Datelike, NaiveDate};

use crate::server::error::AppError;

/// A calendar month used as a billing period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BillingPeriod {
    pub year: i32,
    pub month: u32,
}

impl BillingPeriod {
    /// Parses `YYYY-MM`.
    pub fn parse(value: &str) -> Result<Self, AppError> {
        let invalid = || AppError::BadRequest(format!("Invalid period '{}', expected YYYY-MM", value));

        let (year, month) = value.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }

        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        if !(1..=12).contains(&month) {
            return Err(invalid());
        }

        Ok(Self { year, month })
    }

    /// The period containing the given date.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn first_day(&self) -> Result<NaiveDate, AppError> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).ok_or_else(|| self.out_of_range())
    }

    pub fn last_day(&self) -> Result<NaiveDate, AppError> {
        let (year, month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };

        NaiveDate::from_ymd_opt(year, month, 1)
            .and_then(|next| next.pred_opt())
            .ok_or_else(|| self.out_of_range())
    }

    /// Compact `YYYYMM` form used in invoice numbers.
    pub fn compact(&self) -> String {
        format!("{:04}{:02}", self.year, self.month)
    }

    fn out_of_range(&self) -> AppError {
        crate::server::error::internal::InternalError::DateOutOfRange(self.to_string()).into()
    }
}

impl std::fmt::Display for BillingPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_formats_period() {
        let period = BillingPeriod::parse("2026-02").unwrap();

        assert_eq!(period.to_string(), "2026-02");
        assert_eq!(period.compact(), "202602");
        assert_eq!(
            period.first_day().unwrap(),
            NaiveDate::from_ymd_opt(2026, 2, 1).unwrap()
        );
        assert_eq!(
            period.last_day().unwrap(),
            NaiveDate::from_ymd_opt(2026, 2, 28).unwrap()
        );
    }

    #[test]
    fn december_ends_on_the_31st() {
        let period = BillingPeriod::parse("2026-12").unwrap();
        assert_eq!(
            period.last_day().unwrap(),
            NaiveDate::from_ymd_opt(2026, 12, 31).unwrap()
        );
    }

    #[test]
    fn rejects_malformed_periods() {
        for value in ["2026-13", "2026-1", "26-01", "2026/01", "abcd-ef", ""] {
            assert!(BillingPeriod::parse(value).is_err(), "{} should fail", value);
        }
    }
}
