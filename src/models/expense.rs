use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// One validated transaction entry as stored in the expenses worksheet.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseRecord {
    pub id: u64,
    pub amount: Decimal,
    pub category: String,
    pub date: NaiveDate,
}

impl ExpenseRecord {
    pub fn new(id: u64, amount: Decimal, category: String, date: NaiveDate) -> Self {
        Self {
            id,
            amount,
            category,
            date,
        }
    }
}

/// Validated user input for a new expense, before an id is assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseFields {
    pub amount: Decimal,
    pub category: String,
    pub date: NaiveDate,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("start date {start} is after end date {end}")]
pub struct InvalidDateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Inclusive calendar date range. `start <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, InvalidDateRange> {
        if start > end {
            return Err(InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of calendar days spanned, counting both endpoints.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    pub fn label(&self) -> String {
        format!("{} to {}", self.start, self.end)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: Decimal,
}

/// Summary computed over the expenses that fall inside a date range.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    pub range: DateRange,
    pub total: Decimal,
    pub daily_average: Decimal,
    pub highest: CategoryTotal,
    pub lowest: CategoryTotal,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("Invalid date")
    }

    #[test]
    fn test_date_range_rejects_inverted_dates() {
        let result = DateRange::new(date(2023, 7, 10), date(2023, 7, 1));
        assert!(result.is_err());
    }

    #[test]
    fn test_date_range_accepts_single_day() {
        let range = DateRange::new(date(2023, 7, 1), date(2023, 7, 1)).unwrap();
        assert_eq!(range.days(), 1);
    }

    #[test]
    fn test_date_range_days_counts_both_endpoints() {
        let range = DateRange::new(date(2023, 7, 1), date(2023, 7, 2)).unwrap();
        assert_eq!(range.days(), 2);
    }

    #[test]
    fn test_date_range_contains_is_inclusive() {
        let range = DateRange::new(date(2023, 7, 1), date(2023, 7, 31)).unwrap();
        assert!(range.contains(date(2023, 7, 1)));
        assert!(range.contains(date(2023, 7, 31)));
        assert!(!range.contains(date(2023, 8, 1)));
        assert!(!range.contains(date(2023, 6, 30)));
    }

    #[test]
    fn test_date_range_label() {
        let range = DateRange::new(date(2023, 7, 1), date(2023, 7, 2)).unwrap();
        assert_eq!(range.label(), "2023-07-01 to 2023-07-02");
    }
}
