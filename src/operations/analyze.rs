use std::collections::HashMap;
use std::io::{self, BufRead, Write};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::input::Prompter;
use crate::models::{AnalysisResult, CategoryTotal, DateRange, ExpenseRecord};
use crate::operations::add::parse_date;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("no expenses recorded between {start} and {end}")]
    EmptyRange { start: NaiveDate, end: NaiveDate },
}

/// Summarize the expenses that fall inside `range`.
///
/// The daily average divides by the number of days the range spans, not
/// by the number of records, and is rounded to cents. Ties between
/// categories with equal sums resolve to whichever entry the category
/// map yields first.
pub fn analyze(
    records: &[ExpenseRecord],
    range: DateRange,
) -> Result<AnalysisResult, AnalysisError> {
    let in_range: Vec<&ExpenseRecord> = records
        .iter()
        .filter(|record| range.contains(record.date))
        .collect();

    let (highest, lowest) = category_extremes(&in_range).ok_or(AnalysisError::EmptyRange {
        start: range.start(),
        end: range.end(),
    })?;

    let total = in_range
        .iter()
        .fold(Decimal::ZERO, |acc, record| acc + record.amount);
    let daily_average = (total / Decimal::from(range.days())).round_dp(2);

    Ok(AnalysisResult {
        range,
        total,
        daily_average,
        highest,
        lowest,
    })
}

fn category_extremes(records: &[&ExpenseRecord]) -> Option<(CategoryTotal, CategoryTotal)> {
    let mut by_category: HashMap<&str, Decimal> = HashMap::new();
    for record in records {
        let entry = by_category
            .entry(record.category.as_str())
            .or_insert(Decimal::ZERO);
        *entry += record.amount;
    }

    let (highest_category, highest_amount) =
        by_category.iter().max_by(|a, b| a.1.cmp(b.1))?;
    let (lowest_category, lowest_amount) = by_category.iter().min_by(|a, b| a.1.cmp(b.1))?;

    Some((
        CategoryTotal {
            category: highest_category.to_string(),
            amount: *highest_amount,
        },
        CategoryTotal {
            category: lowest_category.to_string(),
            amount: *lowest_amount,
        },
    ))
}

/// Prompt for a start and end date until both parse and the start does
/// not come after the end. A failure re-prompts the whole pair.
pub fn prompt_date_range<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
) -> io::Result<DateRange> {
    loop {
        prompter.say("Please enter a date range:")?;
        let raw_start = prompter.read_line("Enter the start date (YYYY-MM-DD):")?;
        let raw_end = prompter.read_line("Enter the end date (YYYY-MM-DD):")?;

        let (start, end) = match (parse_date(&raw_start), parse_date(&raw_end)) {
            (Ok(start), Ok(end)) => (start, end),
            _ => {
                prompter.say("Please enter valid dates in the format YYYY-MM-DD.")?;
                continue;
            }
        };

        match DateRange::new(start, end) {
            Ok(range) => return Ok(range),
            Err(_) => {
                prompter
                    .say("The start date cannot be later than the end date. Please try again.")?;
            }
        }
    }
}
