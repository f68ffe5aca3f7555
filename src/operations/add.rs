use std::io::{self, BufRead, Write};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::input::Prompter;
use crate::models::ExpenseFields;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("amount is not a number")]
    NotANumber,
    #[error("amount has more than 2 decimal places")]
    TooManyDecimals,
    #[error("amount cannot be negative")]
    NegativeAmount,
    #[error("category cannot be empty")]
    EmptyCategory,
    #[error("date is not in YYYY-MM-DD format")]
    InvalidDate,
}

/// Amount must parse as a decimal with at most 2 fractional digits.
pub fn parse_amount(raw: &str) -> Result<Decimal, ValidationError> {
    let amount: Decimal = raw
        .trim()
        .parse()
        .map_err(|_| ValidationError::NotANumber)?;
    if amount.scale() > 2 {
        return Err(ValidationError::TooManyDecimals);
    }
    if amount.is_sign_negative() {
        return Err(ValidationError::NegativeAmount);
    }
    Ok(amount)
}

/// Trim surrounding whitespace and capitalize: first letter uppercased,
/// the rest lowercased.
pub fn normalize_category(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyCategory);
    }

    let mut chars = trimmed.chars();
    let capitalized = match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    };
    Ok(capitalized)
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|_| ValidationError::InvalidDate)
}

/// Prompt for the three expense fields in order, re-prompting each field
/// on its own until it passes. There is no retry limit.
pub fn collect_expense<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
) -> io::Result<ExpenseFields> {
    let amount = loop {
        let raw = prompter.read_line("Enter the amount: $")?;
        match parse_amount(&raw) {
            Ok(amount) => break amount,
            Err(_) => prompter.say("Please enter a valid amount.")?,
        }
    };

    let category = loop {
        let raw = prompter.read_line("Enter the category:")?;
        match normalize_category(&raw) {
            Ok(category) => break category,
            Err(_) => prompter.say("Category cannot be empty.")?,
        }
    };

    let date = loop {
        let raw = prompter.read_line("Enter the date (YYYY-MM-DD):")?;
        match parse_date(&raw) {
            Ok(date) => break date,
            Err(_) => prompter.say("Please enter a valid date in the format YYYY-MM-DD.")?,
        }
    };

    Ok(ExpenseFields {
        amount,
        category,
        date,
    })
}
