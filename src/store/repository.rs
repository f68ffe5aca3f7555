use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::info;

use crate::models::{AnalysisResult, CategoryTotal, ExpenseFields, ExpenseRecord};
use crate::store::workbook::{ANALYSIS_SHEET, EXPENSES_SHEET, StoreError, Workbook};

/// Append a validated expense to the expenses sheet.
///
/// The id is the sheet's current row count, header included, so the
/// first record gets id 1. With a single writer ids are sequential;
/// concurrent writers are out of scope.
pub fn append_expense<W: Workbook>(
    workbook: &mut W,
    fields: ExpenseFields,
) -> Result<ExpenseRecord, StoreError> {
    let next_id = workbook.read_all_rows(EXPENSES_SHEET)?.len() as u64;
    let record = ExpenseRecord::new(next_id, fields.amount, fields.category, fields.date);

    workbook.append_row(
        EXPENSES_SHEET,
        &[
            record.id.to_string(),
            record.amount.to_string(),
            record.category.clone(),
            record.date.to_string(),
        ],
    )?;
    info!(id = record.id, "expense recorded");
    Ok(record)
}

/// Read every expense back from the expenses sheet, skipping the header.
pub fn load_expenses<W: Workbook>(workbook: &W) -> Result<Vec<ExpenseRecord>, StoreError> {
    let rows = workbook.read_all_rows(EXPENSES_SHEET)?;

    let mut records = Vec::with_capacity(rows.len().saturating_sub(1));
    for (index, row) in rows.iter().enumerate().skip(1) {
        records.push(parse_expense_row(row, index)?);
    }
    Ok(records)
}

fn parse_expense_row(row: &[String], index: usize) -> Result<ExpenseRecord, StoreError> {
    let malformed = |reason: &str| StoreError::MalformedRow {
        sheet: EXPENSES_SHEET.to_string(),
        row: index,
        reason: reason.to_string(),
    };

    if row.len() != 4 {
        return Err(malformed("expected 4 columns"));
    }

    let id = row[0].parse::<u64>().map_err(|_| malformed("bad id"))?;
    let amount = Decimal::from_str(&row[1]).map_err(|_| malformed("bad amount"))?;
    let date = NaiveDate::parse_from_str(&row[3], "%Y-%m-%d").map_err(|_| malformed("bad date"))?;

    Ok(ExpenseRecord::new(id, amount, row[2].clone(), date))
}

/// Append a computed summary to the analysis sheet, id by row count.
pub fn append_analysis<W: Workbook>(
    workbook: &mut W,
    analysis: &AnalysisResult,
) -> Result<(), StoreError> {
    let next_id = workbook.read_all_rows(ANALYSIS_SHEET)?.len();

    workbook.append_row(
        ANALYSIS_SHEET,
        &[
            next_id.to_string(),
            analysis.range.label(),
            format!("{:.2}", analysis.total),
            format!("{:.2}", analysis.daily_average),
            format_category_total(&analysis.highest),
            format_category_total(&analysis.lowest),
        ],
    )?;
    info!(id = next_id, "analysis recorded");
    Ok(())
}

fn format_category_total(category_total: &CategoryTotal) -> String {
    format!(
        "{}: ${:.2}",
        category_total.category, category_total.amount
    )
}
