use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

pub const EXPENSES_SHEET: &str = "expenses";
pub const ANALYSIS_SHEET: &str = "analysis";

const EXPENSES_HEADER: [&str; 4] = ["id", "amount", "category", "date"];
const ANALYSIS_HEADER: [&str; 6] = [
    "id",
    "date range",
    "total",
    "daily average",
    "highest category",
    "lowest category",
];

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access workbook: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to read worksheet data: {0}")]
    Csv(#[from] csv::Error),
    #[error("worksheet '{0}' does not exist")]
    UnknownSheet(String),
    #[error("worksheet '{sheet}' row {row} is malformed: {reason}")]
    MalformedRow {
        sheet: String,
        row: usize,
        reason: String,
    },
}

/// Row-oriented record store: named worksheets of string rows, the first
/// row of each sheet being its header.
pub trait Workbook {
    fn append_row(&mut self, sheet: &str, row: &[String]) -> Result<(), StoreError>;

    /// All rows of a sheet in order, header included.
    fn read_all_rows(&self, sheet: &str) -> Result<Vec<Vec<String>>, StoreError>;
}

/// Workbook backed by a directory with one `<sheet>.csv` file per
/// worksheet.
pub struct CsvWorkbook {
    dir: PathBuf,
}

impl CsvWorkbook {
    /// Open a workbook directory, creating it and seeding the expenses
    /// and analysis sheets with their headers if they are missing.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let workbook = Self {
            dir: dir.as_ref().to_path_buf(),
        };
        fs::create_dir_all(&workbook.dir)?;
        workbook.ensure_sheet(EXPENSES_SHEET, &EXPENSES_HEADER)?;
        workbook.ensure_sheet(ANALYSIS_SHEET, &ANALYSIS_HEADER)?;
        Ok(workbook)
    }

    fn sheet_path(&self, sheet: &str) -> PathBuf {
        self.dir.join(format!("{}.csv", sheet))
    }

    fn ensure_sheet(&self, sheet: &str, header: &[&str]) -> Result<(), StoreError> {
        let path = self.sheet_path(sheet);
        if path.exists() {
            return Ok(());
        }
        debug!(sheet, "creating worksheet");
        let mut writer = csv::Writer::from_path(&path)?;
        writer.write_record(header)?;
        writer.flush()?;
        Ok(())
    }
}

impl Workbook for CsvWorkbook {
    fn append_row(&mut self, sheet: &str, row: &[String]) -> Result<(), StoreError> {
        let path = self.sheet_path(sheet);
        if !path.exists() {
            return Err(StoreError::UnknownSheet(sheet.to_string()));
        }

        let file = OpenOptions::new().append(true).open(&path)?;
        let mut writer = csv::Writer::from_writer(file);
        writer.write_record(row)?;
        writer.flush()?;
        debug!(sheet, "appended row");
        Ok(())
    }

    fn read_all_rows(&self, sheet: &str) -> Result<Vec<Vec<String>>, StoreError> {
        let path = self.sheet_path(sheet);
        if !path.exists() {
            return Err(StoreError::UnknownSheet(sheet.to_string()));
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(&path)?;

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            rows.push(record.iter().map(|field| field.to_string()).collect());
        }
        debug!(sheet, rows = rows.len(), "read worksheet");
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_open_seeds_sheets_with_headers() {
        let dir = tempdir().unwrap();
        let workbook = CsvWorkbook::open(dir.path().join("workbook")).unwrap();

        let expenses = workbook.read_all_rows(EXPENSES_SHEET).unwrap();
        assert_eq!(expenses, vec![vec!["id", "amount", "category", "date"]]);

        let analysis = workbook.read_all_rows(ANALYSIS_SHEET).unwrap();
        assert_eq!(analysis.len(), 1);
        assert_eq!(analysis[0][1], "date range");
    }

    #[test]
    fn test_append_row_then_read_back() {
        let dir = tempdir().unwrap();
        let mut workbook = CsvWorkbook::open(dir.path()).unwrap();

        let row = vec![
            "1".to_string(),
            "10.00".to_string(),
            "Food".to_string(),
            "2023-07-01".to_string(),
        ];
        workbook.append_row(EXPENSES_SHEET, &row).unwrap();

        let rows = workbook.read_all_rows(EXPENSES_SHEET).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], row);
    }

    #[test]
    fn test_reopen_keeps_existing_rows() {
        let dir = tempdir().unwrap();
        {
            let mut workbook = CsvWorkbook::open(dir.path()).unwrap();
            let row = vec![
                "1".to_string(),
                "5.25".to_string(),
                "Coffee".to_string(),
                "2023-07-01".to_string(),
            ];
            workbook.append_row(EXPENSES_SHEET, &row).unwrap();
        }

        let workbook = CsvWorkbook::open(dir.path()).unwrap();
        let rows = workbook.read_all_rows(EXPENSES_SHEET).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1][2], "Coffee");
    }

    #[test]
    fn test_unknown_sheet_is_an_error() {
        let dir = tempdir().unwrap();
        let mut workbook = CsvWorkbook::open(dir.path()).unwrap();

        let read = workbook.read_all_rows("budgets");
        assert!(matches!(read, Err(StoreError::UnknownSheet(_))));

        let append = workbook.append_row("budgets", &["1".to_string()]);
        assert!(matches!(append, Err(StoreError::UnknownSheet(_))));
    }

    #[test]
    fn test_fields_with_commas_survive_round_trip() {
        let dir = tempdir().unwrap();
        let mut workbook = CsvWorkbook::open(dir.path()).unwrap();

        let row = vec![
            "1".to_string(),
            "2023-07-01 to 2023-07-31".to_string(),
            "30.00".to_string(),
            "1.00".to_string(),
            "Food, drink: $20.00".to_string(),
            "Rent: $10.00".to_string(),
        ];
        workbook.append_row(ANALYSIS_SHEET, &row).unwrap();

        let rows = workbook.read_all_rows(ANALYSIS_SHEET).unwrap();
        assert_eq!(rows[1][4], "Food, drink: $20.00");
    }
}
