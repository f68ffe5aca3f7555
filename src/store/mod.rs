pub mod repository;
pub mod workbook;

pub use workbook::{CsvWorkbook, StoreError, Workbook};
