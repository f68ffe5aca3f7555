pub mod expense;

pub use expense::{
    AnalysisResult, CategoryTotal, DateRange, ExpenseFields, ExpenseRecord, InvalidDateRange,
};
