mod input;
mod models;
mod operations;
mod store;

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::debug;

use input::Prompter;
use operations::add;
use operations::analyze::{self, AnalysisError};
use store::repository;
use store::{CsvWorkbook, Workbook};

#[derive(Parser)]
#[command(name = "expenses", about = "Personal expense tracker")]
struct Args {
    /// Directory holding the expense workbook
    #[arg(long, default_value = "workbook")]
    data_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let mut workbook = CsvWorkbook::open(&args.data_dir)
        .with_context(|| format!("failed to open workbook at {}", args.data_dir.display()))?;
    let mut prompter = Prompter::stdio();

    println!("Welcome to the Personal Expenses Tracker!");
    println!("This program allows you to add expenses and analyze them.");

    loop {
        println!();
        println!("Please choose an option:");
        println!("1. Add an expense");
        println!("2. Analyze expenses");
        println!("3. Exit");
        println!();

        let choice = prompter.read_line("Enter 1, 2, or 3:")?;
        debug!(choice = %choice, "menu selection");

        match choice.as_str() {
            "1" => {
                let fields = add::collect_expense(&mut prompter)?;
                repository::append_expense(&mut workbook, fields)?;
                println!("Expense added successfully!");
            }
            "2" => run_analysis(&mut workbook, &mut prompter)?,
            "3" => {
                println!("Thank you for using the Personal Expenses Tracker! Goodbye!");
                break;
            }
            _ => println!("Invalid option. Please enter 1, 2, or 3."),
        }
    }

    Ok(())
}

fn run_analysis<W, R, O>(workbook: &mut W, prompter: &mut Prompter<R, O>) -> anyhow::Result<()>
where
    W: Workbook,
    R: BufRead,
    O: Write,
{
    let range = analyze::prompt_date_range(prompter)?;
    let records = repository::load_expenses(workbook)?;

    let result = match analyze::analyze(&records, range) {
        Ok(result) => result,
        Err(AnalysisError::EmptyRange { start, end }) => {
            println!("No expenses found between {} and {}.", start, end);
            return Ok(());
        }
    };

    println!("Total expenses: ${:.2}", result.total);
    println!("Daily average: ${:.2}", result.daily_average);
    println!(
        "Highest category: {} with an amount of ${:.2}",
        result.highest.category, result.highest.amount
    );
    println!(
        "Lowest category: {} with an amount of ${:.2}",
        result.lowest.category, result.lowest.amount
    );

    repository::append_analysis(workbook, &result)?;
    println!("Analysis generated successfully!");
    Ok(())
}
