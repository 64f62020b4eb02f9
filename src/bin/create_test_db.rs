use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use time::{Duration, OffsetDateTime};

use expense_tracker::{NewTransaction, TransactionStore, TransactionType};

/// A utility for creating a database of sample transactions for the expense tracker.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,

    /// How many weeks of sample transactions to create, counting back from today.
    #[arg(long, default_value_t = 12)]
    weeks: i64,
}

/// The transactions repeated each week: type, amount, category, description and
/// the day of the week counted from the start of the week.
const WEEKLY_TRANSACTIONS: [(TransactionType, f64, &str, &str, i64); 6] = [
    (TransactionType::Income, 1250.0, "Salary", "Weekly pay", 0),
    (TransactionType::Expense, 142.37, "Food & Dining", "Groceries", 1),
    (TransactionType::Expense, 45.0, "Transportation", "Fuel", 2),
    (TransactionType::Expense, 89.99, "Bills & Utilities", "Power bill", 3),
    (TransactionType::Expense, 24.5, "Entertainment", "Movie tickets", 5),
    (TransactionType::Income, 60.0, "Freelance", "Logo design", 6),
];

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let store = TransactionStore::open(output_path)?;

    println!("Creating {} weeks of sample transactions...", args.weeks);

    let today = OffsetDateTime::now_utc().date();
    let first_week = today - Duration::weeks(args.weeks);

    for week in 0..args.weeks {
        let week_start = first_week + Duration::weeks(week);

        for (transaction_type, amount, category, description, day) in WEEKLY_TRANSACTIONS {
            let date = week_start + Duration::days(day);

            if date > today {
                continue;
            }

            let transaction =
                NewTransaction::new(transaction_type, amount, category, description, date)?;
            store.add(transaction)?;
        }
    }

    println!("Created {} transactions.", store.count()?);
    println!("Success!");

    Ok(())
}
